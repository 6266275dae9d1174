//! Built-in probe system
//!
//! [`ProbeSystem`] is the diagnostic stand-in used when no native solver is
//! attached to the debugger. It implements both consumed surfaces of a real
//! simulation handle: the input/tick entry points and the settings get/set
//! surface declared by the `cfd` schema. Forwarded impulses are kept in a
//! bounded ring so a renderer (or a test) can inspect recent interaction.

use std::collections::VecDeque;

use iterscope_input::IterativeSystem;
use iterscope_render::{pack_rgba, VertexPC};
use iterscope_settings::{GetAndSetProperties, PropertyValue};

use crate::config::ProbeConfig;

/// Maximum number of impulses retained for the overlay
pub const IMPULSE_CAPACITY: usize = 64;

/// One forwarded pointer impulse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impulse {
    /// Normalized x position
    pub x: f32,
    /// Normalized y position
    pub y: f32,
    /// Pixel swipe since the previous position
    pub dx: f32,
    /// Pixel swipe since the previous position
    pub dy: f32,
    /// Button code (0 left, 2 middle, 1 other)
    pub button: u32,
}

/// Diagnostic iterative system
pub struct ProbeSystem {
    viscosity: f32,
    diffusion_rate: f32,
    mouse_radius: f32,
    iterations: i32,
    time_step: f32,
    simulating: bool,
    ticks: u64,
    impulses: VecDeque<Impulse>,
}

impl ProbeSystem {
    /// Create a probe with schema-default settings
    pub fn new() -> Self {
        Self::from_config(&ProbeConfig::default())
    }

    /// Create a probe with initial settings from config
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self {
            viscosity: config.viscosity,
            diffusion_rate: config.diffusion_rate,
            mouse_radius: config.mouse_radius,
            iterations: config.iterations,
            time_step: config.time_step,
            simulating: true,
            ticks: 0,
            impulses: VecDeque::with_capacity(IMPULSE_CAPACITY),
        }
    }

    /// Ticks advanced so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of retained impulses
    pub fn impulse_count(&self) -> usize {
        self.impulses.len()
    }

    /// Iterate retained impulses, oldest first
    pub fn impulses(&self) -> impl Iterator<Item = &Impulse> {
        self.impulses.iter()
    }

    /// Most recently forwarded impulse
    pub fn last_impulse(&self) -> Option<&Impulse> {
        self.impulses.back()
    }

    /// Snapshot of retained impulses as colored points for an external
    /// renderer
    ///
    /// Positions map the normalized preview rectangle onto the z=0 plane in
    /// [-1, 1]; color encodes the button code.
    pub fn overlay_vertices(&self) -> Vec<VertexPC> {
        self.impulses
            .iter()
            .map(|impulse| {
                let color = match impulse.button {
                    0 => pack_rgba(230, 80, 60, 255),
                    2 => pack_rgba(80, 160, 230, 255),
                    _ => pack_rgba(240, 200, 80, 255),
                };
                VertexPC::new(impulse.x * 2.0 - 1.0, 1.0 - impulse.y * 2.0, 0.0, color)
            })
            .collect()
    }
}

impl Default for ProbeSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl IterativeSystem for ProbeSystem {
    fn pointer_input(&mut self, x: f32, y: f32, dx: f32, dy: f32, button: u32) {
        log::trace!(
            "impulse at ({:.3}, {:.3}) swipe ({:.1}, {:.1}) button {}",
            x,
            y,
            dx,
            dy,
            button
        );
        if self.impulses.len() == IMPULSE_CAPACITY {
            self.impulses.pop_front();
        }
        self.impulses.push_back(Impulse { x, y, dx, dy, button });
    }

    fn tick(&mut self) {
        if !self.simulating {
            return;
        }
        self.ticks += 1;
        log::trace!("tick {} (dt {})", self.ticks, self.time_step);
    }
}

impl GetAndSetProperties for ProbeSystem {
    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "Viscosity" => Some(PropertyValue::Float(self.viscosity)),
            "DiffusionRate" => Some(PropertyValue::Float(self.diffusion_rate)),
            "MouseRadius" => Some(PropertyValue::Float(self.mouse_radius)),
            "Iterations" => Some(PropertyValue::Int(self.iterations)),
            "TimeStep" => Some(PropertyValue::Float(self.time_step)),
            "Simulating" => Some(PropertyValue::Bool(self.simulating)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> bool {
        match (name, value) {
            ("Viscosity", PropertyValue::Float(v)) => {
                self.viscosity = v;
                true
            }
            ("DiffusionRate", PropertyValue::Float(v)) => {
                self.diffusion_rate = v;
                true
            }
            ("MouseRadius", PropertyValue::Float(v)) => {
                self.mouse_radius = v;
                true
            }
            // A solver needs at least one relaxation pass
            ("Iterations", PropertyValue::Int(v)) if v >= 1 => {
                self.iterations = v;
                true
            }
            ("TimeStep", PropertyValue::Float(v)) if v > 0.0 => {
                self.time_step = v;
                true
            }
            ("Simulating", PropertyValue::Bool(v)) => {
                self.simulating = v;
                true
            }
            _ => false,
        }
    }
}
