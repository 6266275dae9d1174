//! Headless session
//!
//! Drives the full debugger wiring without opening a window:
//!
//! - Loading the `cfd` settings schema
//! - Binding a property context to the probe system
//! - Forwarding a scripted pointer drag through the preview controller
//! - Ticking the system and adjusting settings mid-session
//!
//! Run with: `cargo run --example headless_session`

use std::cell::RefCell;
use std::rc::Rc;

use winit::event::{ElementState, MouseButton};

use iterscope::config::ProbeConfig;
use iterscope::probe::ProbeSystem;
use iterscope::{PreviewController, PropertySchema, PropertyValue};

fn main() {
    env_logger::init();

    // Load the settings schema and bind it to a probe system
    let schema = PropertySchema::load("cfd").expect("Failed to load schema");
    let system = Rc::new(RefCell::new(ProbeSystem::from_config(
        &ProbeConfig::default(),
    )));
    let context = schema
        .create_property_context("isd:RefCFDSettings", system.clone())
        .expect("Failed to bind settings");

    // A 640x480 preview surface, no window required
    let mut controller = PreviewController::new(system.clone(), 640, 480);

    // Scripted left drag across the preview
    controller.process_cursor_entered();
    controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
    for step in 0..8 {
        let x = 80.0 + step as f32 * 60.0;
        let y = 240.0 + step as f32 * 10.0;
        controller.process_cursor_moved(x, y);
    }
    controller.process_mouse_button(MouseButton::Left, ElementState::Released);

    // A short middle-button stir
    controller.process_mouse_button(MouseButton::Middle, ElementState::Pressed);
    controller.process_cursor_moved(320.0, 240.0);
    controller.process_cursor_moved(300.0, 260.0);
    controller.process_mouse_button(MouseButton::Middle, ElementState::Released);

    // Let the system run for a second of frames
    for _ in 0..60 {
        controller.tick();
    }

    // Adjust settings through the bound context, like a property grid would
    context
        .set("Viscosity", PropertyValue::Float(0.12))
        .expect("set Viscosity");
    context
        .set("Simulating", PropertyValue::Bool(false))
        .expect("set Simulating");

    // Paused: these ticks should not advance the system
    for _ in 0..30 {
        controller.tick();
    }

    {
        let probe = system.borrow();
        println!("Session summary:");
        println!("  ticks advanced : {}", probe.ticks());
        println!("  impulses seen  : {}", probe.impulse_count());
        println!("  overlay points : {}", probe.overlay_vertices().len());
        if let Some(impulse) = probe.last_impulse() {
            println!(
                "  last impulse   : ({:.3}, {:.3}) button {}",
                impulse.x, impulse.y, impulse.button
            );
        }
    }

    println!("Settings after the session:");
    for descriptor in context.descriptors() {
        let value = context.get(&descriptor.name).expect("get property");
        println!("  {} = {}", descriptor.name, value);
    }

    controller.release();
    // A second release is a no-op
    controller.release();
}
