//! Debugger shell
//!
//! Windowed host for a preview session: creates the window, dispatches
//! pointer events to the [`PreviewController`], and drives one synchronous
//! system tick per frame. The shell renders nothing itself; the preview
//! surface belongs to the external renderer.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use iterscope_input::{IterativeSystem, PreviewController};
use iterscope_settings::PropertyContext;

use crate::config::AppConfig;

/// Windowed debugger session
pub struct DebuggerShell {
    config: AppConfig,
    window: Option<Arc<Window>>,
    controller: PreviewController,
    context: PropertyContext,
}

impl DebuggerShell {
    /// Create a shell bound to a simulation handle and its settings context
    pub fn new(
        config: AppConfig,
        system: Rc<RefCell<dyn IterativeSystem>>,
        context: PropertyContext,
    ) -> Self {
        let controller =
            PreviewController::new(system, config.window.width, config.window.height);
        Self {
            config,
            window: None,
            controller,
            context,
        }
    }

    /// Run the event loop until the window closes
    pub fn run(mut self) -> Result<(), ShellError> {
        let event_loop = EventLoop::new().map_err(|e| ShellError::EventLoop(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut self)
            .map_err(|e| ShellError::EventLoop(e.to_string()))
    }

    /// Log the bound settings, grid-style
    fn dump_properties(&self) {
        log::info!("Settings ({} properties):", self.context.len());
        for descriptor in self.context.descriptors() {
            match self.context.get(&descriptor.name) {
                Ok(value) => log::info!("  {} = {}", descriptor.name, value),
                Err(e) => log::warn!("  {} unavailable: {}", descriptor.name, e),
            }
        }
    }
}

impl ApplicationHandler for DebuggerShell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attributes = Window::default_attributes()
                .with_title(&self.config.window.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                ));

            let window = match event_loop.create_window(window_attributes) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            // Track the actual surface size, which may differ from the
            // requested logical size on scaled displays
            let size = window.inner_size();
            self.controller.process_resize(size.width, size.height);

            log::info!("Preview window ready - P dumps settings, Escape exits");
            window.request_redraw();
            self.window = Some(window);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                self.controller
                    .process_resize(physical_size.width, physical_size.height);
            }

            WindowEvent::CursorEntered { .. } => {
                self.controller.process_cursor_entered();
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.controller
                    .process_cursor_moved(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.controller.process_mouse_button(button, state);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if event.state == ElementState::Pressed {
                        match key {
                            KeyCode::Escape => event_loop.exit(),
                            KeyCode::KeyP => self.dump_properties(),
                            _ => {}
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                // One synchronous tick per frame
                self.controller.tick();

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.controller.release();
        log::info!("Session closed");
    }
}

/// Error running the debugger shell
#[derive(Debug)]
pub enum ShellError {
    /// Event loop creation or execution failed
    EventLoop(String),
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::EventLoop(msg) => write!(f, "Event loop error: {}", msg),
        }
    }
}

impl std::error::Error for ShellError {}
