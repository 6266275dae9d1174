//! iterscope - debugger front-end for external iterative systems
//!
//! iterscope hosts an externally-owned iterative numerical system (a native
//! solver reached through a handle) in a debugging session: a preview window
//! whose pointer drags become solver impulses, a per-frame tick driver, and
//! a schema-driven settings surface.
//!
//! The workspace splits along the consumed contracts:
//!
//! - [`iterscope_render`] - fixed-layout vertex records for the native
//!   preview renderer
//! - [`iterscope_settings`] - schema resources and bound property contexts
//! - [`iterscope_input`] - the simulation-handle trait and the preview
//!   controller
//! - this crate - configuration, the windowed shell, and the built-in
//!   [`probe::ProbeSystem`] used when no native solver is attached

pub mod config;
pub mod probe;
pub mod shell;

pub use iterscope_input::{IterativeSystem, PressedButtons, PreviewController};
pub use iterscope_render::{pack_rgba, VertexPC, VertexPN, VertexPNT};
pub use iterscope_settings::{
    GetAndSetProperties, PropertyContext, PropertyDescriptor, PropertyError, PropertyKind,
    PropertySchema, PropertyValue, SchemaError,
};
