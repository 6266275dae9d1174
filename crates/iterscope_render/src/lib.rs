//! Vertex records for the native preview renderer
//!
//! The preview renderer consumes vertex buffers in three fixed layouts:
//!
//! - [`VertexPN`] - position + normal
//! - [`VertexPNT`] - position + normal + texture coordinate
//! - [`VertexPC`] - position + packed color
//!
//! Field order and size are the contract: the renderer reads the buffers
//! verbatim at the declared stride, so every type here is `#[repr(C)]` and
//! byte-castable via bytemuck.

mod vertex;

pub use vertex::{pack_rgba, VertexPC, VertexPN, VertexPNT};
