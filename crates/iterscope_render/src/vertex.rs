//! Fixed-layout vertex types
//!
//! These types match the vertex declarations of the native preview renderer
//! exactly. All types derive Pod and Zeroable so whole slices can be cast to
//! bytes and uploaded without copying field by field.

use bytemuck::{Pod, Zeroable};

/// A lit vertex: position + normal
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPN {
    /// Position in model space
    pub position: [f32; 3],
    /// Surface normal
    pub normal: [f32; 3],
}

impl VertexPN {
    /// Create a vertex from raw scalars, in field order
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: [x, y, z],
            normal: [nx, ny, nz],
        }
    }

    /// Get the vertex buffer layout for VertexPN
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexPN>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // normal: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }
    }
}

/// A textured lit vertex: position + normal + texture coordinate
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPNT {
    /// Position in model space
    pub position: [f32; 3],
    /// Surface normal
    pub normal: [f32; 3],
    /// Texture coordinate
    pub tex: [f32; 2],
}

impl VertexPNT {
    /// Create a vertex from raw scalars, in field order
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y, z],
            normal: [nx, ny, nz],
            tex: [u, v],
        }
    }

    /// Get the vertex buffer layout for VertexPNT
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexPNT>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // normal: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
                // tex: vec2<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 24,
                    shader_location: 2,
                },
            ],
        }
    }
}

/// A colored vertex: position + packed RGBA color
///
/// The color is a single `u32` holding four 8-bit channels (r, g, b, a in
/// ascending byte order), read by the renderer as unorm8x4.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPC {
    /// Position in model space
    pub position: [f32; 3],
    /// Packed RGBA color
    pub color: u32,
}

impl VertexPC {
    /// Create a vertex from raw scalars and a packed color, in field order
    pub fn new(x: f32, y: f32, z: f32, color: u32) -> Self {
        Self {
            position: [x, y, z],
            color,
        }
    }

    /// Get the vertex buffer layout for VertexPC
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexPC>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // color: unorm8x4
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Unorm8x4,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }
    }
}

/// Pack four 8-bit channels into the `u32` color consumed by [`VertexPC`]
pub fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24)
}
