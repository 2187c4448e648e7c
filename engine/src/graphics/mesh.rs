//! Mesh and vertex data structures
//!
//! Meshes are non-indexed triangle lists: every three consecutive vertices
//! form one triangle.

use bytemuck::{Pod, Zeroable};

/// Vertex data structure for GPU rendering
///
/// This struct is tightly packed for efficient GPU transfer using bytemuck.
/// The normal-debug program reads it from a storage buffer as 9 floats, so the
/// field order is part of the shader contract.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position
    pub position: [f32; 3],
    /// Object-space surface normal
    pub normal: [f32; 3],
    /// RGB reflectance
    pub color: [f32; 3],
}

impl Vertex {
    /// Number of floats per vertex as seen by the shaders
    pub const FLOATS: usize = 9;

    /// Create a new vertex with the given attributes
    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }

    /// Get the vertex attribute layout for wgpu
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Normal
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Triangle-list mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data, three per triangle
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    /// Create a new mesh from a triangle list
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Number of complete triangles
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over the triangles of the mesh
    pub fn triangles(&self) -> impl Iterator<Item = &[Vertex]> {
        self.vertices.chunks_exact(3)
    }
}
