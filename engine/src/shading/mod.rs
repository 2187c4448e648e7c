//! CPU reference implementations of the shading stages
//!
//! Each function mirrors one stage of the WGSL programs in [`crate::shaders`]
//! and is a pure function of its per-invocation inputs and the uniforms bound
//! for the draw call. They are used to reason about and test the GPU output.
//!
//! Degenerate inputs (zero-length normals or light vectors) are not guarded.
//! Normalizing them produces NaN, and what happens next depends on how `max`
//! treats NaN, both here and on the GPU.

pub mod full_bright;
pub mod normals;
pub mod phong;

use crate::graphics::Vertex;
use glam::Vec3;

pub use full_bright::{
    checked_normal_matrix, full_bright_vertex, normal_matrix, FullBrightOutput,
    FullBrightUniforms,
};
pub use normals::{
    normal_debug_lines, normals_geometry, normals_vertex, GeometryEmitter, LineStrip, LineVertex,
    NormalsUniforms, NormalsVertexOutput,
};
pub use phong::{light_terms, phong_fragment, LightTerms, PhongFragmentInput};

/// Flat ambient factor applied to the base color
pub const AMBIENT_STRENGTH: f32 = 0.33;
/// Color of the specular highlight
pub const SPECULAR_COLOR: Vec3 = Vec3::splat(0.7);
/// Blinn-Phong exponent
pub const SHININESS: i32 = 16;
/// Object-space length of a normal indicator segment
pub const NORMAL_LENGTH: f32 = 0.5;
/// Color every normal-debug vertex is forced to
pub const NORMAL_COLOR: Vec3 = Vec3::new(1.0, 1.0, 0.0);
/// Vertices a normals geometry invocation may emit (3 segments of 2)
pub const MAX_GEOMETRY_VERTICES: usize = 6;

/// Per-vertex attributes as seen by a vertex stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexInput {
    /// Object-space position
    pub position: Vec3,
    /// Object-space normal
    pub normal: Vec3,
    /// RGB reflectance
    pub color: Vec3,
}

impl VertexInput {
    pub fn new(position: Vec3, normal: Vec3, color: Vec3) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }
}

impl From<&Vertex> for VertexInput {
    fn from(vertex: &Vertex) -> Self {
        Self {
            position: Vec3::from_array(vertex.position),
            normal: Vec3::from_array(vertex.normal),
            color: Vec3::from_array(vertex.color),
        }
    }
}
