//! Graphics module
//!
//! Provides rendering functionality including meshes, uniforms,
//! render pipelines, and the main renderer.

pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod renderer;
pub mod uniform;

// Re-export commonly used types
pub use context::RenderContext;
pub use mesh::{Mesh, Vertex};
pub use pipeline::{DepthTexture, NormalDebugPipeline, PhongPipeline};
pub use renderer::{DrawCounts, GpuMesh, RenderMode, Renderer};
pub use uniform::{FrameUniforms, NormalsUniform, PhongUniform, UniformBuffer};
