//! GPU uniform buffer types
//!
//! Provides uniform buffer structures that match the WGSL shader definitions.
//! These structures are used to pass data from the CPU to the GPU.

use crate::error::ShadingError;
use crate::shading::checked_normal_matrix;
use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

/// Phong pipeline uniform buffer data
///
/// This struct matches `PhongUniforms` in `phong.wgsl`. The `mat3x3` normal
/// matrix is stored as three 16-byte aligned columns.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PhongUniform {
    pub model_view: [[f32; 4]; 4],
    pub perspective: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3],
    /// View-space light position
    pub light: [f32; 3],
    _padding: f32,
}

impl PhongUniform {
    /// Build the uniform, deriving the normal matrix from `model_view`
    pub fn new(model_view: Mat4, perspective: Mat4, light: Vec3) -> Result<Self, ShadingError> {
        let normal_matrix = checked_normal_matrix(model_view)?;
        Ok(Self {
            model_view: model_view.to_cols_array_2d(),
            perspective: perspective.to_cols_array_2d(),
            normal_matrix: pad_mat3(normal_matrix),
            light: light.to_array(),
            _padding: 0.0,
        })
    }
}

impl Default for PhongUniform {
    fn default() -> Self {
        Self {
            model_view: Mat4::IDENTITY.to_cols_array_2d(),
            perspective: Mat4::IDENTITY.to_cols_array_2d(),
            normal_matrix: pad_mat3(Mat3::IDENTITY),
            light: [0.0; 3],
            _padding: 0.0,
        }
    }
}

/// Normal-debug pipeline uniform buffer data
///
/// This struct matches `NormalsUniforms` in `normals.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct NormalsUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub perspective: [[f32; 4]; 4],
}

impl NormalsUniform {
    pub fn new(model: Mat4, view: Mat4, perspective: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            perspective: perspective.to_cols_array_2d(),
        }
    }
}

impl Default for NormalsUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameUniforms {
    pub phong: PhongUniform,
    pub normals: NormalsUniform,
}

impl FrameUniforms {
    /// Build both pipelines' uniforms from the scene matrices
    ///
    /// Fails if `view · model` is singular.
    pub fn new(
        model: Mat4,
        view: Mat4,
        perspective: Mat4,
        light: Vec3,
    ) -> Result<Self, ShadingError> {
        Ok(Self {
            phong: PhongUniform::new(view * model, perspective, light)?,
            normals: NormalsUniform::new(model, view, perspective),
        })
    }
}

fn pad_mat3(matrix: Mat3) -> [[f32; 4]; 3] {
    [
        matrix.x_axis.extend(0.0).to_array(),
        matrix.y_axis.extend(0.0).to_array(),
        matrix.z_axis.extend(0.0).to_array(),
    ]
}

/// Helper trait for creating GPU buffers from uniform types
pub trait UniformBuffer: Pod {
    /// Create a GPU buffer containing this uniform data
    fn create_buffer(&self, device: &wgpu::Device, label: Option<&str>) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;

        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label,
            contents: bytemuck::cast_slice(&[*self]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    /// Update an existing buffer with new data
    fn update_buffer(&self, queue: &wgpu::Queue, buffer: &wgpu::Buffer) {
        queue.write_buffer(buffer, 0, bytemuck::cast_slice(&[*self]));
    }
}

impl UniformBuffer for PhongUniform {}
impl UniformBuffer for NormalsUniform {}
