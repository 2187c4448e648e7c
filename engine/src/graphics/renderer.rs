//! Main renderer implementation
//!
//! The Renderer owns both pipelines, their uniform buffers and the depth
//! texture, and records one render pass per frame.

use crate::graphics::{
    context::RenderContext,
    mesh::{Mesh, Vertex},
    pipeline::{DepthTexture, NormalDebugPipeline, PhongPipeline},
    uniform::{FrameUniforms, NormalsUniform, PhongUniform, UniformBuffer},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use wgpu::util::DeviceExt;

/// Which pipelines are drawn each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Shaded geometry only
    #[default]
    Phong,
    /// Normal indicators only
    Normals,
    /// Shaded geometry with normal indicators on top
    Combined,
}

impl RenderMode {
    /// Cycle Phong → Normals → Combined → Phong
    pub fn next(self) -> Self {
        match self {
            RenderMode::Phong => RenderMode::Normals,
            RenderMode::Normals => RenderMode::Combined,
            RenderMode::Combined => RenderMode::Phong,
        }
    }

    pub fn draws_phong(self) -> bool {
        matches!(self, RenderMode::Phong | RenderMode::Combined)
    }

    pub fn draws_normals(self) -> bool {
        matches!(self, RenderMode::Normals | RenderMode::Combined)
    }
}

/// Number of vertices each pipeline draws for a mesh
///
/// Only whole triangles are drawn. Trailing vertices that do not complete a
/// triangle produce neither a face nor normal indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawCounts {
    /// Vertices submitted to the Phong pipeline
    pub triangle_vertices: u32,
    /// Vertices submitted to the normal-debug pipeline (two per corner)
    pub line_vertices: u32,
}

impl DrawCounts {
    pub fn for_mesh(mesh: &Mesh) -> Self {
        let triangle_vertices = (mesh.triangle_count() * 3) as u32;
        Self {
            triangle_vertices,
            line_vertices: triangle_vertices * NormalDebugPipeline::VERTICES_PER_SOURCE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.triangle_vertices == 0
    }
}

/// GPU resources for an uploaded mesh
pub struct GpuMesh {
    /// Vertex data, usable both as a vertex and a storage buffer
    vertex_buffer: wgpu::Buffer,
    /// Binds the vertex data for the normal-debug program
    normals_bind_group: wgpu::BindGroup,
    counts: DrawCounts,
}

impl GpuMesh {
    pub fn draw_counts(&self) -> DrawCounts {
        self.counts
    }
}

/// Main renderer that manages all rendering operations
pub struct Renderer {
    /// Render context with device and queue
    context: Arc<RenderContext>,
    phong_pipeline: PhongPipeline,
    normals_pipeline: NormalDebugPipeline,
    /// Depth texture for depth testing
    depth_texture: DepthTexture,
    phong_uniform_buffer: wgpu::Buffer,
    phong_bind_group: wgpu::BindGroup,
    normals_uniform_buffer: wgpu::Buffer,
    /// Current surface format
    surface_format: wgpu::TextureFormat,
    size: winit::dpi::PhysicalSize<u32>,
}

impl Renderer {
    /// Create a new renderer targeting surfaces of `surface_format`
    pub fn new(
        context: Arc<RenderContext>,
        surface_format: wgpu::TextureFormat,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> Self {
        info!(width = size.width, height = size.height, "Initializing renderer");

        let device = &context.device;
        let phong_pipeline = PhongPipeline::new(device, surface_format);
        let normals_pipeline = NormalDebugPipeline::new(device, surface_format);
        let depth_texture = DepthTexture::new(device, size.width, size.height);

        let phong_uniform_buffer =
            PhongUniform::default().create_buffer(device, Some("Phong Uniform Buffer"));
        let phong_bind_group = phong_pipeline.create_bind_group(device, &phong_uniform_buffer);
        let normals_uniform_buffer =
            NormalsUniform::default().create_buffer(device, Some("Normals Uniform Buffer"));

        Self {
            context,
            phong_pipeline,
            normals_pipeline,
            depth_texture,
            phong_uniform_buffer,
            phong_bind_group,
            normals_uniform_buffer,
            surface_format,
            size,
        }
    }

    /// Resize the renderer when the window size changes
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.depth_texture =
                DepthTexture::new(&self.context.device, new_size.width, new_size.height);
            debug!(width = new_size.width, height = new_size.height, "Renderer resized");
        }
    }

    /// Width over height of the current target
    pub fn aspect_ratio(&self) -> f32 {
        self.size.width.max(1) as f32 / self.size.height.max(1) as f32
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Upload a mesh to the GPU
    pub fn upload_mesh(&self, mesh: &Mesh, name: &str) -> GpuMesh {
        // A zero-sized storage binding is invalid, so empty meshes get one
        // placeholder vertex that is never drawn.
        let placeholder = [Vertex::new([0.0; 3], [0.0; 3], [0.0; 3])];
        let vertices: &[Vertex] = if mesh.is_empty() {
            &placeholder
        } else {
            &mesh.vertices
        };

        let vertex_buffer =
            self.context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{name} Vertex Buffer")),
                    contents: bytemuck::cast_slice(vertices),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::STORAGE,
                });

        let normals_bind_group = self.normals_pipeline.create_bind_group(
            &self.context.device,
            &self.normals_uniform_buffer,
            &vertex_buffer,
        );

        info!(
            name = %name,
            vertices = mesh.vertices.len(),
            triangles = mesh.triangle_count(),
            "Uploaded mesh to GPU"
        );

        GpuMesh {
            vertex_buffer,
            normals_bind_group,
            counts: DrawCounts::for_mesh(mesh),
        }
    }

    /// Render one frame of `mesh` to a surface
    pub fn render(
        &mut self,
        surface: &wgpu::Surface,
        mesh: &GpuMesh,
        frame: &FrameUniforms,
        mode: RenderMode,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        frame
            .phong
            .update_buffer(&self.context.queue, &self.phong_uniform_buffer);
        frame
            .normals
            .update_buffer(&self.context.queue, &self.normals_uniform_buffer);

        let mut encoder = self.context.create_command_encoder(Some("Render Encoder"));

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let counts = mesh.counts;
            if !counts.is_empty() && mode.draws_phong() {
                render_pass.set_pipeline(&self.phong_pipeline.pipeline);
                render_pass.set_bind_group(0, &self.phong_bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.draw(0..counts.triangle_vertices, 0..1);
            }

            if !counts.is_empty() && mode.draws_normals() {
                render_pass.set_pipeline(&self.normals_pipeline.pipeline);
                render_pass.set_bind_group(0, &mesh.normals_bind_group, &[]);
                render_pass.draw(0..counts.line_vertices, 0..1);
            }
        }

        self.context.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
