//! WebGPU device bring-up
//!
//! The window surface is owned by the application; the context only needs it
//! to pick a compatible adapter and to read its capabilities.

use crate::error::EngineError;
use std::sync::Arc;
use tracing::{debug, info};

/// Adapter, device and queue shared by the renderer
pub struct RenderContext {
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    adapter: wgpu::Adapter,
}

impl RenderContext {
    /// Request an adapter able to present to `compatible_surface`, then a device
    pub async fn new(
        instance: &wgpu::Instance,
        compatible_surface: &wgpu::Surface<'_>,
    ) -> Result<Self, EngineError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(compatible_surface),
                force_fallback_adapter: false,
            })
            .await?;

        let adapter_info = adapter.get_info();
        info!(
            gpu_name = %adapter_info.name,
            backend = ?adapter_info.backend,
            "GPU adapter selected"
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Viewer Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        Ok(Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
            adapter,
        })
    }

    /// Configuration for presenting to `surface` at the given size
    pub fn surface_configuration(
        &self,
        surface: &wgpu::Surface,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration, EngineError> {
        let caps = surface.get_capabilities(&self.adapter);
        let (format, alpha_mode) = select_surface_settings(&caps)?;
        debug!(format = ?format, alpha_mode = ?alpha_mode, "Surface settings selected");

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    pub fn create_command_encoder(&self, label: Option<&str>) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label })
    }

    pub fn submit<I: IntoIterator<Item = wgpu::CommandBuffer>>(&self, command_buffers: I) {
        self.queue.submit(command_buffers);
    }
}

/// Pick a surface format (sRGB preferred) and alpha mode from the reported
/// capabilities
pub fn select_surface_settings(
    caps: &wgpu::SurfaceCapabilities,
) -> Result<(wgpu::TextureFormat, wgpu::CompositeAlphaMode), EngineError> {
    let format = caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first())
        .copied()
        .ok_or(EngineError::UnsupportedSurface("no texture formats"))?;
    let alpha_mode = caps
        .alpha_modes
        .first()
        .copied()
        .ok_or(EngineError::UnsupportedSurface("no alpha modes"))?;
    Ok((format, alpha_mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps_with(
        formats: Vec<wgpu::TextureFormat>,
        alpha_modes: Vec<wgpu::CompositeAlphaMode>,
    ) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            present_modes: vec![wgpu::PresentMode::Fifo],
            alpha_modes,
            usages: wgpu::TextureUsages::RENDER_ATTACHMENT,
        }
    }

    fn caps(formats: Vec<wgpu::TextureFormat>) -> wgpu::SurfaceCapabilities {
        caps_with(formats, vec![wgpu::CompositeAlphaMode::Opaque])
    }

    #[test]
    fn test_prefers_srgb_format() {
        let caps = caps(vec![
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ]);
        let (format, alpha) = select_surface_settings(&caps).unwrap();
        assert_eq!(format, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(alpha, wgpu::CompositeAlphaMode::Opaque);
    }

    #[test]
    fn test_falls_back_to_first_format() {
        let caps = caps(vec![wgpu::TextureFormat::Rgba16Float]);
        let (format, _) = select_surface_settings(&caps).unwrap();
        assert_eq!(format, wgpu::TextureFormat::Rgba16Float);
    }

    #[test]
    fn test_empty_capabilities_are_an_error() {
        assert!(matches!(
            select_surface_settings(&caps(vec![])),
            Err(EngineError::UnsupportedSurface(_))
        ));

        let no_alpha = caps_with(vec![wgpu::TextureFormat::Bgra8UnormSrgb], vec![]);
        assert!(matches!(
            select_surface_settings(&no_alpha),
            Err(EngineError::UnsupportedSurface(_))
        ));
    }
}
