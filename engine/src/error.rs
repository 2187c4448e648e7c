//! Error types for the engine

use std::io;

/// Errors raised by the CPU shading stages
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShadingError {
    /// The linear part of `model_view` has no inverse, so normals cannot be transformed
    #[error("model-view matrix is not invertible (determinant {determinant})")]
    SingularModelView { determinant: f32 },

    /// A geometry invocation tried to emit more vertices than it declared
    #[error("geometry stage exceeded its emission limit of {max} vertices")]
    EmissionLimit { max: usize },
}

/// Errors that can occur while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that can occur while bringing up the window and GPU
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("No suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("Failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("Surface cannot be presented to: {0}")]
    UnsupportedSurface(&'static str),

    #[error("Failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shading_error_display() {
        let err = ShadingError::EmissionLimit { max: 6 };
        assert_eq!(
            err.to_string(),
            "geometry stage exceeded its emission limit of 6 vertices"
        );
    }

    #[test]
    fn test_config_error_converts_into_engine_error() {
        let err: EngineError = ConfigError::Invalid("window width is zero".into()).into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: window width is zero"
        );
    }
}
