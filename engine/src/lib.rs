//! Voxel shading engine
//!
//! This crate renders a voxel chunk with WebGPU using two shading pipelines:
//! per-fragment Phong lighting, and a debug pass that draws every vertex
//! normal as a short line. CPU reference versions of each shader stage live in
//! [`shading`].

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod graphics;
pub mod input;
pub mod shaders;
pub mod shading;
pub mod state;
pub mod voxel;

// Re-export commonly used types
pub mod prelude {
    pub use crate::app::ViewerApp;
    pub use crate::config::ViewerConfig;
    pub use crate::core::camera::{Camera, Projection, SimpleCamera};
    pub use crate::error::{ConfigError, EngineError, ShadingError};
    pub use crate::graphics::{FrameUniforms, Mesh, RenderMode, Renderer, Vertex};
    pub use crate::input::InputState;
    pub use crate::state::{Game, GameEvent, GameState, StateManager, StatePlaying, UpdateResult};
    pub use crate::voxel::{Air, BlockType, Chunk, Directions, SimpleBlock, CHUNK_SIZE};

    // Math types
    pub use glam::{Mat3, Mat4, Vec3, Vec4};
}

/// Default filter used when neither the config nor `RUST_LOG` sets one
pub const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn";

/// Initialize logging for the engine
///
/// `filter` takes precedence over `RUST_LOG`. Calling this more than once is
/// harmless; later calls are ignored.
pub fn init_logging(filter: Option<&str>) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = match filter {
        Some(filter) => EnvFilter::new(filter),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
