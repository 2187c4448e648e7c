//! Configuration types for the viewer
//!
//! Every section has defaults, so a config file only needs the values it
//! overrides.

use crate::core::camera::{Projection, SimpleCamera};
use crate::error::{ConfigError, EngineError};
use crate::graphics::RenderMode;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Voxel Viewer".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Initial camera placement and projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub direction: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [2.0, -1.0, 1.0],
            direction: [-2.0, 1.0, 1.0],
            up: [0.0, 1.0, 0.0],
            fov_y_degrees: 60.0,
            z_near: 0.1,
            z_far: 1024.0,
        }
    }
}

impl CameraConfig {
    pub fn camera(&self) -> SimpleCamera {
        SimpleCamera::new(
            Vec3::from_array(self.position),
            Vec3::from_array(self.direction),
            Vec3::from_array(self.up),
        )
    }

    pub fn projection(&self) -> Projection {
        Projection::from_degrees(self.fov_y_degrees, self.z_near, self.z_far)
    }
}

/// Input sensitivities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Radians per pixel of mouse movement
    pub mouse_sensitivity: f32,
    /// World units per millisecond of held movement key
    pub motion_sensitivity: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.001,
            motion_sensitivity: 0.001,
        }
    }
}

/// What is drawn and how it is placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// View-space light position (`u_light`)
    pub light_position: [f32; 3],
    /// Color of every block in the chunk
    pub block_color: [f32; 3],
    /// Uniform scale applied to the chunk
    pub model_scale: f32,
    /// Translation applied to the chunk after scaling
    pub model_offset: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            light_position: [-1.0, 0.4, 0.9],
            block_color: [0.0, 0.8, 0.0],
            model_scale: 0.01,
            model_offset: [0.0, 0.0, 1.0],
        }
    }
}

impl SceneConfig {
    /// Object to world transform of the chunk
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::from_array(self.model_offset))
            * Mat4::from_scale(Vec3::splat(self.model_scale))
    }

    pub fn light(&self) -> Vec3 {
        Vec3::from_array(self.light_position)
    }
}

/// Top-level viewer configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub scene: SceneConfig,
    /// Pipelines drawn at startup
    pub render_mode: RenderMode,
    /// Custom logging filter (None = default)
    pub log_filter: Option<String>,
}

impl ViewerConfig {
    /// Load and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = ?path, "Loading viewer configuration");
        let contents = fs::read_to_string(path)?;
        let config: ViewerConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        debug!(config = ?config, "Configuration loaded");
        Ok(config)
    }

    /// Load `path` when given, otherwise use the built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, EngineError> {
        match path {
            Some(path) => Ok(Self::load(path)?),
            None => Ok(Self::default()),
        }
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!(path = ?path, "Saved viewer configuration");
        Ok(())
    }

    /// Check the values a renderer cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window size must be non-zero");
        }

        let camera = &self.camera;
        if !(camera.z_near > 0.0 && camera.z_far > camera.z_near) {
            return invalid("camera planes must satisfy 0 < z_near < z_far");
        }
        if !(camera.fov_y_degrees > 0.0 && camera.fov_y_degrees < 180.0) {
            return invalid("camera fov_y_degrees must be within (0, 180)");
        }
        if Vec3::from_array(camera.direction).length_squared() == 0.0 {
            return invalid("camera direction must be non-zero");
        }
        if Vec3::from_array(camera.up).length_squared() == 0.0 {
            return invalid("camera up vector must be non-zero");
        }

        if !(self.scene.model_scale > 0.0) {
            return invalid("scene model_scale must be positive");
        }

        Ok(())
    }
}
