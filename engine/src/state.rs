//! Game-state machine
//!
//! A [`Game`] owns exactly one active [`GameState`]. States react to input,
//! draw themselves, and can hand control to another state or ask to quit.

use crate::config::ViewerConfig;
use crate::core::camera::{Camera, Projection, SimpleCamera};
use crate::graphics::{FrameUniforms, GpuMesh, Mesh, RenderMode, Renderer};
use crate::input::InputState;
use crate::voxel::{Chunk, SimpleBlock};
use glam::{Mat4, Vec3};
use std::time::Duration;
use tracing::{debug, info, warn};
use winit::keyboard::KeyCode;

/// Discrete events delivered to the active state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The window was asked to close
    CloseRequested,
    /// A key went down (repeats are filtered out)
    KeyPressed(KeyCode),
}

/// What the active state wants after an update
pub enum UpdateResult {
    None,
    Quit,
    ChangeState(Box<dyn GameState>),
}

impl std::fmt::Debug for UpdateResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateResult::None => write!(f, "None"),
            UpdateResult::Quit => write!(f, "Quit"),
            UpdateResult::ChangeState(_) => write!(f, "ChangeState(..)"),
        }
    }
}

/// One screen or mode of the application
pub trait GameState {
    /// Called when the state becomes active
    fn entered(&mut self) {}

    /// Called just before the state is replaced
    fn leaving(&mut self) {}

    /// Advance the state by `elapsed`
    fn update(
        &mut self,
        events: &mut dyn Iterator<Item = GameEvent>,
        elapsed: Duration,
        input: &InputState,
    ) -> UpdateResult;

    /// Draw the state to a surface
    fn draw(
        &mut self,
        renderer: &mut Renderer,
        surface: &wgpu::Surface,
    ) -> Result<(), wgpu::SurfaceError>;
}

/// Owner of the active state
pub trait StateManager {
    /// Replace the active state, returning the previous one
    fn swap_state(&mut self, state: Box<dyn GameState>) -> Box<dyn GameState>;

    fn update(
        &mut self,
        events: &mut dyn Iterator<Item = GameEvent>,
        elapsed: Duration,
        input: &InputState,
    );

    fn draw(
        &mut self,
        renderer: &mut Renderer,
        surface: &wgpu::Surface,
    ) -> Result<(), wgpu::SurfaceError>;
}

/// Top-level state machine
pub struct Game {
    state: Box<dyn GameState>,
    running: bool,
}

impl Game {
    /// Start the game in `start_state`
    pub fn new(mut start_state: Box<dyn GameState>) -> Self {
        start_state.entered();
        Self {
            state: start_state,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        info!("Game quitting");
        self.running = false;
    }
}

impl StateManager for Game {
    fn swap_state(&mut self, state: Box<dyn GameState>) -> Box<dyn GameState> {
        self.state.leaving();
        let old_state = std::mem::replace(&mut self.state, state);
        self.state.entered();
        debug!("Swapped game state");
        old_state
    }

    fn update(
        &mut self,
        events: &mut dyn Iterator<Item = GameEvent>,
        elapsed: Duration,
        input: &InputState,
    ) {
        match self.state.update(events, elapsed, input) {
            UpdateResult::ChangeState(new_state) => {
                self.swap_state(new_state);
            }
            UpdateResult::Quit => self.quit(),
            UpdateResult::None => {}
        }
    }

    fn draw(
        &mut self,
        renderer: &mut Renderer,
        surface: &wgpu::Surface,
    ) -> Result<(), wgpu::SurfaceError> {
        self.state.draw(renderer, surface)
    }
}

/// Free-flying view of a single chunk
pub struct StatePlaying {
    camera: SimpleCamera,
    projection: Projection,
    model: Mat4,
    light: Vec3,
    mouse_sensitivity: f32,
    motion_sensitivity: f32,
    render_mode: RenderMode,
    mesh: Mesh,
    gpu_mesh: Option<GpuMesh>,
}

impl StatePlaying {
    /// Build the playing state and mesh a chunk filled with the configured block
    pub fn new(config: &ViewerConfig) -> Self {
        let block = SimpleBlock {
            color: config.scene.block_color,
        };
        let mesh = Chunk::filled(&block).build_mesh();

        Self {
            camera: config.camera.camera(),
            projection: config.camera.projection(),
            model: config.scene.model_matrix(),
            light: config.scene.light(),
            mouse_sensitivity: config.controls.mouse_sensitivity,
            motion_sensitivity: config.controls.motion_sensitivity,
            render_mode: config.render_mode,
            mesh,
            gpu_mesh: None,
        }
    }

    pub fn camera(&self) -> &SimpleCamera {
        &self.camera
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Uniforms for a frame drawn at `aspect_ratio`
    pub fn frame_uniforms(
        &self,
        aspect_ratio: f32,
    ) -> Result<FrameUniforms, crate::error::ShadingError> {
        FrameUniforms::new(
            self.model,
            self.camera.view_matrix(),
            self.projection.matrix(aspect_ratio),
            self.light,
        )
    }
}

impl GameState for StatePlaying {
    fn entered(&mut self) {
        info!(
            triangles = self.mesh.triangle_count(),
            mode = ?self.render_mode,
            "Entered playing state"
        );
    }

    fn leaving(&mut self) {
        self.gpu_mesh = None;
    }

    fn update(
        &mut self,
        events: &mut dyn Iterator<Item = GameEvent>,
        elapsed: Duration,
        input: &InputState,
    ) -> UpdateResult {
        for event in events {
            match event {
                GameEvent::CloseRequested | GameEvent::KeyPressed(KeyCode::Escape) => {
                    return UpdateResult::Quit;
                }
                GameEvent::KeyPressed(KeyCode::F1) => {
                    self.render_mode = self.render_mode.next();
                    info!(mode = ?self.render_mode, "Render mode changed");
                }
                GameEvent::KeyPressed(_) => {}
            }
        }

        let (dx, dy) = input.mouse_delta;
        if dx != 0.0 || dy != 0.0 {
            self.camera.look(dx, dy, self.mouse_sensitivity);
        }

        let movement = input.movement();
        if !movement.is_idle() {
            let step = elapsed.as_secs_f32() * 1000.0 * self.motion_sensitivity;
            self.camera.strafe(movement.strafe * step);
            self.camera.advance(movement.forward * step);
            self.camera.rise(movement.vertical * step);
        }

        UpdateResult::None
    }

    fn draw(
        &mut self,
        renderer: &mut Renderer,
        surface: &wgpu::Surface,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.frame_uniforms(renderer.aspect_ratio()) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "Skipping frame");
                return Ok(());
            }
        };

        let gpu_mesh = self
            .gpu_mesh
            .get_or_insert_with(|| renderer.upload_mesh(&self.mesh, "Chunk"));

        renderer.render(surface, gpu_mesh, &frame, self.render_mode)
    }
}
