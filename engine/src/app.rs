//! Application management for the viewer

use crate::config::ViewerConfig;
use crate::error::EngineError;
use crate::graphics::{RenderContext, Renderer};
use crate::input::InputState;
use crate::state::{Game, GameEvent, StateManager, StatePlaying};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

/// Window, surface and GPU objects, created once the event loop is running
struct Graphics {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    render_context: Arc<RenderContext>,
    renderer: Renderer,
}

/// Main viewer application struct that implements ApplicationHandler
pub struct ViewerApp {
    config: ViewerConfig,
    graphics: Option<Graphics>,
    game: Game,
    input_state: InputState,
    pending_events: Vec<GameEvent>,
    last_frame: Instant,
    /// First fatal error, reported after the event loop exits
    fatal_error: Option<EngineError>,
}

impl ViewerApp {
    /// Create the app with a playing state built from `config`
    pub fn new(config: ViewerConfig) -> Self {
        info!(title = %config.window.title, "Creating ViewerApp");
        let game = Game::new(Box::new(StatePlaying::new(&config)));

        Self {
            config,
            graphics: None,
            game,
            input_state: InputState::new(),
            pending_events: Vec::new(),
            last_frame: Instant::now(),
            fatal_error: None,
        }
    }

    /// Run the event loop until the game stops
    pub fn run(mut self) -> Result<(), EngineError> {
        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)?;
        match self.fatal_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics, EngineError> {
        let window_attributes = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let render_context =
            Arc::new(pollster::block_on(RenderContext::new(&instance, &surface))?);

        let size = window.inner_size();
        let surface_config =
            render_context.surface_configuration(&surface, size.width, size.height)?;
        surface.configure(&render_context.device, &surface_config);

        let renderer = Renderer::new(render_context.clone(), surface_config.format, size);

        grab_cursor(&window);

        Ok(Graphics {
            window,
            surface,
            surface_config,
            render_context,
            renderer,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: EngineError) {
        error!(error = %err, "Fatal error");
        self.fatal_error.get_or_insert(err);
        event_loop.exit();
    }

    fn handle_resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        let Some(graphics) = &mut self.graphics else {
            return;
        };

        info!("Window resized to {:?}", new_size);
        graphics.surface_config.width = new_size.width;
        graphics.surface_config.height = new_size.height;
        graphics
            .surface
            .configure(&graphics.render_context.device, &graphics.surface_config);
        graphics.renderer.resize(new_size);
    }

    /// Advance the game and draw a frame
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;

        self.game
            .update(&mut self.pending_events.drain(..), elapsed, &self.input_state);
        self.input_state.clear_frame_data();

        if !self.game.is_running() {
            event_loop.exit();
            return;
        }

        let Some(graphics) = &mut self.graphics else {
            return;
        };

        let size = graphics.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }

        match self.game.draw(&mut graphics.renderer, &graphics.surface) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                info!("Surface lost or outdated, reconfiguring");
                graphics
                    .surface
                    .configure(&graphics.render_context.device, &graphics.surface_config);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => {
                error!(error = ?e, "Render error");
            }
        }
    }
}

fn grab_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(e) = grabbed {
        warn!(error = %e, "Could not grab the cursor");
    }
    window.set_cursor_visible(false);
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                info!("Graphics initialized");
                self.graphics = Some(graphics);
                self.last_frame = Instant::now();
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Window close requested");
                self.pending_events.push(GameEvent::CloseRequested);
            }
            WindowEvent::Resized(physical_size) => {
                self.handle_resize(physical_size);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                info!("Scale factor changed to {}", scale_factor);
                if let Some(graphics) = &self.graphics {
                    let new_size = graphics.window.inner_size();
                    self.handle_resize(new_size);
                }
            }
            WindowEvent::Focused(focused) => {
                debug!(focused, "Window focus changed");
                if focused {
                    if let Some(graphics) = &self.graphics {
                        grab_cursor(&graphics.window);
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.input_state.handle_keyboard_event(&event);
                if let (ElementState::Pressed, false, PhysicalKey::Code(key)) =
                    (event.state, event.repeat, event.physical_key)
                {
                    self.pending_events.push(GameEvent::KeyPressed(key));
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.input_state.add_mouse_delta(dx as f32, dy as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Request redraw for continuous rendering
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }
}
