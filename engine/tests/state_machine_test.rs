//! Game-state transitions and the playing state's controls

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use voxel_engine::config::ViewerConfig;
use voxel_engine::core::Camera;
use voxel_engine::graphics::{RenderMode, Renderer};
use voxel_engine::input::InputState;
use voxel_engine::state::{Game, GameEvent, GameState, StateManager, StatePlaying, UpdateResult};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

type Log = Rc<RefCell<Vec<String>>>;

/// Records lifecycle calls and returns a scripted update result
struct Recorder {
    name: &'static str,
    log: Log,
    next: Option<UpdateResult>,
}

impl Recorder {
    fn boxed(name: &'static str, log: &Log, next: Option<UpdateResult>) -> Box<dyn GameState> {
        Box::new(Self {
            name,
            log: log.clone(),
            next,
        })
    }
}

impl GameState for Recorder {
    fn entered(&mut self) {
        self.log.borrow_mut().push(format!("{} entered", self.name));
    }

    fn leaving(&mut self) {
        self.log.borrow_mut().push(format!("{} leaving", self.name));
    }

    fn update(
        &mut self,
        _events: &mut dyn Iterator<Item = GameEvent>,
        _elapsed: Duration,
        _input: &InputState,
    ) -> UpdateResult {
        self.log.borrow_mut().push(format!("{} update", self.name));
        self.next.take().unwrap_or(UpdateResult::None)
    }

    fn draw(
        &mut self,
        _renderer: &mut Renderer,
        _surface: &wgpu::Surface,
    ) -> Result<(), wgpu::SurfaceError> {
        Ok(())
    }
}

fn tick(game: &mut Game, events: Vec<GameEvent>, elapsed_ms: u64, input: &InputState) {
    game.update(
        &mut events.into_iter(),
        Duration::from_millis(elapsed_ms),
        input,
    );
}

fn tick_state(
    state: &mut StatePlaying,
    events: Vec<GameEvent>,
    elapsed_ms: u64,
    input: &InputState,
) -> UpdateResult {
    state.update(
        &mut events.into_iter(),
        Duration::from_millis(elapsed_ms),
        input,
    )
}

#[test]
fn test_start_state_is_entered() {
    let log = Log::default();
    let game = Game::new(Recorder::boxed("start", &log, None));

    assert!(game.is_running());
    assert_eq!(*log.borrow(), vec!["start entered"]);
}

#[test]
fn test_change_state_swaps_in_order() {
    let log = Log::default();
    let next = Recorder::boxed("next", &log, None);
    let mut game = Game::new(Recorder::boxed(
        "start",
        &log,
        Some(UpdateResult::ChangeState(next)),
    ));
    let input = InputState::new();

    tick(&mut game, vec![], 16, &input);
    tick(&mut game, vec![], 16, &input);

    assert!(game.is_running());
    assert_eq!(
        *log.borrow(),
        vec![
            "start entered",
            "start update",
            "start leaving",
            "next entered",
            "next update",
        ]
    );
}

#[test]
fn test_swap_state_returns_previous() {
    let log = Log::default();
    let mut game = Game::new(Recorder::boxed("a", &log, None));

    let mut previous = game.swap_state(Recorder::boxed("b", &log, None));
    previous.leaving();

    assert_eq!(
        *log.borrow(),
        vec!["a entered", "a leaving", "b entered", "a leaving"]
    );
}

#[test]
fn test_quit_stops_the_game() {
    let log = Log::default();
    let mut game = Game::new(Recorder::boxed("start", &log, Some(UpdateResult::Quit)));

    tick(&mut game, vec![], 16, &InputState::new());
    assert!(!game.is_running());
}

#[test]
fn test_escape_and_close_quit() {
    let config = ViewerConfig::default();
    let input = InputState::new();

    let mut state = StatePlaying::new(&config);
    let result = tick_state(&mut state, vec![GameEvent::KeyPressed(KeyCode::Escape)], 16, &input);
    assert!(matches!(result, UpdateResult::Quit));

    let mut state = StatePlaying::new(&config);
    let result = tick_state(&mut state, vec![GameEvent::CloseRequested], 16, &input);
    assert!(matches!(result, UpdateResult::Quit));
}

#[test]
fn test_f1_cycles_render_mode() {
    let mut state = StatePlaying::new(&ViewerConfig::default());
    let input = InputState::new();
    assert_eq!(state.render_mode(), RenderMode::Phong);

    let press = || vec![GameEvent::KeyPressed(KeyCode::F1)];
    tick_state(&mut state, press(), 16, &input);
    assert_eq!(state.render_mode(), RenderMode::Normals);
    tick_state(&mut state, press(), 16, &input);
    assert_eq!(state.render_mode(), RenderMode::Combined);
    tick_state(&mut state, press(), 16, &input);
    assert_eq!(state.render_mode(), RenderMode::Phong);
}

#[test]
fn test_held_key_moves_by_elapsed_time() {
    let config = ViewerConfig::default();
    let mut state = StatePlaying::new(&config);
    let start = *state.camera();

    let mut input = InputState::new();
    input.set_key(KeyCode::KeyW, ElementState::Pressed);
    tick_state(&mut state, vec![], 100, &input);

    let step = 100.0 * config.controls.motion_sensitivity;
    let expected = start.position + start.direction * step;
    assert!(state.camera().position.abs_diff_eq(expected, 1e-5));
    assert_eq!(state.camera().direction, start.direction);

    input.set_key(KeyCode::KeyW, ElementState::Released);
    input.set_key(KeyCode::Space, ElementState::Pressed);
    tick_state(&mut state, vec![], 100, &input);
    let risen = expected + start.up * step;
    assert!(state.camera().position.abs_diff_eq(risen, 1e-5));
}

#[test]
fn test_mouse_motion_turns_camera() {
    let mut state = StatePlaying::new(&ViewerConfig::default());
    let start = *state.camera();

    let mut input = InputState::new();
    input.add_mouse_delta(120.0, 0.0);
    tick_state(&mut state, vec![], 16, &input);

    assert_eq!(state.camera().position, start.position);
    assert!(!state.camera().direction.abs_diff_eq(start.direction, 1e-4));
    assert!((state.camera().direction.length() - 1.0).abs() < 1e-5);
}

#[test]
fn test_frame_uniforms_follow_camera() {
    let config = ViewerConfig::default();
    let state = StatePlaying::new(&config);
    let aspect = 16.0 / 9.0;

    let frame = state.frame_uniforms(aspect).unwrap();
    let model_view = state.camera().view_matrix() * config.scene.model_matrix();
    let perspective = config.camera.projection().matrix(aspect);

    assert_eq!(frame.phong.model_view, model_view.to_cols_array_2d());
    assert_eq!(frame.phong.perspective, perspective.to_cols_array_2d());
    assert_eq!(frame.normals.model, config.scene.model_matrix().to_cols_array_2d());
}

#[test]
fn test_default_state_meshes_full_chunk() {
    let state = StatePlaying::new(&ViewerConfig::default());
    assert_eq!(state.mesh().vertices.len(), 6 * 32 * 32 * 6);
}
