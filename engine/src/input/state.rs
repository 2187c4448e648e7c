//! Input state tracking

use std::collections::HashSet;
use tracing::trace;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks the current state of input devices
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Currently pressed keys
    pub keys_pressed: HashSet<KeyCode>,
    /// Raw mouse movement accumulated since the last frame
    pub mouse_delta: (f32, f32),
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame data (like mouse delta)
    pub fn clear_frame_data(&mut self) {
        self.mouse_delta = (0.0, 0.0);
    }

    /// Handle a keyboard event
    pub fn handle_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.set_key(key_code, event.state);
        }
    }

    /// Record a key transition
    pub fn set_key(&mut self, key_code: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_pressed.insert(key_code);
                trace!("Key pressed: {:?}", key_code);
            }
            ElementState::Released => {
                self.keys_pressed.remove(&key_code);
                trace!("Key released: {:?}", key_code);
            }
        }
    }

    /// Add mouse movement delta
    pub fn add_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
        trace!("Mouse delta: ({}, {})", dx, dy);
    }

    /// Check if a key is currently pressed
    pub fn is_key_pressed(&self, key_code: KeyCode) -> bool {
        self.keys_pressed.contains(&key_code)
    }

    /// Resolve the movement keys into per-axis directions
    pub fn movement(&self) -> MovementIntent {
        let axis = |negative: KeyCode, positive: KeyCode| -> f32 {
            match (self.is_key_pressed(negative), self.is_key_pressed(positive)) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            }
        };

        MovementIntent {
            strafe: axis(KeyCode::KeyA, KeyCode::KeyD),
            forward: axis(KeyCode::KeyS, KeyCode::KeyW),
            vertical: axis(KeyCode::ShiftLeft, KeyCode::Space),
        }
    }
}

/// Requested movement along each camera axis, each -1, 0 or 1
///
/// Holding both keys of an axis cancels it out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementIntent {
    /// Left (-1) / right (+1)
    pub strafe: f32,
    /// Back (-1) / forward (+1)
    pub forward: f32,
    /// Down (-1) / up (+1)
    pub vertical: f32,
}

impl MovementIntent {
    pub fn is_idle(&self) -> bool {
        self.strafe == 0.0 && self.forward == 0.0 && self.vertical == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state_keyboard() {
        let mut state = InputState::new();

        state.set_key(KeyCode::KeyW, ElementState::Pressed);
        assert!(state.is_key_pressed(KeyCode::KeyW));

        state.set_key(KeyCode::KeyW, ElementState::Released);
        assert!(!state.is_key_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_input_state_mouse() {
        let mut state = InputState::new();

        state.add_mouse_delta(5.0, -3.0);
        state.add_mouse_delta(1.0, 1.0);
        assert_eq!(state.mouse_delta, (6.0, -2.0));

        state.clear_frame_data();
        assert_eq!(state.mouse_delta, (0.0, 0.0));
    }

    #[test]
    fn test_movement_axes() {
        let mut state = InputState::new();
        assert!(state.movement().is_idle());

        state.set_key(KeyCode::KeyW, ElementState::Pressed);
        state.set_key(KeyCode::KeyA, ElementState::Pressed);
        state.set_key(KeyCode::ShiftLeft, ElementState::Pressed);
        assert_eq!(
            state.movement(),
            MovementIntent {
                strafe: -1.0,
                forward: 1.0,
                vertical: -1.0,
            }
        );
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut state = InputState::new();
        state.set_key(KeyCode::KeyA, ElementState::Pressed);
        state.set_key(KeyCode::KeyD, ElementState::Pressed);
        state.set_key(KeyCode::Space, ElementState::Pressed);
        let movement = state.movement();
        assert_eq!(movement.strafe, 0.0);
        assert_eq!(movement.vertical, 1.0);
    }
}
