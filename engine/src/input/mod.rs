//! Keyboard and mouse input

pub mod state;

pub use state::{InputState, MovementIntent};
