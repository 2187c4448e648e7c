//! Core scene types

pub mod camera;

pub use camera::{Camera, Projection, SimpleCamera};
