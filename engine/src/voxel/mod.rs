//! Voxel blocks and chunk meshing

pub mod block;
pub mod chunk;

pub use block::{Air, BlockType, Directions, SimpleBlock};
pub use chunk::{Chunk, CHUNK_SIZE};
