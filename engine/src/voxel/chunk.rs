//! Fixed-size block grid and its mesh builder

use super::block::{BlockType, Directions};
use crate::graphics::{Mesh, Vertex};
use tracing::debug;

/// Edge length of a chunk, in blocks
pub const CHUNK_SIZE: usize = 32;

/// Corner offsets of the two triangles of each face, counter-clockwise when
/// seen from outside the block.
const FACE_CORNERS: [(Directions, [[usize; 3]; 6]); 6] = [
    (
        Directions::LEFT,
        [[0, 0, 0], [0, 0, 1], [0, 1, 0], [0, 1, 0], [0, 0, 1], [0, 1, 1]],
    ),
    (
        Directions::RIGHT,
        [[1, 1, 0], [1, 0, 1], [1, 0, 0], [1, 1, 1], [1, 0, 1], [1, 1, 0]],
    ),
    (
        Directions::DOWN,
        [[1, 0, 0], [0, 0, 1], [0, 0, 0], [1, 0, 1], [0, 0, 1], [1, 0, 0]],
    ),
    (
        Directions::UP,
        [[0, 1, 0], [0, 1, 1], [1, 1, 0], [1, 1, 0], [0, 1, 1], [1, 1, 1]],
    ),
    (
        Directions::BACK,
        [[0, 0, 0], [0, 1, 0], [1, 0, 0], [1, 0, 0], [0, 1, 0], [1, 1, 0]],
    ),
    (
        Directions::FRONT,
        [[0, 0, 1], [1, 0, 1], [0, 1, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]],
    ),
];

/// A `CHUNK_SIZE`³ grid of borrowed block types
pub struct Chunk<'a> {
    blocks: Vec<&'a dyn BlockType>,
}

impl<'a> Chunk<'a> {
    /// Create a chunk where every cell holds `block`
    pub fn filled(block: &'a dyn BlockType) -> Self {
        Self {
            blocks: vec![block; CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE],
        }
    }

    fn index(x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_SIZE);
        (x * CHUNK_SIZE + y) * CHUNK_SIZE + z
    }

    /// Block at a cell. Panics if the coordinates are outside the chunk.
    pub fn get(&self, x: usize, y: usize, z: usize) -> &'a dyn BlockType {
        self.blocks[Self::index(x, y, z)]
    }

    /// Replace the block at a cell. Panics if the coordinates are outside the chunk.
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: &'a dyn BlockType) {
        self.blocks[Self::index(x, y, z)] = block;
    }

    /// Neighbour of a cell across `face`, `None` on the chunk boundary
    fn neighbour(&self, x: usize, y: usize, z: usize, face: Directions) -> Option<&'a dyn BlockType> {
        let last = CHUNK_SIZE - 1;
        let (nx, ny, nz) = if face == Directions::LEFT {
            (x.checked_sub(1)?, y, z)
        } else if face == Directions::RIGHT {
            ((x < last).then_some(x + 1)?, y, z)
        } else if face == Directions::DOWN {
            (x, y.checked_sub(1)?, z)
        } else if face == Directions::UP {
            (x, (y < last).then_some(y + 1)?, z)
        } else if face == Directions::BACK {
            (x, y, z.checked_sub(1)?)
        } else {
            (x, y, (z < last).then_some(z + 1)?)
        };
        Some(self.get(nx, ny, nz))
    }

    /// Whether the face of the block at a cell should be drawn
    ///
    /// Faces on the chunk boundary are always visible. Interior faces are
    /// visible unless the neighbour obscures the side it shares with this block.
    pub fn face_visible(&self, x: usize, y: usize, z: usize, face: Directions) -> bool {
        match self.neighbour(x, y, z, face) {
            None => true,
            Some(neighbour) => !neighbour.obscures().contains(face.opposite()),
        }
    }

    /// Build a triangle-list mesh of every visible face
    pub fn build_mesh(&self) -> Mesh {
        let mut vertices = Vec::new();

        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for z in 0..CHUNK_SIZE {
                    let block = self.get(x, y, z);
                    if !block.should_render() {
                        continue;
                    }
                    let color = block.color();

                    for (face, corners) in &FACE_CORNERS {
                        if !self.face_visible(x, y, z, *face) {
                            continue;
                        }
                        let normal = face.normal().unwrap_or_default();
                        vertices.extend(corners.iter().map(|[dx, dy, dz]| {
                            Vertex::new(
                                [(x + dx) as f32, (y + dy) as f32, (z + dz) as f32],
                                normal,
                                color,
                            )
                        }));
                    }
                }
            }
        }

        debug!(
            vertices = vertices.len(),
            faces = vertices.len() / 6,
            "Built chunk mesh"
        );
        Mesh::new(vertices)
    }
}
