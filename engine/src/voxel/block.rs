//! Block types and face directions

use bitflags::bitflags;

bitflags! {
    /// Set of cube face directions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Directions: u8 {
        /// +Z
        const FRONT = 0b0000_0001;
        /// +Y
        const UP    = 0b0000_0010;
        /// +X
        const RIGHT = 0b0000_0100;
        /// -Z
        const BACK  = 0b0000_1000;
        /// -Y
        const DOWN  = 0b0001_0000;
        /// -X
        const LEFT  = 0b0010_0000;
    }
}

impl Directions {
    /// The six single directions, in face emission order
    pub const FACES: [Directions; 6] = [
        Directions::LEFT,
        Directions::RIGHT,
        Directions::DOWN,
        Directions::UP,
        Directions::BACK,
        Directions::FRONT,
    ];

    /// Mirror every direction in the set
    pub fn opposite(self) -> Self {
        let mut mirrored = Directions::empty();
        for (from, to) in [
            (Directions::FRONT, Directions::BACK),
            (Directions::BACK, Directions::FRONT),
            (Directions::UP, Directions::DOWN),
            (Directions::DOWN, Directions::UP),
            (Directions::RIGHT, Directions::LEFT),
            (Directions::LEFT, Directions::RIGHT),
        ] {
            if self.contains(from) {
                mirrored |= to;
            }
        }
        mirrored
    }

    /// Unit normal of a single direction, `None` for empty or combined sets
    pub fn normal(self) -> Option<[f32; 3]> {
        const NORMALS: [(Directions, [f32; 3]); 6] = [
            (Directions::FRONT, [0.0, 0.0, 1.0]),
            (Directions::UP, [0.0, 1.0, 0.0]),
            (Directions::RIGHT, [1.0, 0.0, 0.0]),
            (Directions::BACK, [0.0, 0.0, -1.0]),
            (Directions::DOWN, [0.0, -1.0, 0.0]),
            (Directions::LEFT, [-1.0, 0.0, 0.0]),
        ];
        NORMALS
            .iter()
            .find(|(direction, _)| *direction == self)
            .map(|(_, normal)| *normal)
    }
}

/// Behaviour shared by every kind of block
pub trait BlockType {
    /// Base color used for all faces
    fn color(&self) -> [f32; 3];
    /// Sides through which this block hides its neighbours' faces
    fn obscures(&self) -> Directions;
    /// Whether the block produces any geometry
    fn should_render(&self) -> bool;
}

/// Opaque single-colored block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleBlock {
    pub color: [f32; 3],
}

impl BlockType for SimpleBlock {
    fn color(&self) -> [f32; 3] {
        self.color
    }

    fn obscures(&self) -> Directions {
        Directions::all()
    }

    fn should_render(&self) -> bool {
        true
    }
}

/// Empty space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Air;

impl BlockType for Air {
    fn color(&self) -> [f32; 3] {
        [0.0, 0.0, 0.0]
    }

    fn obscures(&self) -> Directions {
        Directions::empty()
    }

    fn should_render(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Directions::UP.opposite(), Directions::DOWN);
        assert_eq!(Directions::LEFT.opposite(), Directions::RIGHT);
        assert_eq!(
            (Directions::FRONT | Directions::RIGHT).opposite(),
            Directions::BACK | Directions::LEFT
        );
        assert_eq!(Directions::all().opposite(), Directions::all());
    }

    #[test]
    fn test_normals_point_outward() {
        for face in Directions::FACES {
            let normal = face.normal().unwrap();
            let opposite = face.opposite().normal().unwrap();
            assert_eq!(normal.map(|c| -c), opposite);
        }
        assert_eq!((Directions::UP | Directions::DOWN).normal(), None);
    }

    #[test]
    fn test_block_visibility() {
        let block = SimpleBlock {
            color: [0.0, 0.8, 0.0],
        };
        assert!(block.should_render());
        assert_eq!(block.obscures(), Directions::all());
        assert!(!Air.should_render());
        assert!(Air.obscures().is_empty());
    }
}
