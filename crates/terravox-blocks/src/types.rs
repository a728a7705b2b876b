/// Catalog index of a block type. Air is always `0`.
pub type BlockId = u8;

/// Tile index into the texture atlas.
pub type TextureId = u16;

pub const AIR: BlockId = 0;
pub const BEDROCK: BlockId = 1;

use crate::error::BlockError;

/// Cube face in emission order. Texture lookup is keyed by the same order,
/// so the discriminants must never be reordered.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    Back = 0,
    Front = 1,
    Top = 2,
    Bottom = 3,
    Left = 4,
    Right = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Back,
        Face::Front,
        Face::Top,
        Face::Bottom,
        Face::Left,
        Face::Right,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Result<Face, BlockError> {
        Face::ALL
            .get(i)
            .copied()
            .ok_or(BlockError::InvalidFaceIndex(i))
    }

    /// Integer grid step `(dx,dy,dz)` to the voxel on the other side of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::Back => (0, 0, -1),
            Face::Front => (0, 0, 1),
            Face::Top => (0, 1, 0),
            Face::Bottom => (0, -1, 0),
            Face::Left => (-1, 0, 0),
            Face::Right => (1, 0, 0),
        }
    }
}
