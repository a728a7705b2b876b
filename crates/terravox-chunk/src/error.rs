use terravox_blocks::BlockError;
use terravox_world::ChunkCoord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// Meshing or editing was attempted before `populate` ran.
    NotPopulated(ChunkCoord),
    LocalOutOfBounds { x: usize, y: usize, z: usize },
    Block(BlockError),
}

impl std::fmt::Display for ChunkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkError::NotPopulated(c) => write!(f, "chunk {} is not populated", c),
            ChunkError::LocalOutOfBounds { x, y, z } => {
                write!(f, "local voxel ({}, {}, {}) is outside the chunk", x, y, z)
            }
            ChunkError::Block(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ChunkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChunkError::Block(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BlockError> for ChunkError {
    fn from(e: BlockError) -> Self {
        ChunkError::Block(e)
    }
}
