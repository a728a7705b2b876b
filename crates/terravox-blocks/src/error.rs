use crate::types::BlockId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    InvalidBlockId(BlockId),
    InvalidFaceIndex(usize),
    MissingAir,
    AirIsSolid,
    TooManyBlocks(usize),
    DuplicateName(String),
    UnknownBlockName(String),
}

impl std::fmt::Display for BlockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockError::InvalidBlockId(id) => write!(f, "invalid block id {}", id),
            BlockError::InvalidFaceIndex(i) => write!(f, "invalid face index {} (expected 0..6)", i),
            BlockError::MissingAir => write!(f, "block catalog is empty; index 0 must be air"),
            BlockError::AirIsSolid => write!(f, "block 0 is reserved for air and must not be solid"),
            BlockError::TooManyBlocks(n) => {
                write!(f, "block catalog has {} entries; at most 256 fit a block id", n)
            }
            BlockError::DuplicateName(name) => write!(f, "duplicate block name `{}`", name),
            BlockError::UnknownBlockName(name) => write!(f, "unknown block `{}`", name),
        }
    }
}

impl std::error::Error for BlockError {}
