use terravox_blocks::BlockError;

#[derive(Debug, Clone, PartialEq)]
pub enum TerrainError {
    Block(BlockError),
    InvalidDimensions(&'static str),
}

impl std::fmt::Display for TerrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerrainError::Block(e) => write!(f, "terrain rules: {}", e),
            TerrainError::InvalidDimensions(msg) => write!(f, "invalid world dimensions: {}", msg),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Block(e) => Some(e),
            TerrainError::InvalidDimensions(_) => None,
        }
    }
}

impl From<BlockError> for TerrainError {
    fn from(value: BlockError) -> Self {
        TerrainError::Block(value)
    }
}
