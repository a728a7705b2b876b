use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::config::BlocksConfig;
use crate::error::BlockError;
use crate::types::{BlockId, Face, TextureId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockType {
    pub name: String,
    pub solid: bool,
    /// Atlas tiles in face order (back, front, top, bottom, left, right).
    pub textures: [TextureId; 6],
}

impl BlockType {
    pub fn new(name: impl Into<String>, solid: bool, textures: [TextureId; 6]) -> Self {
        Self {
            name: name.into(),
            solid,
            textures,
        }
    }

    /// Same tile on every face.
    pub fn uniform(name: impl Into<String>, solid: bool, texture: TextureId) -> Self {
        Self::new(name, solid, [texture; 6])
    }

    #[inline]
    pub fn texture(&self, face: Face) -> TextureId {
        self.textures[face.index()]
    }
}

/// Ordered, immutable table of block types; a block id is its index.
#[derive(Clone, Debug)]
pub struct BlockCatalog {
    blocks: Vec<BlockType>,
    by_name: HashMap<String, BlockId>,
}

impl BlockCatalog {
    pub fn new(blocks: Vec<BlockType>) -> Result<Self, BlockError> {
        let first = blocks.first().ok_or(BlockError::MissingAir)?;
        if first.solid {
            return Err(BlockError::AirIsSolid);
        }
        if blocks.len() > usize::from(BlockId::MAX) + 1 {
            return Err(BlockError::TooManyBlocks(blocks.len()));
        }
        let mut by_name = HashMap::with_capacity(blocks.len());
        for (i, ty) in blocks.iter().enumerate() {
            if by_name.insert(ty.name.clone(), i as BlockId).is_some() {
                return Err(BlockError::DuplicateName(ty.name.clone()));
            }
        }
        Ok(Self { blocks, by_name })
    }

    pub fn from_configs(cfg: BlocksConfig) -> Result<Self, BlockError> {
        let blocks = cfg
            .blocks
            .into_iter()
            .map(|def| {
                let textures = def.textures.unwrap_or_default().resolve();
                BlockType::new(def.name, def.solid.unwrap_or(true), textures)
            })
            .collect();
        Self::new(blocks)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Ok(Self::from_configs(cfg)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Result<&BlockType, BlockError> {
        self.blocks
            .get(usize::from(id))
            .ok_or(BlockError::InvalidBlockId(id))
    }

    /// Atlas tile for `face_index` in `[0, 6)` of block `id`.
    pub fn face_texture(&self, id: BlockId, face_index: usize) -> Result<TextureId, BlockError> {
        let face = Face::from_index(face_index)?;
        Ok(self.get(id)?.texture(face))
    }

    /// Solidity of `id`. Unknown ids are logged and read as non-solid so that
    /// world queries stay total.
    #[inline]
    pub fn is_solid(&self, id: BlockId) -> bool {
        match self.get(id) {
            Ok(ty) => ty.solid,
            Err(e) => {
                log::error!("{}", e);
                false
            }
        }
    }

    pub fn contains(&self, id: BlockId) -> bool {
        usize::from(id) < self.blocks.len()
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn resolve_name(&self, name: &str) -> Result<BlockId, BlockError> {
        self.id_by_name(name)
            .ok_or_else(|| BlockError::UnknownBlockName(name.to_string()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Never true for a constructed catalog; air is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &BlockType)> {
        self.blocks.iter().enumerate().map(|(i, t)| (i as BlockId, t))
    }
}
