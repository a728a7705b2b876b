use terravox_blocks::{AIR, BEDROCK, BlockCatalog, BlockId};

use crate::dims::WorldDims;
use crate::error::TerrainError;
use crate::noise::NoiseField;
use crate::worldgen::WorldGenConfig;

const SUBSURFACE_DEPTH: i32 = 4;

/// Noise-gated rule that overrides stone with `block` inside a height band.
#[derive(Clone, Debug, PartialEq)]
pub struct Lode {
    pub name: String,
    pub block: BlockId,
    pub min_height: i32,
    pub max_height: i32,
    pub scale: f32,
    pub threshold: f32,
    pub noise_offset: f32,
}

/// Biome parameters plus ordered lodes, compiled against a block catalog.
///
/// `block_id_at` is a pure function of its coordinates: every chunk that asks
/// about the same voxel gets the same answer, which is what lets neighbors
/// agree on shared boundaries without sharing state.
pub struct TerrainRules {
    dims: WorldDims,
    noise: NoiseField,
    base_height: f32,
    terrain_scale: f32,
    solid_ground_height: i32,
    surface: BlockId,
    subsurface: BlockId,
    stone: BlockId,
    lodes: Vec<Lode>,
}

impl TerrainRules {
    pub fn compile(cfg: &WorldGenConfig, catalog: &BlockCatalog) -> Result<Self, TerrainError> {
        if cfg.chunk_width == 0 {
            return Err(TerrainError::InvalidDimensions("chunk_width must be positive"));
        }
        if cfg.chunk_height == 0 {
            return Err(TerrainError::InvalidDimensions("chunk_height must be positive"));
        }
        if cfg.world_width_in_chunks == 0 {
            return Err(TerrainError::InvalidDimensions(
                "world_width_in_chunks must be positive",
            ));
        }
        if cfg.atlas_size_in_tiles == 0 {
            return Err(TerrainError::InvalidDimensions(
                "atlas_size_in_tiles must be positive",
            ));
        }
        catalog.get(BEDROCK)?;
        let surface = cfg.surface_block.resolve(catalog)?;
        let subsurface = cfg.subsurface_block.resolve(catalog)?;
        let stone = cfg.stone_block.resolve(catalog)?;
        let mut lodes = Vec::with_capacity(cfg.lodes.len());
        for def in &cfg.lodes {
            let block = def.block.resolve(catalog)?;
            log::debug!(
                target: "worldgen",
                "lode `{}` -> block {} in ({}, {})",
                def.name,
                block,
                def.min_height,
                def.max_height
            );
            lodes.push(Lode {
                name: def.name.clone(),
                block,
                min_height: def.min_height,
                max_height: def.max_height,
                scale: def.scale,
                threshold: def.threshold,
                noise_offset: def.noise_offset,
            });
        }
        Ok(Self {
            dims: WorldDims {
                chunk_width: cfg.chunk_width,
                chunk_height: cfg.chunk_height,
                world_width_in_chunks: cfg.world_width_in_chunks,
            },
            noise: NoiseField::new(cfg.seed, cfg.chunk_width),
            base_height: cfg.terrain_height,
            terrain_scale: cfg.terrain_scale,
            solid_ground_height: cfg.solid_ground_height,
            surface,
            subsurface,
            stone,
            lodes,
        })
    }

    #[inline]
    pub fn dims(&self) -> WorldDims {
        self.dims
    }

    pub fn lodes(&self) -> &[Lode] {
        &self.lodes
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Surface height of the column at `(x, z)`.
    pub fn terrain_height(&self, x: i32, z: i32) -> i32 {
        let n = self
            .noise
            .sample_2d(x as f32, z as f32, 0.0, self.terrain_scale);
        (self.base_height * n).floor() as i32 + self.solid_ground_height
    }

    pub fn block_id_at(&self, x: i32, y: i32, z: i32) -> BlockId {
        if !self.dims.contains_voxel(x, y, z) {
            return AIR;
        }
        if y == 0 {
            return BEDROCK;
        }

        let height = self.terrain_height(x, z);
        if y == height {
            return self.surface;
        }
        if y > height {
            return AIR;
        }
        if y > height - SUBSURFACE_DEPTH {
            return self.subsurface;
        }

        let mut id = self.stone;
        let (fx, fy, fz) = (x as f32, y as f32, z as f32);
        for lode in &self.lodes {
            if y > lode.min_height
                && y < lode.max_height
                && self
                    .noise
                    .sample_3d(fx, fy, fz, lode.noise_offset, lode.scale, lode.threshold)
            {
                id = lode.block;
            }
        }
        id
    }
}
