use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use terravox_blocks::{BlockCatalog, BlockError, BlockId};

/// Block reference in config: a catalog id or a block name.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum BlockRef {
    Id(BlockId),
    Name(String),
}

impl BlockRef {
    pub fn resolve(&self, catalog: &BlockCatalog) -> Result<BlockId, BlockError> {
        match self {
            BlockRef::Id(id) => catalog.get(*id).map(|_| *id),
            BlockRef::Name(name) => catalog.resolve_name(name),
        }
    }
}

impl From<&str> for BlockRef {
    fn from(value: &str) -> Self {
        BlockRef::Name(value.to_string())
    }
}

/// How queued chunk construction is spread over build steps.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BuildPacing {
    /// One queued chunk populated and meshed per step.
    #[default]
    OnePerTick,
    /// Up to `batch` queued chunks populated in parallel per step, then meshed in order.
    Parallel { batch: usize },
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub seed: i32,
    #[serde(default = "default_chunk_width")]
    pub chunk_width: usize,
    #[serde(default = "default_chunk_height")]
    pub chunk_height: usize,
    #[serde(default = "default_world_width")]
    pub world_width_in_chunks: usize,
    #[serde(default = "default_view_distance")]
    pub view_distance_in_chunks: i32,
    #[serde(default = "default_atlas_size")]
    pub atlas_size_in_tiles: u32,
    #[serde(default = "default_terrain_height")]
    pub terrain_height: f32,
    #[serde(default = "default_terrain_scale")]
    pub terrain_scale: f32,
    #[serde(default = "default_solid_ground_height")]
    pub solid_ground_height: i32,
    #[serde(default = "default_surface")]
    pub surface_block: BlockRef,
    #[serde(default = "default_subsurface")]
    pub subsurface_block: BlockRef,
    #[serde(default = "default_stone")]
    pub stone_block: BlockRef,
    #[serde(default)]
    pub build_pacing: BuildPacing,
    #[serde(default = "default_lodes")]
    pub lodes: Vec<LodeConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LodeConfig {
    #[serde(default)]
    pub name: String,
    pub block: BlockRef,
    pub min_height: i32,
    pub max_height: i32,
    #[serde(default = "default_lode_scale")]
    pub scale: f32,
    #[serde(default = "default_lode_threshold")]
    pub threshold: f32,
    #[serde(default)]
    pub noise_offset: f32,
}

fn default_chunk_width() -> usize {
    16
}
fn default_chunk_height() -> usize {
    128
}
fn default_world_width() -> usize {
    100
}
fn default_view_distance() -> i32 {
    5
}
fn default_atlas_size() -> u32 {
    4
}
fn default_terrain_height() -> f32 {
    42.0
}
fn default_terrain_scale() -> f32 {
    0.25
}
fn default_solid_ground_height() -> i32 {
    42
}
fn default_surface() -> BlockRef {
    "grass".into()
}
fn default_subsurface() -> BlockRef {
    "dirt".into()
}
fn default_stone() -> BlockRef {
    "stone".into()
}
fn default_lode_scale() -> f32 {
    0.1
}
fn default_lode_threshold() -> f32 {
    0.5
}

fn lode(name: &str, block: BlockRef, min: i32, max: i32, scale: f32, thr: f32, off: f32) -> LodeConfig {
    LodeConfig {
        name: name.to_string(),
        block,
        min_height: min,
        max_height: max,
        scale,
        threshold: thr,
        noise_offset: off,
    }
}

fn default_lodes() -> Vec<LodeConfig> {
    vec![
        lode("dirt", "dirt".into(), 1, 255, 0.1, 0.5, 0.0),
        lode("sand", "sand".into(), 30, 60, 0.2, 0.6, 500.0),
        lode("gravel", "gravel".into(), 10, 40, 0.15, 0.6, 800.0),
        lode("coal", "coal_ore".into(), 5, 50, 0.2, 0.62, 1200.0),
        lode("caves", BlockRef::Id(0), 5, 60, 0.1, 0.55, 43534.0),
    ]
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            chunk_width: default_chunk_width(),
            chunk_height: default_chunk_height(),
            world_width_in_chunks: default_world_width(),
            view_distance_in_chunks: default_view_distance(),
            atlas_size_in_tiles: default_atlas_size(),
            terrain_height: default_terrain_height(),
            terrain_scale: default_terrain_scale(),
            solid_ground_height: default_solid_ground_height(),
            surface_block: default_surface(),
            subsurface_block: default_subsurface(),
            stone_block: default_stone(),
            build_pacing: BuildPacing::default(),
            lodes: default_lodes(),
        }
    }
}

impl WorldGenConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
