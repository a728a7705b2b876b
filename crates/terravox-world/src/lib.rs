//! World sizing, noise sampling, and terrain rules.
#![forbid(unsafe_code)]

mod chunk_coord;
mod dims;
pub mod error;
pub mod noise;
pub mod terrain;
pub mod worldgen;

pub use chunk_coord::ChunkCoord;
pub use dims::WorldDims;
pub use error::TerrainError;
pub use noise::NoiseField;
pub use terrain::{Lode, TerrainRules};
pub use worldgen::{BlockRef, BuildPacing, LodeConfig, WorldGenConfig};
