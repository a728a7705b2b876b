//! Chunk voxel storage, face-culled meshing, and the world lookup seam.
#![forbid(unsafe_code)]

mod chunk;
mod context;
mod error;
mod mesher;

pub use chunk::VoxelChunk;
pub use context::{TerrainContext, VoxelContext};
pub use error::ChunkError;
pub use mesher::build_chunk_mesh;
