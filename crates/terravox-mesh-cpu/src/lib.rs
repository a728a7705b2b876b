//! CPU-side cube geometry: face tables, atlas UVs, and mesh buffers.
#![forbid(unsafe_code)]

mod atlas;
mod cube;
mod mesh_build;

pub use atlas::AtlasLayout;
pub use cube::{FACE_CORNERS, VOXEL_CORNERS, face_corners};
pub use mesh_build::{MeshBuild, MeshBuildOutput};
