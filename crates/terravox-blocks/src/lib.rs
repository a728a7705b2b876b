//! Block types, face ordering, and the block catalog.
#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::{BlockCatalog, BlockType};
pub use error::BlockError;
pub use types::{AIR, BEDROCK, BlockId, Face, TextureId};
