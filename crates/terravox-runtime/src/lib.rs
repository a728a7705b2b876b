//! Chunk streaming, deferred construction, and edit routing for one world.
#![forbid(unsafe_code)]

mod build;
mod edit;
mod events;
mod grid;
mod streaming;
mod world;

pub use edit::EditOutcome;
pub use events::{ChunkEvent, EVENT_CAPACITY};
pub use grid::{ChunkGrid, ChunkState};
pub use streaming::ActivationDelta;
pub use world::{TickReport, World, WorldStats};
