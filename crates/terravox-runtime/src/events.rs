use terravox_world::ChunkCoord;

/// Events a subscriber may leave unread before newer ones are dropped.
pub const EVENT_CAPACITY: usize = 4096;

/// Notifications for the renderer. Geometry itself is pulled with
/// `World::mesh`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChunkEvent {
    /// A new mesh was installed; `version` is the chunk's mesh version.
    Meshed { coord: ChunkCoord, version: u64 },
    Activated(ChunkCoord),
    Deactivated(ChunkCoord),
}
