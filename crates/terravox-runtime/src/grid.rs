use terravox_chunk::VoxelChunk;
use terravox_world::ChunkCoord;

/// Lifecycle of one grid coordinate. There is no terminal state: chunks are
/// never evicted once allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkState {
    Absent,
    AllocatedUnpopulated,
    ReadyActive,
    ReadyInactive,
}

/// Dense arena of chunk slots covering the whole square world, indexed by
/// coordinate.
pub struct ChunkGrid {
    width: usize,
    slots: Vec<Option<VoxelChunk>>,
}

impl ChunkGrid {
    pub fn new(width_in_chunks: usize) -> Self {
        let mut slots = Vec::with_capacity(width_in_chunks * width_in_chunks);
        slots.resize_with(width_in_chunks * width_in_chunks, || None);
        Self {
            width: width_in_chunks,
            slots,
        }
    }

    #[inline]
    fn index(&self, coord: ChunkCoord) -> Option<usize> {
        let w = self.width as i32;
        if coord.cx < 0 || coord.cz < 0 || coord.cx >= w || coord.cz >= w {
            return None;
        }
        Some(coord.cx as usize * self.width + coord.cz as usize)
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&VoxelChunk> {
        self.index(coord).and_then(|i| self.slots[i].as_ref())
    }

    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut VoxelChunk> {
        self.index(coord).and_then(|i| self.slots[i].as_mut())
    }

    /// Stores `chunk` in its coordinate's slot, replacing any previous
    /// occupant. Chunks outside the grid are handed back.
    pub fn insert(&mut self, chunk: VoxelChunk) -> Result<(), VoxelChunk> {
        match self.index(chunk.coord()) {
            Some(i) => {
                self.slots[i] = Some(chunk);
                Ok(())
            }
            None => Err(chunk),
        }
    }

    /// Detaches a chunk from its slot; the slot reads as absent until the
    /// chunk is inserted again.
    pub fn take(&mut self, coord: ChunkCoord) -> Option<VoxelChunk> {
        self.index(coord).and_then(|i| self.slots[i].take())
    }

    pub fn state(&self, coord: ChunkCoord) -> ChunkState {
        match self.get(coord) {
            None => ChunkState::Absent,
            Some(c) if !c.is_populated() => ChunkState::AllocatedUnpopulated,
            Some(c) if c.is_active() => ChunkState::ReadyActive,
            Some(_) => ChunkState::ReadyInactive,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoxelChunk> {
        self.slots.iter().flatten()
    }

    pub fn allocated(&self) -> usize {
        self.iter().count()
    }
}
