use rayon::prelude::*;
use terravox_chunk::{ChunkError, VoxelChunk};
use terravox_world::{BuildPacing, ChunkCoord};

use crate::events::ChunkEvent;
use crate::world::World;

impl World {
    /// Drains the build queue by the configured pacing. Returns the
    /// coordinates built, in queue order.
    pub fn run_build_step(&mut self) -> Result<Vec<ChunkCoord>, ChunkError> {
        let batch = match self.pacing {
            BuildPacing::OnePerTick => 1,
            BuildPacing::Parallel { batch } => batch.max(1),
        };
        let mut coords = Vec::with_capacity(batch);
        while coords.len() < batch {
            let Some(coord) = self.build_queue.pop_front() else {
                break;
            };
            if self.grid.get(coord).is_some_and(|c| !c.is_populated()) {
                coords.push(coord);
            }
        }
        if coords.is_empty() {
            return Ok(coords);
        }
        self.populate_chunks(&coords);
        for &coord in &coords {
            self.remesh(coord)?;
        }
        Ok(coords)
    }

    /// Builds every valid chunk around the spawn point before the first
    /// tick and makes them the active set.
    pub fn generate_spawn_area(&mut self) -> Result<Vec<ChunkCoord>, ChunkError> {
        let center = self.world_to_chunk_coord(self.spawn_position());
        let coords = self.view_square(center);
        let (w, h) = (self.dims.chunk_width, self.dims.chunk_height);
        for &coord in &coords {
            if self.grid.get(coord).is_none() {
                // view_square only yields interior coordinates, which always have a slot.
                let _ = self.grid.insert(VoxelChunk::new(coord, w, h));
            }
        }
        let pending: Vec<ChunkCoord> = coords
            .iter()
            .copied()
            .filter(|&c| self.grid.get(c).is_some_and(|ch| !ch.is_populated()))
            .collect();
        self.populate_chunks(&pending);
        self.build_queue.retain(|c| !pending.contains(c));
        for &coord in &pending {
            self.remesh(coord)?;
        }
        for &coord in &coords {
            if let Some(chunk) = self.grid.get_mut(coord) {
                chunk.set_active(true);
            }
            if self.active.insert(coord) {
                self.emit(ChunkEvent::Activated(coord));
            }
        }
        self.last_observer_chunk = Some(center);
        log::info!(
            target: "streaming",
            "spawn area around {}: {} chunks built",
            center,
            pending.len()
        );
        Ok(pending)
    }

    /// Populates the given chunks on the rayon pool. Chunks are detached from
    /// the grid while they fill, so no reader sees a partial array.
    pub(crate) fn populate_chunks(&mut self, coords: &[ChunkCoord]) {
        let mut chunks: Vec<VoxelChunk> = coords.iter().filter_map(|&c| self.grid.take(c)).collect();
        let rules = &self.rules;
        chunks.par_iter_mut().for_each(|chunk| chunk.populate(rules));
        for chunk in chunks {
            log::debug!(target: "streaming", "populated {}", chunk.coord());
            let _ = self.grid.insert(chunk);
        }
    }

    /// Rebuilds and installs the mesh of a populated chunk. Absent or
    /// unpopulated chunks are skipped and yield `None`.
    pub(crate) fn remesh(&mut self, coord: ChunkCoord) -> Result<Option<u64>, ChunkError> {
        let mesh = match self.grid.get(coord) {
            Some(chunk) if chunk.is_populated() => chunk.build_mesh(&*self)?,
            _ => return Ok(None),
        };
        let Some(chunk) = self.grid.get_mut(coord) else {
            return Ok(None);
        };
        let faces = mesh.vertex_count() / 4;
        let version = chunk.install_mesh(mesh);
        log::debug!(
            target: "streaming",
            "meshed {} v{} ({} faces)",
            coord,
            version,
            faces
        );
        self.emit(ChunkEvent::Meshed { coord, version });
        Ok(Some(version))
    }
}
