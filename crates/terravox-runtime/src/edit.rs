use terravox_blocks::BlockId;
use terravox_chunk::ChunkError;
use terravox_geom::Vec3;
use terravox_world::ChunkCoord;

use crate::events::ChunkEvent;
use crate::world::World;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The voxel was written; `remeshed` lists the owning chunk first, then
    /// every populated boundary neighbor that was rebuilt.
    Applied {
        coord: ChunkCoord,
        remeshed: Vec<ChunkCoord>,
    },
    OutOfWorld,
    /// The owning chunk is absent or not yet populated.
    ChunkNotReady(ChunkCoord),
}

impl World {
    /// Sets the voxel containing `pos` to `id` and remeshes the owning chunk
    /// plus the neighbors that share the voxel's boundary before returning.
    pub fn request_edit(&mut self, pos: Vec3, id: BlockId) -> Result<EditOutcome, ChunkError> {
        self.catalog.get(id)?;
        let (x, y, z) = pos.voxel();
        if !self.dims.contains_voxel(x, y, z) {
            log::warn!(target: "edits", "edit at ({}, {}, {}) is outside the world", x, y, z);
            return Ok(EditOutcome::OutOfWorld);
        }
        let coord = self.dims.chunk_of_voxel(x, z);
        if !self.is_chunk_in_world(coord) {
            log::warn!(target: "edits", "edit at ({}, {}, {}) falls on the world rim", x, y, z);
            return Ok(EditOutcome::OutOfWorld);
        }
        if !self.grid.get(coord).is_some_and(|c| c.is_populated()) {
            log::warn!(target: "edits", "edit in chunk {} ignored: chunk not built", coord);
            return Ok(EditOutcome::ChunkNotReady(coord));
        }
        let Some(mut chunk) = self.grid.take(coord) else {
            return Ok(EditOutcome::ChunkNotReady(coord));
        };
        let (lx, lz) = self.dims.local_of_voxel(x, z);
        // Detached, the chunk only asks the world about voxels outside itself.
        let result = chunk.edit_voxel(&*self, lx, y as usize, lz, id);
        let version = chunk.mesh_version();
        let _ = self.grid.insert(chunk);
        let neighbors = result?;
        self.emit(ChunkEvent::Meshed { coord, version });

        let mut remeshed = vec![coord];
        for n in neighbors {
            if self.remesh(n)?.is_some() {
                remeshed.push(n);
            }
        }
        log::info!(
            target: "edits",
            "set ({}, {}, {}) to {} in {}; remeshed {:?}",
            x,
            y,
            z,
            id,
            coord,
            remeshed
        );
        Ok(EditOutcome::Applied { coord, remeshed })
    }
}
