use hashbrown::HashSet;
use terravox_chunk::VoxelChunk;
use terravox_geom::Vec3;
use terravox_world::ChunkCoord;

use crate::events::ChunkEvent;
use crate::world::World;

/// Changes made by one `refresh_active_set`, each list in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivationDelta {
    pub activated: Vec<ChunkCoord>,
    pub deactivated: Vec<ChunkCoord>,
    /// Newly allocated coordinates pushed onto the build queue.
    pub queued: Vec<ChunkCoord>,
}

impl World {
    /// Valid coordinates within the view distance of `center` on both axes.
    pub fn view_square(&self, center: ChunkCoord) -> Vec<ChunkCoord> {
        let r = self.view_distance;
        let mut out = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
        for cx in center.cx - r..=center.cx + r {
            for cz in center.cz - r..=center.cz + r {
                let c = ChunkCoord::new(cx, cz);
                if self.is_chunk_in_world(c) {
                    out.push(c);
                }
            }
        }
        out
    }

    /// Recomputes the active set from scratch around the observer's chunk.
    /// Absent coordinates are allocated and queued; inactive ones are
    /// reactivated; active ones that fell out of range are deactivated.
    pub fn refresh_active_set(&mut self, observer: Vec3) -> ActivationDelta {
        let center = self.world_to_chunk_coord(observer);
        let wanted = self.view_square(center);
        let (w, h) = (self.dims.chunk_width, self.dims.chunk_height);
        let mut delta = ActivationDelta::default();
        let mut next: HashSet<ChunkCoord> = HashSet::with_capacity(wanted.len());

        for coord in wanted {
            next.insert(coord);
            match self.grid.get_mut(coord) {
                None => {
                    if self.grid.insert(VoxelChunk::new(coord, w, h)).is_ok() {
                        self.build_queue.push_back(coord);
                        delta.queued.push(coord);
                        delta.activated.push(coord);
                    }
                }
                Some(chunk) if !chunk.is_active() => {
                    chunk.set_active(true);
                    delta.activated.push(coord);
                }
                Some(_) => {}
            }
        }

        for &coord in self.active.iter() {
            if next.contains(&coord) {
                continue;
            }
            if let Some(chunk) = self.grid.get_mut(coord) {
                chunk.set_active(false);
            }
            delta.deactivated.push(coord);
        }
        self.active = next;
        self.last_observer_chunk = Some(center);

        delta.activated.sort();
        delta.deactivated.sort();
        for &c in &delta.activated {
            self.emit(ChunkEvent::Activated(c));
        }
        for &c in &delta.deactivated {
            self.emit(ChunkEvent::Deactivated(c));
        }
        log::info!(
            target: "streaming",
            "view center {}: +{} -{} ({} queued, {} active)",
            center,
            delta.activated.len(),
            delta.deactivated.len(),
            self.build_queue.len(),
            self.active.len()
        );
        delta
    }
}
