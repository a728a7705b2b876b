use std::collections::VecDeque;

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use hashbrown::HashSet;
use terravox_blocks::{AIR, BlockCatalog, BlockId};
use terravox_chunk::{ChunkError, VoxelChunk, VoxelContext};
use terravox_geom::Vec3;
use terravox_mesh_cpu::{AtlasLayout, MeshBuildOutput};
use terravox_world::{BuildPacing, ChunkCoord, TerrainError, TerrainRules, WorldDims, WorldGenConfig};

use crate::events::{ChunkEvent, EVENT_CAPACITY};
use crate::grid::{ChunkGrid, ChunkState};
use crate::streaming::ActivationDelta;

/// Owner of every chunk, the catalog, and the terrain rules. All voxel and
/// mesh mutation goes through `&mut World`, so there is exactly one writer.
pub struct World {
    pub(crate) catalog: BlockCatalog,
    pub(crate) rules: TerrainRules,
    pub(crate) atlas: AtlasLayout,
    pub(crate) dims: WorldDims,
    pub(crate) view_distance: i32,
    pub(crate) pacing: BuildPacing,
    pub(crate) grid: ChunkGrid,
    pub(crate) active: HashSet<ChunkCoord>,
    pub(crate) build_queue: VecDeque<ChunkCoord>,
    pub(crate) last_observer_chunk: Option<ChunkCoord>,
    events_tx: Option<Sender<ChunkEvent>>,
    events_dropped: u64,
    ticks: u64,
    elapsed: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub allocated: usize,
    pub populated: usize,
    pub active: usize,
    pub queued: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub ticks: u64,
    /// Events discarded because the subscriber's queue was full.
    pub events_dropped: u64,
}

/// What one `tick` did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Present only when the observer entered a different chunk.
    pub view_changed: Option<ActivationDelta>,
    pub built: Vec<ChunkCoord>,
}

impl World {
    pub fn new(catalog: BlockCatalog, cfg: &WorldGenConfig) -> Result<Self, TerrainError> {
        let rules = TerrainRules::compile(cfg, &catalog)?;
        let dims = rules.dims();
        log::info!(
            target: "worldgen",
            "world {}x{} chunks of {}x{}x{}, view distance {}, {} block types",
            dims.world_width_in_chunks,
            dims.world_width_in_chunks,
            dims.chunk_width,
            dims.chunk_height,
            dims.chunk_width,
            cfg.view_distance_in_chunks,
            catalog.len()
        );
        Ok(Self {
            catalog,
            rules,
            atlas: AtlasLayout::new(cfg.atlas_size_in_tiles),
            dims,
            view_distance: cfg.view_distance_in_chunks.max(0),
            pacing: cfg.build_pacing,
            grid: ChunkGrid::new(dims.world_width_in_chunks),
            active: HashSet::new(),
            build_queue: VecDeque::new(),
            last_observer_chunk: None,
            events_tx: None,
            events_dropped: 0,
            ticks: 0,
            elapsed: 0.0,
        })
    }

    #[inline]
    pub fn dims(&self) -> WorldDims {
        self.dims
    }

    #[inline]
    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    #[inline]
    pub fn rules(&self) -> &TerrainRules {
        &self.rules
    }

    #[inline]
    pub fn view_distance(&self) -> i32 {
        self.view_distance
    }

    #[inline]
    pub fn pacing(&self) -> BuildPacing {
        self.pacing
    }

    /// Opens the chunk event feed with room for `EVENT_CAPACITY` unread
    /// events. A previous subscriber is disconnected; clones of the returned
    /// receiver share one queue.
    pub fn subscribe(&mut self) -> Receiver<ChunkEvent> {
        self.subscribe_with_capacity(EVENT_CAPACITY)
    }

    pub fn subscribe_with_capacity(&mut self, capacity: usize) -> Receiver<ChunkEvent> {
        let (tx, rx) = bounded(capacity.max(1));
        self.events_tx = Some(tx);
        rx
    }

    /// Without a subscriber events are not queued at all. A full queue drops
    /// the newest event.
    pub(crate) fn emit(&mut self, ev: ChunkEvent) {
        let Some(tx) = &self.events_tx else {
            return;
        };
        match tx.try_send(ev) {
            Ok(()) => {}
            Err(TrySendError::Full(ev)) => {
                self.events_dropped += 1;
                log::trace!(target: "streaming", "event queue full, dropped {:?}", ev);
            }
            Err(TrySendError::Disconnected(_)) => {
                log::debug!(target: "streaming", "event subscriber went away");
                self.events_tx = None;
            }
        }
    }

    pub fn world_to_chunk_coord(&self, pos: Vec3) -> ChunkCoord {
        let w = self.dims.chunk_width as f32;
        ChunkCoord::new((pos.x / w).floor() as i32, (pos.z / w).floor() as i32)
    }

    /// Interior of the grid only; the outermost ring of coordinates is never
    /// part of the world.
    #[inline]
    pub fn is_chunk_in_world(&self, coord: ChunkCoord) -> bool {
        self.dims.contains_chunk(coord)
    }

    pub fn is_voxel_in_world(&self, pos: Vec3) -> bool {
        let (x, y, z) = pos.voxel();
        self.dims.contains_voxel(x, y, z)
    }

    /// World centre on x/z, 50 voxels below the top of the world.
    pub fn spawn_position(&self) -> Vec3 {
        let half = self.dims.world_width_in_voxels() as f32 * 0.5;
        let top = self.dims.chunk_height as f32 - 1.0;
        Vec3::new(half, (self.dims.chunk_height as f32 - 50.0).clamp(0.0, top), half)
    }

    /// Block the world holds at an integer voxel: the chunk's array once it is
    /// populated, the terrain rules before that, air outside the world.
    pub fn block_at_voxel(&self, x: i32, y: i32, z: i32) -> BlockId {
        if y < 0 || y >= self.dims.chunk_height as i32 {
            return AIR;
        }
        let coord = self.dims.chunk_of_voxel(x, z);
        if !self.is_chunk_in_world(coord) {
            return AIR;
        }
        match self.grid.get(coord) {
            Some(chunk) if chunk.is_populated() => chunk.block_world(x, y, z).unwrap_or(AIR),
            _ => self.rules.block_id_at(x, y, z),
        }
    }

    pub fn block_at(&self, pos: Vec3) -> BlockId {
        let (x, y, z) = pos.voxel();
        self.block_at_voxel(x, y, z)
    }

    pub fn check_for_voxel_solid(&self, pos: Vec3) -> bool {
        let (x, y, z) = pos.voxel();
        self.catalog.is_solid(self.block_at_voxel(x, y, z))
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&VoxelChunk> {
        self.grid.get(coord)
    }

    /// Installed mesh of a built chunk.
    pub fn mesh(&self, coord: ChunkCoord) -> Option<&MeshBuildOutput> {
        self.grid
            .get(coord)
            .filter(|c| c.mesh_version() > 0)
            .map(VoxelChunk::mesh)
    }

    pub fn chunk_state(&self, coord: ChunkCoord) -> ChunkState {
        self.grid.state(coord)
    }

    #[inline]
    pub fn is_active(&self, coord: ChunkCoord) -> bool {
        self.active.contains(&coord)
    }

    /// Active coordinates in ascending order.
    pub fn active_chunks(&self) -> Vec<ChunkCoord> {
        let mut v: Vec<ChunkCoord> = self.active.iter().copied().collect();
        v.sort();
        v
    }

    pub fn queued(&self) -> usize {
        self.build_queue.len()
    }

    pub fn last_observer_chunk(&self) -> Option<ChunkCoord> {
        self.last_observer_chunk
    }

    /// Seconds of simulated time fed through `tick`.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn stats(&self) -> WorldStats {
        let mut s = WorldStats {
            active: self.active.len(),
            queued: self.build_queue.len(),
            ticks: self.ticks,
            events_dropped: self.events_dropped,
            ..WorldStats::default()
        };
        for chunk in self.grid.iter() {
            s.allocated += 1;
            if chunk.is_populated() {
                s.populated += 1;
            }
            s.vertices += chunk.mesh().vertex_count();
            s.triangles += chunk.mesh().triangle_count();
        }
        s
    }

    /// One update step: refresh the active set if the observer changed chunk,
    /// then run one build step.
    pub fn tick(&mut self, observer: Vec3, dt: f32) -> Result<TickReport, ChunkError> {
        self.ticks += 1;
        self.elapsed += dt;
        let center = self.world_to_chunk_coord(observer);
        let view_changed = if self.last_observer_chunk != Some(center) {
            Some(self.refresh_active_set(observer))
        } else {
            None
        };
        let built = self.run_build_step()?;
        log::trace!(
            target: "streaming",
            "tick {} dt={:.3} built={} queued={}",
            self.ticks,
            dt,
            built.len(),
            self.build_queue.len()
        );
        Ok(TickReport {
            view_changed,
            built,
        })
    }
}

impl VoxelContext for World {
    fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    fn atlas(&self) -> AtlasLayout {
        self.atlas
    }

    fn is_voxel_solid(&self, wx: i32, wy: i32, wz: i32) -> bool {
        self.catalog.is_solid(self.block_at_voxel(wx, wy, wz))
    }
}
