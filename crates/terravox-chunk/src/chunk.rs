use terravox_blocks::{AIR, BlockId};
use terravox_mesh_cpu::{MeshBuild, MeshBuildOutput};
use terravox_world::{ChunkCoord, TerrainRules};

use crate::context::VoxelContext;
use crate::error::ChunkError;
use crate::mesher::build_chunk_mesh;

/// Dense `width × height × width` block array for one chunk column plus its
/// current surface mesh.
#[derive(Clone, Debug)]
pub struct VoxelChunk {
    coord: ChunkCoord,
    width: usize,
    height: usize,
    blocks: Vec<BlockId>,
    mesh: MeshBuildOutput,
    mesh_version: u64,
    active: bool,
    populated: bool,
}

impl VoxelChunk {
    /// Allocated but unpopulated: all air, no mesh.
    pub fn new(coord: ChunkCoord, width: usize, height: usize) -> Self {
        Self {
            coord,
            width,
            height,
            blocks: vec![AIR; width * height * width],
            mesh: MeshBuildOutput::default(),
            mesh_version: 0,
            active: true,
            populated: false,
        }
    }

    /// Wraps an existing block array. Short arrays are padded with air and
    /// long ones truncated. The result counts as populated.
    pub fn from_blocks(
        coord: ChunkCoord,
        width: usize,
        height: usize,
        blocks: Vec<BlockId>,
    ) -> Self {
        let mut chunk = Self::new(coord, width, height);
        let mut b = blocks;
        b.resize(width * height * width, AIR);
        chunk.blocks = b;
        chunk.populated = true;
        chunk
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.width + z) * self.width + x
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    #[inline]
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Hides or shows the chunk. Blocks and mesh are kept either way.
    #[inline]
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    #[inline]
    pub fn mesh(&self) -> &MeshBuildOutput {
        &self.mesh
    }

    /// Number of meshes installed so far. Zero until the first build.
    #[inline]
    pub fn mesh_version(&self) -> u64 {
        self.mesh_version
    }

    #[inline]
    pub fn contains_local(&self, x: i32, y: i32, z: i32) -> bool {
        let w = self.width as i32;
        x >= 0 && x < w && z >= 0 && z < w && y >= 0 && y < self.height as i32
    }

    #[inline]
    pub fn block_local(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.blocks[self.idx(x, y, z)]
    }

    /// Block at world voxel `(wx, wy, wz)` if it falls inside this chunk.
    pub fn block_world(&self, wx: i32, wy: i32, wz: i32) -> Option<BlockId> {
        let (ox, oz) = self.coord.world_origin(self.width);
        let (x, z) = (wx - ox, wz - oz);
        if !self.contains_local(x, wy, z) {
            return None;
        }
        Some(self.block_local(x as usize, wy as usize, z as usize))
    }

    /// Fills every voxel from the terrain rules and marks the chunk populated.
    pub fn populate(&mut self, rules: &TerrainRules) {
        let (ox, oz) = self.coord.world_origin(self.width);
        let w = self.width;
        for y in 0..self.height {
            for z in 0..w {
                for x in 0..w {
                    let i = (y * w + z) * w + x;
                    self.blocks[i] = rules.block_id_at(ox + x as i32, y as i32, oz + z as i32);
                }
            }
        }
        self.populated = true;
    }

    /// Solidity of a local coordinate. Coordinates outside the chunk are
    /// translated to world space and answered by `ctx`.
    pub fn is_solid_local<C: VoxelContext + ?Sized>(&self, x: i32, y: i32, z: i32, ctx: &C) -> bool {
        if self.contains_local(x, y, z) {
            return ctx
                .catalog()
                .is_solid(self.block_local(x as usize, y as usize, z as usize));
        }
        let (ox, oz) = self.coord.world_origin(self.width);
        ctx.is_voxel_solid(ox + x, y, oz + z)
    }

    /// Computes a fresh mesh without touching the installed one.
    pub fn build_mesh<C: VoxelContext + ?Sized>(&self, ctx: &C) -> Result<MeshBuildOutput, ChunkError> {
        let mut mb = MeshBuild::new();
        mb.reserve_faces(self.mesh.vertex_count() / 4);
        build_chunk_mesh(self, ctx, &mut mb)?;
        Ok(mb.finish())
    }

    /// Replaces the current mesh and bumps the version.
    pub fn install_mesh(&mut self, mesh: MeshBuildOutput) -> u64 {
        self.mesh = mesh;
        self.mesh_version += 1;
        self.mesh_version
    }

    pub fn rebuild_mesh<C: VoxelContext + ?Sized>(&mut self, ctx: &C) -> Result<u64, ChunkError> {
        let mesh = self.build_mesh(ctx)?;
        Ok(self.install_mesh(mesh))
    }

    /// Writes one voxel without remeshing and returns the id it replaced.
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, id: BlockId) -> Result<BlockId, ChunkError> {
        if x >= self.width || y >= self.height || z >= self.width {
            return Err(ChunkError::LocalOutOfBounds { x, y, z });
        }
        let i = self.idx(x, y, z);
        Ok(std::mem::replace(&mut self.blocks[i], id))
    }

    /// Sets a voxel and rebuilds this chunk's mesh. Returns the neighbor
    /// chunks that share the edited voxel's boundary and need remeshing too.
    pub fn edit_voxel<C: VoxelContext + ?Sized>(
        &mut self,
        ctx: &C,
        x: usize,
        y: usize,
        z: usize,
        id: BlockId,
    ) -> Result<Vec<ChunkCoord>, ChunkError> {
        if !self.populated {
            return Err(ChunkError::NotPopulated(self.coord));
        }
        ctx.catalog().get(id)?;
        let previous = self.set_local(x, y, z, id)?;
        // A failed rebuild leaves the old mesh installed, so the old block goes back too.
        let version = match self.rebuild_mesh(ctx) {
            Ok(v) => v,
            Err(e) => {
                let i = self.idx(x, y, z);
                self.blocks[i] = previous;
                return Err(e);
            }
        };
        log::debug!(
            target: "edits",
            "chunk {} local ({}, {}, {}) = {}, mesh v{}",
            self.coord,
            x,
            y,
            z,
            id,
            version
        );
        Ok(self.boundary_neighbors(x, z))
    }

    /// Face-adjacent chunks whose voxels touch local column `(x, z)`.
    pub fn boundary_neighbors(&self, x: usize, z: usize) -> Vec<ChunkCoord> {
        let last = self.width.saturating_sub(1);
        let mut out = Vec::with_capacity(2);
        if x == 0 {
            out.push(self.coord.offset(-1, 0));
        }
        if x == last {
            out.push(self.coord.offset(1, 0));
        }
        if z == 0 {
            out.push(self.coord.offset(0, -1));
        }
        if z == last {
            out.push(self.coord.offset(0, 1));
        }
        out
    }
}
