use terravox_blocks::BlockCatalog;
use terravox_mesh_cpu::AtlasLayout;
use terravox_world::TerrainRules;

/// Read-only view of the world a chunk consults while meshing.
///
/// This is the chunk's back-reference to its owner: it is borrowed for the
/// duration of one call and never stored, so a chunk cannot outlive it.
/// `is_voxel_solid` takes world coordinates and is only asked about voxels
/// outside the calling chunk.
pub trait VoxelContext {
    fn catalog(&self) -> &BlockCatalog;
    fn atlas(&self) -> AtlasLayout;
    fn is_voxel_solid(&self, wx: i32, wy: i32, wz: i32) -> bool;
}

/// Context with no neighbor chunks: every outside voxel is answered straight
/// from the terrain rules. Voxels in the outer ring of chunk coordinates are
/// air, as they are for the world.
pub struct TerrainContext<'a> {
    pub catalog: &'a BlockCatalog,
    pub rules: &'a TerrainRules,
    pub atlas: AtlasLayout,
}

impl<'a> TerrainContext<'a> {
    pub fn new(catalog: &'a BlockCatalog, rules: &'a TerrainRules, atlas: AtlasLayout) -> Self {
        Self {
            catalog,
            rules,
            atlas,
        }
    }
}

impl VoxelContext for TerrainContext<'_> {
    fn catalog(&self) -> &BlockCatalog {
        self.catalog
    }

    fn atlas(&self) -> AtlasLayout {
        self.atlas
    }

    fn is_voxel_solid(&self, wx: i32, wy: i32, wz: i32) -> bool {
        let dims = self.rules.dims();
        if !dims.contains_chunk(dims.chunk_of_voxel(wx, wz)) {
            return false;
        }
        self.catalog.is_solid(self.rules.block_id_at(wx, wy, wz))
    }
}
