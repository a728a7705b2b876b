use crate::chunk_coord::ChunkCoord;

/// Fixed world-wide sizes: chunk footprint, chunk height, and world extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldDims {
    pub chunk_width: usize,
    pub chunk_height: usize,
    pub world_width_in_chunks: usize,
}

impl WorldDims {
    #[inline]
    pub fn world_width_in_voxels(&self) -> i32 {
        (self.chunk_width * self.world_width_in_chunks) as i32
    }

    #[inline]
    pub fn chunk_volume(&self) -> usize {
        self.chunk_width * self.chunk_height * self.chunk_width
    }

    /// Voxel lies inside `[0, world width)` on x/z and `[0, chunk height)` on y.
    #[inline]
    pub fn contains_voxel(&self, x: i32, y: i32, z: i32) -> bool {
        let w = self.world_width_in_voxels();
        x >= 0 && x < w && z >= 0 && z < w && y >= 0 && y < self.chunk_height as i32
    }

    /// Chunk lies strictly inside the grid. The outermost ring of the grid is
    /// never considered part of the world.
    #[inline]
    pub fn contains_chunk(&self, coord: ChunkCoord) -> bool {
        let last = self.world_width_in_chunks as i32 - 1;
        coord.cx > 0 && coord.cx < last && coord.cz > 0 && coord.cz < last
    }

    #[inline]
    pub fn chunk_of_voxel(&self, x: i32, z: i32) -> ChunkCoord {
        let w = self.chunk_width as i32;
        ChunkCoord::new(x.div_euclid(w), z.div_euclid(w))
    }

    /// Local `(x, z)` of a world voxel inside its owning chunk.
    #[inline]
    pub fn local_of_voxel(&self, x: i32, z: i32) -> (usize, usize) {
        let w = self.chunk_width as i32;
        (x.rem_euclid(w) as usize, z.rem_euclid(w) as usize)
    }
}
