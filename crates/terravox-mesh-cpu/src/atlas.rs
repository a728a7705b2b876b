use terravox_blocks::TextureId;
use terravox_geom::Vec2;

/// Square texture atlas of `tiles_per_side × tiles_per_side` tiles. Tile 0 is
/// the top-left tile and indices run left to right, then top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasLayout {
    tiles_per_side: u32,
}

impl AtlasLayout {
    /// A zero-sized atlas is clamped to a single tile.
    pub fn new(tiles_per_side: u32) -> Self {
        Self {
            tiles_per_side: tiles_per_side.max(1),
        }
    }

    #[inline]
    pub fn tiles_per_side(&self) -> u32 {
        self.tiles_per_side
    }

    /// Normalized edge length of one tile.
    #[inline]
    pub fn tile_size(&self) -> f32 {
        1.0 / self.tiles_per_side as f32
    }

    /// UVs for `tile` in face emission order: `(u,v), (u,v+s), (u+s,v), (u+s,v+s)`.
    pub fn tile_uvs(&self, tile: TextureId) -> [Vec2; 4] {
        let n = self.tiles_per_side;
        let t = u32::from(tile);
        let row = t / n;
        let col = t - row * n;
        let s = self.tile_size();
        let u = col as f32 * s;
        let v = 1.0 - row as f32 * s - s;
        [
            Vec2::new(u, v),
            Vec2::new(u, v + s),
            Vec2::new(u + s, v),
            Vec2::new(u + s, v + s),
        ]
    }
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self::new(4)
    }
}
