use fastnoise_lite::{FastNoiseLite, NoiseType};

// Keeps samples off the integer lattice, where gradient noise is always 0.5.
const LATTICE_NUDGE: f32 = 0.01;

/// Deterministic gradient noise over 2D and 3D voxel coordinates.
///
/// The generator is configured once and only read afterwards, so a single
/// field can be shared by population tasks running on different threads.
pub struct NoiseField {
    perlin: FastNoiseLite,
    chunk_width: f32,
}

impl NoiseField {
    pub fn new(seed: i32, chunk_width: usize) -> Self {
        let mut perlin = FastNoiseLite::with_seed(seed);
        perlin.set_noise_type(Some(NoiseType::Perlin));
        perlin.set_frequency(Some(1.0));
        Self {
            perlin,
            chunk_width: chunk_width.max(1) as f32,
        }
    }

    #[inline]
    fn perlin01(&self, x: f32, y: f32) -> f32 {
        (self.perlin.get_noise_2d(x, y) * 0.5 + 0.5).clamp(0.0, 1.0)
    }

    /// Height-map noise in `[0, 1]`. `scale` is measured in noise periods per chunk.
    pub fn sample_2d(&self, x: f32, z: f32, offset: f32, scale: f32) -> f32 {
        self.perlin01(
            (x + LATTICE_NUDGE) / self.chunk_width * scale + offset,
            (z + LATTICE_NUDGE) / self.chunk_width * scale + offset,
        )
    }

    /// Mean of the six ordered axis-pair samples (xy, yz, xz, yx, zy, zx).
    pub fn sample_3d_mean(&self, x: f32, y: f32, z: f32, offset: f32, scale: f32) -> f32 {
        let x = (x + offset + LATTICE_NUDGE) * scale;
        let y = (y + offset + LATTICE_NUDGE) * scale;
        let z = (z + offset + LATTICE_NUDGE) * scale;

        let ab = self.perlin01(x, y);
        let bc = self.perlin01(y, z);
        let ac = self.perlin01(x, z);
        let ba = self.perlin01(y, x);
        let cb = self.perlin01(z, y);
        let ca = self.perlin01(z, x);

        (ab + bc + ac + ba + cb + ca) / 6.0
    }

    #[inline]
    pub fn sample_3d(
        &self,
        x: f32,
        y: f32,
        z: f32,
        offset: f32,
        scale: f32,
        threshold: f32,
    ) -> bool {
        self.sample_3d_mean(x, y, z, offset, scale) > threshold
    }
}
