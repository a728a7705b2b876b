use terravox_blocks::Face;
use terravox_geom::{Vec2, Vec3};

use crate::cube::face_corners;

/// Growable mesh buffers for one chunk. Reused across rebuilds.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    vertices: Vec<Vec3>,
    triangles: Vec<u32>,
    uvs: Vec<Vec2>,
    vertex_index: u32,
}

impl MeshBuild {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all arrays and the vertex counter but retains capacity.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
        self.uvs.clear();
        self.vertex_index = 0;
    }

    /// Pre-reserve capacity for approximately `n_faces` faces.
    #[inline]
    pub fn reserve_faces(&mut self, n_faces: usize) {
        self.vertices.reserve(n_faces * 4);
        self.uvs.reserve(n_faces * 4);
        self.triangles.reserve(n_faces * 6);
    }

    /// Appends one unit face of the voxel whose minimum corner is `origin`.
    pub fn add_voxel_face(&mut self, origin: Vec3, face: Face, uvs: [Vec2; 4]) {
        for (corner, uv) in face_corners(face).into_iter().zip(uvs) {
            self.vertices.push(origin + corner);
            self.uvs.push(uv);
        }
        let vi = self.vertex_index;
        self.triangles
            .extend_from_slice(&[vi, vi + 1, vi + 2, vi + 2, vi + 1, vi + 3]);
        self.vertex_index += 4;
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn finish(self) -> MeshBuildOutput {
        MeshBuildOutput {
            vertices: self.vertices,
            triangles: self.triangles,
            uvs: self.uvs,
        }
    }
}

/// Renderer-facing geometry. `uvs` is parallel to `vertices`; `triangles`
/// holds vertex indices in groups of three. Normals are left to the consumer.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuildOutput {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<u32>,
    pub uvs: Vec<Vec2>,
}

impl MeshBuildOutput {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
