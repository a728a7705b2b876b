use terravox_blocks::Face;
use terravox_geom::Vec3;

/// Unit cube corners relative to the voxel's minimum corner.
pub const VOXEL_CORNERS: [Vec3; 8] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(0.0, 1.0, 1.0),
];

/// Corner indices per face in emission order. Triangles `(0,1,2)` and
/// `(2,1,3)` of every face share one winding.
pub const FACE_CORNERS: [[usize; 4]; 6] = [
    [0, 3, 1, 2], // back
    [5, 6, 4, 7], // front
    [3, 7, 2, 6], // top
    [1, 5, 0, 4], // bottom
    [4, 7, 0, 3], // left
    [1, 2, 5, 6], // right
];

#[inline]
pub fn face_corners(face: Face) -> [Vec3; 4] {
    let ix = FACE_CORNERS[face.index()];
    [
        VOXEL_CORNERS[ix[0]],
        VOXEL_CORNERS[ix[1]],
        VOXEL_CORNERS[ix[2]],
        VOXEL_CORNERS[ix[3]],
    ]
}
