use terravox_blocks::Face;
use terravox_geom::Vec3;
use terravox_mesh_cpu::MeshBuild;

use crate::chunk::VoxelChunk;
use crate::context::VoxelContext;
use crate::error::ChunkError;

/// Emits every face of a solid voxel whose neighbor across that face is not
/// solid. Faces are visited in `Face::ALL` order. `mb` is cleared first.
pub fn build_chunk_mesh<C: VoxelContext + ?Sized>(
    chunk: &VoxelChunk,
    ctx: &C,
    mb: &mut MeshBuild,
) -> Result<(), ChunkError> {
    if !chunk.is_populated() {
        return Err(ChunkError::NotPopulated(chunk.coord()));
    }
    mb.clear_keep_capacity();
    let catalog = ctx.catalog();
    let atlas = ctx.atlas();
    let w = chunk.width();
    let h = chunk.height();
    let (ox, oz) = chunk.coord().world_origin(w);

    for y in 0..h {
        for z in 0..w {
            for x in 0..w {
                let id = chunk.block_local(x, y, z);
                if !catalog.get(id)?.solid {
                    continue;
                }
                let origin = Vec3::from_voxel(ox + x as i32, y as i32, oz + z as i32);
                for face in Face::ALL {
                    let (dx, dy, dz) = face.delta();
                    let (nx, ny, nz) = (x as i32 + dx, y as i32 + dy, z as i32 + dz);
                    if chunk.is_solid_local(nx, ny, nz, ctx) {
                        continue;
                    }
                    let tile = catalog.face_texture(id, face.index())?;
                    mb.add_voxel_face(origin, face, atlas.tile_uvs(tile));
                }
            }
        }
    }
    Ok(())
}
