use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

use terravox_blocks::BlockCatalog;
use terravox_chunk::{TerrainContext, VoxelChunk};
use terravox_mesh_cpu::AtlasLayout;
use terravox_world::{ChunkCoord, TerrainRules, WorldGenConfig};

fn load() -> (BlockCatalog, WorldGenConfig) {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let vox = root.join("../../assets/voxels");
    let cat = BlockCatalog::load_from_path(vox.join("blocks.toml")).unwrap();
    let cfg = WorldGenConfig::load_from_path(vox.join("worldgen.toml")).unwrap();
    (cat, cfg)
}

fn bench_populate(c: &mut Criterion) {
    let mut group = c.benchmark_group("populate");
    let (cat, cfg) = load();
    let rules = TerrainRules::compile(&cfg, &cat).unwrap();
    let dims = rules.dims();
    group.bench_function("default_16x128x16", |b| {
        b.iter(|| {
            let mut chunk = VoxelChunk::new(ChunkCoord::new(50, 50), dims.chunk_width, dims.chunk_height);
            chunk.populate(&rules);
            black_box(chunk);
        })
    });
    group.finish();
}

fn bench_build_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_mesh");
    let (cat, cfg) = load();
    let rules = TerrainRules::compile(&cfg, &cat).unwrap();
    let dims = rules.dims();
    let ctx = TerrainContext::new(&cat, &rules, AtlasLayout::new(cfg.atlas_size_in_tiles));
    let mut chunk = VoxelChunk::new(ChunkCoord::new(50, 50), dims.chunk_width, dims.chunk_height);
    chunk.populate(&rules);
    group.bench_function("default_16x128x16", |b| {
        b.iter(|| {
            let out = chunk.build_mesh(&ctx).unwrap();
            black_box(out);
        })
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(5));
    targets = bench_populate, bench_build_mesh
}
criterion_main!(benches);
