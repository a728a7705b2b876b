use proptest::prelude::*;
use terravox_blocks::{AIR, BlockCatalog, BlockError};
use terravox_chunk::{ChunkError, TerrainContext, VoxelChunk, VoxelContext};
use terravox_geom::Vec3;
use terravox_mesh_cpu::AtlasLayout;
use terravox_runtime::{ChunkEvent, ChunkState, EVENT_CAPACITY, EditOutcome, World};
use terravox_world::{BuildPacing, ChunkCoord, WorldGenConfig};

const STONE: u8 = 2;

fn catalog() -> BlockCatalog {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    BlockCatalog::load_from_path(root.join("../../assets/voxels/blocks.toml")).unwrap()
}

fn config(width_in_chunks: usize, view: i32) -> WorldGenConfig {
    WorldGenConfig {
        chunk_width: 4,
        chunk_height: 32,
        world_width_in_chunks: width_in_chunks,
        view_distance_in_chunks: view,
        terrain_height: 8.0,
        solid_ground_height: 12,
        ..WorldGenConfig::default()
    }
}

fn world(width_in_chunks: usize, view: i32) -> World {
    World::new(catalog(), &config(width_in_chunks, view)).unwrap()
}

/// Observer standing in the middle of chunk `(cx, cz)` of width 4.
fn at_chunk(cx: i32, cz: i32) -> Vec3 {
    Vec3::new(cx as f32 * 4.0 + 1.5, 20.0, cz as f32 * 4.0 + 1.5)
}

fn build_all(world: &mut World) {
    while world.queued() > 0 {
        world.run_build_step().unwrap();
    }
}

fn column(cx: i32, zs: std::ops::RangeInclusive<i32>) -> Vec<ChunkCoord> {
    zs.map(|cz| ChunkCoord::new(cx, cz)).collect()
}

#[test]
fn stepping_one_chunk_east_swaps_exactly_one_column() {
    let mut w = World::new(
        catalog(),
        &WorldGenConfig {
            chunk_width: 2,
            chunk_height: 16,
            world_width_in_chunks: 100,
            view_distance_in_chunks: 5,
            terrain_height: 4.0,
            solid_ground_height: 6,
            ..WorldGenConfig::default()
        },
    )
    .unwrap();
    let first = w.refresh_active_set(Vec3::new(101.0, 10.0, 101.0));
    assert_eq!(w.last_observer_chunk(), Some(ChunkCoord::new(50, 50)));
    assert_eq!(first.activated.len(), 121);
    assert_eq!(first.queued.len(), 121);
    assert!(first.deactivated.is_empty());

    let before = w.active_chunks();
    let delta = w.refresh_active_set(Vec3::new(103.0, 10.0, 101.0));
    assert_eq!(delta.activated, column(56, 45..=55));
    assert_eq!(delta.deactivated, column(45, 45..=55));
    assert_eq!(delta.queued, column(56, 45..=55));

    let after = w.active_chunks();
    let kept: Vec<_> = before.iter().filter(|c| c.cx != 45).copied().collect();
    assert!(kept.iter().all(|c| after.contains(c)));
    assert_eq!(after.len(), 121);
    assert_eq!(w.chunk_state(ChunkCoord::new(45, 50)), ChunkState::AllocatedUnpopulated);
    assert!(!w.chunk(ChunkCoord::new(45, 50)).unwrap().is_active());
}

#[test]
fn tick_refreshes_only_on_chunk_change() {
    let mut w = world(12, 2);
    let r1 = w.tick(at_chunk(5, 5), 0.016).unwrap();
    assert!(r1.view_changed.is_some());
    let r2 = w.tick(Vec3::new(21.9, 20.0, 21.9), 0.016).unwrap();
    assert!(r2.view_changed.is_none());
    let r3 = w.tick(at_chunk(6, 5), 0.016).unwrap();
    assert!(r3.view_changed.is_some());
    assert_eq!(w.stats().ticks, 3);
}

#[test]
fn one_per_tick_builds_in_fifo_order() {
    let mut w = world(12, 2);
    assert_eq!(w.pacing(), BuildPacing::OnePerTick);
    let r = w.tick(at_chunk(5, 5), 0.016).unwrap();
    assert_eq!(r.built, vec![ChunkCoord::new(3, 3)]);
    let r = w.tick(at_chunk(5, 5), 0.016).unwrap();
    assert_eq!(r.built, vec![ChunkCoord::new(3, 4)]);
    assert_eq!(w.stats().populated, 2);
    assert_eq!(w.queued(), 23);

    for _ in 0..23 {
        assert_eq!(w.tick(at_chunk(5, 5), 0.016).unwrap().built.len(), 1);
    }
    assert_eq!(w.queued(), 0);
    assert!(w.tick(at_chunk(5, 5), 0.016).unwrap().built.is_empty());
    for c in w.active_chunks() {
        assert_eq!(w.chunk_state(c), ChunkState::ReadyActive);
        assert_eq!(w.chunk(c).unwrap().mesh_version(), 1);
    }
}

#[test]
fn parallel_pacing_builds_a_batch_per_step() {
    let cfg = WorldGenConfig {
        build_pacing: BuildPacing::Parallel { batch: 8 },
        ..config(12, 2)
    };
    let mut w = World::new(catalog(), &cfg).unwrap();
    let r = w.tick(at_chunk(5, 5), 0.016).unwrap();
    assert_eq!(r.built.len(), 8);
    assert_eq!(r.built[0], ChunkCoord::new(3, 3));
    assert_eq!(r.built[7], ChunkCoord::new(4, 5));
    build_all(&mut w);

    // Same terrain and meshes as the serial build.
    let mut serial = world(12, 2);
    serial.tick(at_chunk(5, 5), 0.016).unwrap();
    build_all(&mut serial);
    for c in w.active_chunks() {
        assert_eq!(w.chunk(c).unwrap().blocks(), serial.chunk(c).unwrap().blocks());
        assert_eq!(w.mesh(c), serial.mesh(c));
    }
}

#[test]
fn mesh_does_not_depend_on_neighbor_build_order() {
    let mut w = world(12, 1);
    w.tick(at_chunk(5, 5), 0.0).unwrap();
    // (4,4) is built first; its neighbors are answered by the terrain rules.
    let early = w.mesh(ChunkCoord::new(4, 4)).unwrap().clone();
    build_all(&mut w);
    let c = ChunkCoord::new(4, 4);
    let rebuilt = w.chunk(c).unwrap().build_mesh(&w).unwrap();
    assert_eq!(early, rebuilt);

    // And a chunk meshed against the rules alone agrees with the world.
    let ctx = TerrainContext::new(w.catalog(), w.rules(), AtlasLayout::new(4));
    let mut lone = VoxelChunk::new(c, 4, 32);
    lone.populate(w.rules());
    assert_eq!(lone.build_mesh(&ctx).unwrap(), early);
}

#[test]
fn chunks_beside_the_rim_mesh_alike_in_world_and_rules() {
    let mut w = world(12, 1);
    w.tick(at_chunk(1, 1), 0.0).unwrap();
    build_all(&mut w);
    let c = ChunkCoord::new(1, 1);
    let ctx = TerrainContext::new(w.catalog(), w.rules(), AtlasLayout::new(4));
    // Bedrock at y = 0 in ring chunk (0, 1) reads as air through both paths.
    assert!(!ctx.is_voxel_solid(3, 0, 5));
    assert!(!w.is_voxel_solid(3, 0, 5));
    assert!(ctx.is_voxel_solid(4, 0, 5));

    let mut lone = VoxelChunk::new(c, 4, 32);
    lone.populate(w.rules());
    assert_eq!(Some(&lone.build_mesh(&ctx).unwrap()), w.mesh(c));
}

#[test]
fn built_and_unbuilt_neighbors_agree_on_shared_edge() {
    let mut w = world(12, 1);
    w.tick(at_chunk(5, 5), 0.0).unwrap();
    build_all(&mut w);
    let west = ChunkCoord::new(5, 5);
    let east = ChunkCoord::new(6, 5);
    assert!(w.chunk(east).unwrap().is_populated());
    let x_west = 5 * 4 + 3;
    let x_east = 6 * 4;
    let rules = w.rules();
    let cat = w.catalog();
    for y in 0..32 {
        for z in 20..24 {
            let via_array = w.check_for_voxel_solid(Vec3::new(x_east as f32 + 0.5, y as f32, z as f32));
            let via_rules = cat.is_solid(rules.block_id_at(x_east, y, z));
            assert_eq!(via_array, via_rules, "east y={} z={}", y, z);
            let w_array = w.check_for_voxel_solid(Vec3::new(x_west as f32, y as f32, z as f32));
            assert_eq!(w_array, cat.is_solid(rules.block_id_at(x_west, y, z)));
        }
    }
    assert_eq!(w.chunk_state(west), ChunkState::ReadyActive);
}

#[test]
fn solidity_queries_cover_unbuilt_and_out_of_world() {
    let mut w = world(12, 1);
    let p = Vec3::new(22.0, 0.0, 22.0);
    // Nothing built yet: answered by the rules. Bedrock at y=0 is solid.
    assert_eq!(w.chunk_state(ChunkCoord::new(5, 5)), ChunkState::Absent);
    assert!(w.check_for_voxel_solid(p));
    assert!(!w.check_for_voxel_solid(Vec3::new(22.0, 31.0, 22.0)));
    assert!(!w.check_for_voxel_solid(Vec3::new(22.0, -1.0, 22.0)));
    assert!(!w.check_for_voxel_solid(Vec3::new(22.0, 32.0, 22.0)));
    assert!(!w.check_for_voxel_solid(Vec3::new(-3.0, 0.0, 22.0)));
    // The outer ring of chunks is not part of the world.
    assert!(!w.check_for_voxel_solid(Vec3::new(1.0, 0.0, 22.0)));
    assert!(!w.is_chunk_in_world(ChunkCoord::new(0, 5)));
    assert!(!w.is_chunk_in_world(ChunkCoord::new(11, 5)));
    assert!(w.is_chunk_in_world(ChunkCoord::new(10, 10)));
    assert!(w.is_voxel_in_world(Vec3::new(0.0, 0.0, 47.9)));
    assert!(!w.is_voxel_in_world(Vec3::new(48.0, 0.0, 0.0)));

    w.tick(at_chunk(5, 5), 0.0).unwrap();
    build_all(&mut w);
    // Once built, the chunk's own array answers, including edits.
    assert_eq!(w.request_edit(p, AIR).unwrap(), EditOutcome::Applied {
        coord: ChunkCoord::new(5, 5),
        remeshed: vec![ChunkCoord::new(5, 5)],
    });
    assert!(!w.check_for_voxel_solid(p));
    assert_eq!(w.block_at(p), AIR);
}

#[test]
fn boundary_edit_remeshes_only_the_touching_neighbor() {
    let mut w = world(12, 2);
    w.tick(at_chunk(5, 5), 0.0).unwrap();
    build_all(&mut w);
    let coord = ChunkCoord::new(5, 5);
    let west = ChunkCoord::new(4, 5);
    let others = [ChunkCoord::new(6, 5), ChunkCoord::new(5, 4), ChunkCoord::new(5, 6)];
    let version = |w: &World, c: ChunkCoord| w.chunk(c).unwrap().mesh_version();
    let before_self = version(&w, coord);
    let before_west = version(&w, west);
    let before_others: Vec<u64> = others.iter().map(|&c| version(&w, c)).collect();

    // Local (0, 20, 1) of chunk (5,5).
    let out = w.request_edit(Vec3::new(20.0, 20.0, 21.0), STONE).unwrap();
    assert_eq!(out, EditOutcome::Applied { coord, remeshed: vec![coord, west] });
    assert_eq!(version(&w, coord), before_self + 1);
    assert_eq!(version(&w, west), before_west + 1);
    let after_others: Vec<u64> = others.iter().map(|&c| version(&w, c)).collect();
    assert_eq!(before_others, after_others);
    assert_eq!(w.block_at(Vec3::new(20.0, 20.0, 21.0)), STONE);

    // A corner voxel touches two neighbors.
    let out = w.request_edit(Vec3::new(20.0, 20.0, 20.0), STONE).unwrap();
    assert_eq!(
        out,
        EditOutcome::Applied { coord, remeshed: vec![coord, west, ChunkCoord::new(5, 4)] }
    );
}

#[test]
fn repeated_edit_is_idempotent_on_the_mesh() {
    let mut w = world(12, 1);
    w.tick(at_chunk(5, 5), 0.0).unwrap();
    build_all(&mut w);
    let p = Vec3::new(21.0, 13.0, 22.0);
    w.request_edit(p, AIR).unwrap();
    let once = w.mesh(ChunkCoord::new(5, 5)).unwrap().clone();
    w.request_edit(p, AIR).unwrap();
    assert_eq!(w.mesh(ChunkCoord::new(5, 5)).unwrap(), &once);
}

#[test]
fn edits_that_cannot_apply() {
    let mut w = world(12, 1);
    assert_eq!(
        w.request_edit(Vec3::new(22.0, 5.0, 22.0), STONE).unwrap(),
        EditOutcome::ChunkNotReady(ChunkCoord::new(5, 5))
    );
    assert_eq!(
        w.request_edit(Vec3::new(-1.0, 5.0, 22.0), STONE).unwrap(),
        EditOutcome::OutOfWorld
    );
    assert_eq!(
        w.request_edit(Vec3::new(2.0, 5.0, 22.0), STONE).unwrap(),
        EditOutcome::OutOfWorld
    );
    assert_eq!(
        w.request_edit(Vec3::new(22.0, 5.0, 22.0), 200).unwrap_err(),
        ChunkError::Block(BlockError::InvalidBlockId(200))
    );
}

#[test]
fn events_report_activation_and_meshes() {
    let mut w = world(12, 1);
    let rx = w.subscribe();
    w.tick(at_chunk(5, 5), 0.0).unwrap();
    let evs: Vec<ChunkEvent> = rx.try_iter().collect();
    let activated = evs.iter().filter(|e| matches!(e, ChunkEvent::Activated(_))).count();
    assert_eq!(activated, 9);
    assert!(evs.contains(&ChunkEvent::Meshed { coord: ChunkCoord::new(4, 4), version: 1 }));

    build_all(&mut w);
    let _ = rx.try_iter().count();
    w.tick(at_chunk(7, 5), 0.0).unwrap();
    let evs: Vec<ChunkEvent> = rx.try_iter().collect();
    let deactivated: Vec<_> = evs
        .iter()
        .filter_map(|e| match e {
            ChunkEvent::Deactivated(c) => Some(*c),
            _ => None,
        })
        .collect();
    assert_eq!(deactivated, column(4, 4..=6).into_iter().chain(column(5, 4..=6)).collect::<Vec<_>>());
}

#[test]
fn unread_events_stay_bounded() {
    let mut w = world(200, 2);
    let rx = w.subscribe_with_capacity(64);
    for step in 0..400 {
        w.tick(Vec3::new(20.0 + step as f32, 20.0, 400.0), 0.016).unwrap();
        assert!(rx.len() <= 64);
    }
    assert_eq!(rx.len(), 64);
    let dropped = w.stats().events_dropped;
    assert!(dropped > 0);

    // Draining makes room again; later events are delivered.
    let _ = rx.try_iter().count();
    w.tick(Vec3::new(20.0, 20.0, 400.0), 0.016).unwrap();
    assert!(rx.try_iter().any(|e| matches!(e, ChunkEvent::Activated(_))));
    assert_eq!(w.stats().events_dropped, dropped);
}

#[test]
fn events_are_not_queued_without_a_subscriber() {
    let mut w = world(200, 2);
    for step in 0..200 {
        w.tick(Vec3::new(20.0 + step as f32, 20.0, 400.0), 0.016).unwrap();
    }
    assert_eq!(w.stats().events_dropped, 0);

    let rx = w.subscribe();
    w.tick(at_chunk(120, 100), 0.0).unwrap();
    let pending = rx.len();
    assert!(pending > 0 && pending <= EVENT_CAPACITY);
    drop(rx);
    // A dropped subscriber stops the feed instead of filling a queue.
    w.tick(at_chunk(130, 100), 0.0).unwrap();
    assert_eq!(w.stats().events_dropped, 0);
}

#[test]
fn deactivated_chunks_keep_their_mesh() {
    let mut w = world(16, 1);
    w.tick(at_chunk(5, 5), 0.0).unwrap();
    build_all(&mut w);
    let c = ChunkCoord::new(4, 5);
    let mesh = w.mesh(c).unwrap().clone();
    w.tick(at_chunk(9, 5), 0.0).unwrap();
    assert_eq!(w.chunk_state(c), ChunkState::ReadyInactive);
    assert!(!w.is_active(c));
    assert_eq!(w.mesh(c), Some(&mesh));
    w.tick(at_chunk(5, 5), 0.0).unwrap();
    assert_eq!(w.chunk_state(c), ChunkState::ReadyActive);
    assert_eq!(w.chunk(c).unwrap().mesh_version(), 1);
}

#[test]
fn outer_ring_is_never_active() {
    let mut w = world(12, 2);
    w.tick(Vec3::new(0.5, 20.0, 0.5), 0.0).unwrap();
    let active = w.active_chunks();
    assert_eq!(active.len(), 4);
    assert!(active.iter().all(|c| c.cx >= 1 && c.cz >= 1));
    assert_eq!(w.chunk_state(ChunkCoord::new(0, 0)), ChunkState::Absent);
}

#[test]
fn spawn_area_is_ready_before_the_first_tick() {
    let mut w = world(12, 2);
    let spawn = w.spawn_position();
    assert_eq!(spawn, Vec3::new(24.0, 0.0, 24.0));
    let built = w.generate_spawn_area().unwrap();
    assert_eq!(built.len(), 25);
    let s = w.stats();
    assert_eq!((s.allocated, s.populated, s.active, s.queued), (25, 25, 25, 0));
    assert!(s.vertices > 0);
    assert_eq!(s.triangles * 3, s.vertices / 4 * 6);
    let r = w.tick(spawn, 0.016).unwrap();
    assert!(r.view_changed.is_none());
    assert!(r.built.is_empty());
}

proptest! {
    #[test]
    fn unbuilt_world_answers_from_the_rules(x in 4i32..44, y in -2i32..34, z in 4i32..44) {
        let w = world(12, 1);
        let p = Vec3::new(x as f32 + 0.25, y as f32 + 0.5, z as f32 + 0.75);
        let expect = w.catalog().is_solid(w.rules().block_id_at(x, y, z));
        prop_assert_eq!(w.check_for_voxel_solid(p), expect);
    }
}
