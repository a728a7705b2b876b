use terravox_blocks::{BEDROCK, BlockId};
use terravox_chunk::ChunkError;
use terravox_geom::Vec3;
use terravox_runtime::{ChunkEvent, EditOutcome, World};

const DT: f32 = 1.0 / 60.0;

pub struct WalkPlan {
    pub ticks: u32,
    pub speed: f32,
    pub edit_every: u32,
}

#[derive(Default, Debug)]
pub struct WalkSummary {
    pub spawn_built: usize,
    pub built: usize,
    pub view_changes: usize,
    pub edits_applied: usize,
    pub edits_ignored: usize,
    pub meshed_events: usize,
    pub activated_events: usize,
    pub deactivated_events: usize,
}

/// Walks an observer from the spawn point along +x, ticking the world and
/// draining its event feed the way a renderer would.
pub fn run(world: &mut World, plan: &WalkPlan) -> Result<WalkSummary, ChunkError> {
    let events = world.subscribe();
    let mut summary = WalkSummary {
        spawn_built: world.generate_spawn_area()?.len(),
        ..WalkSummary::default()
    };
    let place: BlockId = world.catalog().id_by_name("stone").unwrap_or(BEDROCK);
    let mut observer = world.spawn_position();

    for tick in 1..=plan.ticks {
        observer += Vec3::new(plan.speed, 0.0, 0.0);
        let report = world.tick(observer, DT)?;
        summary.built += report.built.len();
        if report.view_changed.is_some() {
            summary.view_changes += 1;
        }
        if plan.edit_every > 0 && tick % plan.edit_every == 0 {
            match world.request_edit(observer + Vec3::new(0.0, -1.0, 0.0), place)? {
                EditOutcome::Applied { .. } => summary.edits_applied += 1,
                _ => summary.edits_ignored += 1,
            }
        }
        for ev in events.try_iter() {
            match ev {
                ChunkEvent::Meshed { .. } => summary.meshed_events += 1,
                ChunkEvent::Activated(_) => summary.activated_events += 1,
                ChunkEvent::Deactivated(_) => summary.deactivated_events += 1,
            }
        }
    }
    Ok(summary)
}

impl WalkSummary {
    pub fn log(&self, world: &World) {
        let s = world.stats();
        log::info!(
            "{} ticks: {} chunks allocated, {} built ({} at spawn), {} active, {} queued",
            s.ticks,
            s.allocated,
            s.populated,
            self.spawn_built,
            s.active,
            s.queued
        );
        log::info!(
            "meshes: {} vertices, {} triangles; {} view changes, edits {} applied / {} ignored",
            s.vertices,
            s.triangles,
            self.view_changes,
            self.edits_applied,
            self.edits_ignored
        );
        log::debug!(
            "events: {} meshed, {} activated, {} deactivated",
            self.meshed_events,
            self.activated_events,
            self.deactivated_events
        );
    }
}
