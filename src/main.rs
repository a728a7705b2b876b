use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use terravox_blocks::BlockCatalog;
use terravox_runtime::World;
use terravox_world::WorldGenConfig;

mod walk;

#[derive(Parser, Debug)]
#[command(name = "terravox", about = "Headless voxel world streaming run")]
struct Cli {
    /// Block catalog TOML
    #[arg(long, default_value = "assets/voxels/blocks.toml")]
    blocks: PathBuf,
    /// Terrain and world size TOML
    #[arg(long, default_value = "assets/voxels/worldgen.toml")]
    worldgen: PathBuf,
    #[arg(long, default_value_t = 120)]
    ticks: u32,
    /// Observer speed along +x, in voxels per tick
    #[arg(long, default_value_t = 0.5)]
    speed: f32,
    /// Overrides `view_distance_in_chunks` from the worldgen file
    #[arg(long)]
    view_distance: Option<i32>,
    /// Place a block under the observer every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    edit_every: u32,
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let catalog = BlockCatalog::load_from_path(&cli.blocks)?;
    let mut cfg = WorldGenConfig::load_from_path(&cli.worldgen)?;
    if let Some(vd) = cli.view_distance {
        cfg.view_distance_in_chunks = vd;
    }
    log::info!(
        "loaded {} blocks from {} and {} lodes from {}",
        catalog.len(),
        cli.blocks.display(),
        cfg.lodes.len(),
        cli.worldgen.display()
    );
    let mut world = World::new(catalog, &cfg)?;
    let plan = walk::WalkPlan {
        ticks: cli.ticks,
        speed: cli.speed,
        edit_every: cli.edit_every,
    };
    let summary = walk::run(&mut world, &plan)?;
    summary.log(&world);
    Ok(())
}
