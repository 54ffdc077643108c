//! Headless city runner: builds (or loads) a city, runs a fixed number of
//! simulation ticks, prints the debug snapshot as JSON on stdout and
//! optionally writes a save.

mod demo_city;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;

use save::{read_save_file, write_save_file, SaveData, SaveFormat, SavePlugin};
use simulation::config::{DEFAULT_SEED, GRID_HEIGHT, GRID_WIDTH};
use simulation::debug_snapshot::snapshot_from_world;
use simulation::economy::CityBudget;
use simulation::game_actions::ActionResultLog;
use simulation::grid::WorldGrid;
use simulation::sim_rng::SimRng;
use simulation::terrain::generate_terrain;
use simulation::SimulationPlugin;

/// Headless tile-city simulation runner
#[derive(Parser, Debug)]
#[command(name = "tilecity")]
#[command(about = "Run the city simulation headless and print a debug snapshot")]
struct Args {
    /// Simulation ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Seed for terrain and growth
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Grid width for a new city
    #[arg(long, default_value_t = GRID_WIDTH)]
    width: usize,

    /// Grid height for a new city
    #[arg(long, default_value_t = GRID_HEIGHT)]
    height: usize,

    /// Starting funds for a new city
    #[arg(long)]
    funds: Option<f64>,

    /// Load this save (JSON or binary, detected from content) instead of
    /// building a new city
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write a save here after the run; `.json` selects JSON, anything
    /// else the binary format
    #[arg(long)]
    save: Option<PathBuf>,

    /// Skip terrain generation for a new city
    #[arg(long)]
    flat: bool,

    /// Do not queue the scripted demo town
    #[arg(long)]
    empty: bool,

    /// Log at debug level (rejected tool actions, growth details)
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tilecity: {err}");
            ExitCode::FAILURE
        }
    }
}

fn build_app(args: &Args) -> App {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(LogPlugin {
        level,
        ..default()
    });

    // Inserted before the plugin so its init_resource calls keep them.
    app.insert_resource(WorldGrid::new(args.width, args.height))
        .insert_resource(SimRng::from_seed_u64(args.seed));
    if let Some(funds) = args.funds {
        app.insert_resource(CityBudget::with_funds(funds));
    }
    app.add_plugins((SimulationPlugin, SavePlugin));

    // Initial update so Startup systems execute and resources initialize.
    app.update();
    app
}

fn save_format_for(path: &Path) -> SaveFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => SaveFormat::Json,
        _ => SaveFormat::Binary,
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut app = build_app(args);
    let world = app.world_mut();

    if let Some(path) = &args.load {
        let data = read_save_file(path)?;
        info!(
            "Loaded {} at tick {} ({} buildings)",
            path.display(),
            data.clock.tick,
            data.registry.len()
        );
        data.restore(world);
    } else {
        if !args.flat {
            // fastnoise-lite seeds are i32; the high bits are dropped.
            generate_terrain(&mut world.resource_mut::<WorldGrid>(), args.seed as i32);
        }
        if !args.empty {
            demo_city::queue_demo_city(world, (4, 4));
        }
    }

    for _ in 0..args.ticks {
        world.run_schedule(FixedUpdate);
    }

    let log = world.resource::<ActionResultLog>();
    let rejected = log.last_n(log.len()).iter().filter(|(_, r)| !r.is_success()).count();
    if rejected > 0 {
        warn!("{rejected} of {} logged tool actions were rejected", log.len());
    }

    let snapshot = snapshot_from_world(world).ok_or("simulation resources missing")?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if let Some(path) = &args.save {
        let format = save_format_for(path);
        write_save_file(path, &SaveData::capture(world)?, format)?;
        info!("Saved {} ({:?})", path.display(), format);
    }

    Ok(())
}
