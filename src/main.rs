use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use skog::{
    config::GameConfig,
    display::terminal::{TerminalDisplay, TerminalSession},
    engine::EngineBuilder,
    map::load_map,
    orchestrator::{run_on_simulation_thread, Orchestrator},
    telemetry,
    world::GameState,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "A small forest that grows while you chop it down")]
struct Cli {
    /// Map name under the maps directory, or a path to a map file
    map: Option<String>,

    /// Path to a YAML config file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the maps directory
    #[arg(long)]
    maps_dir: Option<PathBuf>,

    /// Fix the random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many ticks without a display and print a JSON summary
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(dir) = cli.maps_dir {
        config.maps.dir = dir;
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }

    let map_path = config.map_path(cli.map.as_deref());
    let map = load_map(&map_path)?;

    telemetry::init(&config.logging)?;
    let seed = config.simulation.seed.unwrap_or_else(rand::random);
    let mut engine = EngineBuilder::standard(&config, seed).build();
    let mut state = GameState::new(map, config.roamer.vision_radius);
    let planted = state.populate(&config.population, &mut engine.rng().stream("populate"));
    info!(
        map = %map_path.display(),
        width = state.grid.width(),
        height = state.grid.height(),
        seed,
        planted,
        "world ready"
    );

    if let Some(ticks) = cli.headless {
        engine.run(&mut state, ticks)?;
        println!("{}", serde_json::to_string_pretty(&state.summary())?);
        return Ok(());
    }

    let session = TerminalSession::enter()?;
    let display = TerminalDisplay::new()?;
    let orchestrator = Orchestrator::new(engine, state, display, config.tick_period());
    let result = run_on_simulation_thread(orchestrator);
    drop(session);

    let summary = result?;
    println!(
        "Final score {} after {} ticks. The roamer planted {} seeds.",
        summary.score, summary.ticks, summary.roamer_plantings
    );
    Ok(())
}
