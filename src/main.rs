//! Headless simulation runner
//!
//! Generates a world, drops a player in the town, and runs the tick loop
//! for a fixed duration, echoing console messages as they happen.

use clap::{Parser, ValueEnum};
use serde::Serialize;

use mistvale::core::config::SimulationConfig;
use mistvale::core::console::BufferedConsole;
use mistvale::core::error::Result;
use mistvale::ecs::components::Vocation;
use mistvale::ecs::Store;
use mistvale::simulation::{run_tick, spawn_all, spawn_player, Context};
use mistvale::worldgen::{self, MapKind};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MapArg {
    Overworld,
    Dungeon,
    Cave,
}

impl From<MapArg> for MapKind {
    fn from(arg: MapArg) -> Self {
        match arg {
            MapArg::Overworld => MapKind::Overworld,
            MapArg::Dungeon => MapKind::Dungeon,
            MapArg::Cave => MapKind::Cave,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "mistvale", about = "Headless RPG simulation runner")]
struct Args {
    /// Map width in tiles
    #[arg(long, default_value_t = 96)]
    width: usize,

    /// Map height in tiles
    #[arg(long, default_value_t = 96)]
    height: usize,

    /// World seed; identical seeds yield identical maps
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Map layout to generate
    #[arg(long, value_enum, default_value_t = MapArg::Overworld)]
    map: MapArg,

    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Optional TOML config overriding the built-in tuning values
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    summary_out: Option<std::path::PathBuf>,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    width: usize,
    height: usize,
    ticks_run: u32,
    entities_remaining: usize,
    monsters_remaining: usize,
    player_alive: bool,
    player_level: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SimulationConfig::load_from_path(path)?,
        None => SimulationConfig::default(),
    };

    let generated = worldgen::generate(args.width, args.height, args.seed, args.map.into());
    let mut grid = generated.grid;
    let mut store = Store::new();
    let mut console = BufferedConsole::default();

    spawn_all(&mut store, &mut grid, &generated.spawns, 0.0);

    // Drop the player just off the map center, clear of the altar
    let cell_x = args.width as i32 / 2 - 1;
    let cell_y = args.height as i32 / 2 + 1;
    let player_x = cell_x as f32 * grid.tile_size + 6.0;
    let player_y = cell_y as f32 * grid.tile_size + 2.0;
    let player = spawn_player(
        &mut store,
        &mut grid,
        Vocation::Knight,
        player_x,
        player_y,
        &config,
        0.0,
    );

    println!(
        "Generated {}x{} map (seed {}), {} spawns, {} entities",
        args.width,
        args.height,
        args.seed,
        generated.spawns.len(),
        store.entity_count(),
    );

    let dt = 1.0 / 20.0;
    let mut now = 0.0f64;
    let mut ticks_run = 0;
    for tick in 0..args.ticks {
        now = tick as f64 * dt as f64;
        ticks_run = tick + 1;
        let mut ctx = Context {
            store: &mut store,
            grid: &mut grid,
            console: &mut console,
            config: &config,
            now,
        };
        run_tick(&mut ctx, dt);

        for message in console.messages.drain(..) {
            println!("[{now:7.2}] {message}");
        }

        if !store.is_live(player) {
            println!("Player died at t={now:.2}; stopping.");
            break;
        }
    }

    println!(
        "Done after {:.1}s simulated: {} entities remain",
        now,
        store.entity_count(),
    );

    if let Some(health) = store.health(player) {
        let exp = store.experience(player);
        println!(
            "Player: {:.0}/{:.0} health, level {}",
            health.current,
            health.max,
            exp.map(|e| e.level).unwrap_or(1),
        );
    }

    if let Some(path) = &args.summary_out {
        let summary = RunSummary {
            seed: args.seed,
            width: args.width,
            height: args.height,
            ticks_run,
            entities_remaining: store.entity_count(),
            monsters_remaining: store
                .query(&[mistvale::ecs::ComponentKind::Monster])
                .len(),
            player_alive: store.is_live(player),
            player_level: store.experience(player).map(|e| e.level).unwrap_or(0),
        };
        std::fs::write(path, serde_json::to_string_pretty(&summary)?)?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}
