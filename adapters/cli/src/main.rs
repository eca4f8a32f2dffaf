#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Dungeon Chase experience.

mod input;

use std::{fs, path::PathBuf, thread, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_chase_rendering::{compose_scene, RenderingBackend};
use dungeon_chase_rendering_terminal::TerminalBackend;
use dungeon_chase_system_simulation::{Simulation, TickOutcome};
use dungeon_chase_world::load_world;

use crate::input::InputBridge;

/// Command-line arguments accepted by the Dungeon Chase binary.
#[derive(Debug, Parser)]
#[command(name = "dungeon-chase", about = "Terminal tile-world chase simulation")]
struct Args {
    /// Path of the map file to load.
    #[arg(long, default_value = "world.txt")]
    map: PathBuf,

    /// Milliseconds slept between simulation ticks.
    #[arg(long = "tick-ms", default_value_t = 160)]
    tick_ms: u64,
}

/// Entry point for the Dungeon Chase command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let source = fs::read_to_string(&args.map)
        .with_context(|| format!("failed to read map file {}", args.map.display()))?;
    let mut world = load_world(&source)
        .with_context(|| format!("failed to load map file {}", args.map.display()))?;

    let tick_interval = Duration::from_millis(args.tick_ms);
    let mut simulation = Simulation::new(tick_interval);
    let mut backend = TerminalBackend::new()?;
    let bridge = InputBridge::spawn();
    let mut events = Vec::new();

    loop {
        events.clear();
        let captured = bridge.take_command();
        match simulation.tick(&mut world, captured, &mut events) {
            TickOutcome::Running => {}
            TickOutcome::Quit => break,
        }

        backend.present(&compose_scene(&world))?;
        thread::sleep(tick_interval);
    }

    // The capture thread saw the same quit key and is already unwinding;
    // wait for it before the backend hands the terminal back.
    bridge.join();
    Ok(())
}
