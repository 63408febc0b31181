#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the maze chase simulation headlessly.

mod autopilot;
mod frame;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use maze_chase_core::{Command, Event, GamePhase};
use maze_chase_maze::MazeLayout;
use maze_chase_world::{self as world, query, SimulationConfig, World};

use crate::autopilot::Autopilot;

#[derive(Parser, Debug)]
#[command(
    name = "maze-chase",
    version,
    about = "Run the maze chase simulation with a seeded autopilot"
)]
struct Cli {
    /// Maze layout text file; the built-in maze is used when omitted.
    #[arg(long)]
    layout: Option<PathBuf>,
    /// JSON simulation config; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the starting lives from the config.
    #[arg(long)]
    lives: Option<u32>,
    /// Seed for the autopilot's turn choices.
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Simulated time to run in milliseconds.
    #[arg(long, default_value_t = 60_000)]
    duration_ms: u64,
    /// Host frame length in milliseconds.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    frame_ms: u64,
    /// Draw the maze every N frames; 0 disables drawing.
    #[arg(long, default_value_t = 40)]
    render_every: u64,
    /// Print only the final snapshot as JSON.
    #[arg(long)]
    json: bool,
}

/// Entry point for the maze chase command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let layout = load_layout(cli.layout.as_deref())?;
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(lives) = cli.lives {
        config.starting_lives = lives;
    }
    let mut world = World::with_config(layout, config).context("invalid simulation config")?;
    let mut autopilot = Autopilot::new(cli.seed);

    let frame_length = Duration::from_millis(cli.frame_ms);
    let frames = cli.duration_ms / cli.frame_ms;
    let mut events = Vec::new();
    world::apply(&mut world, Command::Start, &mut events);
    info!(
        "running {frames} frames of {frame_length:?} with seed {}",
        cli.seed
    );

    for index in 0..frames {
        if let Some(direction) = autopilot.steer(query::maze(&world), query::player(&world)) {
            world::apply(
                &mut world,
                Command::RequestDirection { direction },
                &mut events,
            );
        }
        world::apply(&mut world, Command::Tick { dt: frame_length }, &mut events);

        if !cli.json {
            for event in events.iter().filter_map(describe) {
                println!("{event}");
            }
            if cli.render_every > 0 && index % cli.render_every == 0 {
                println!("{}", frame::render(&world));
            }
        }
        events.clear();

        if query::phase(&world) == GamePhase::GameOver {
            break;
        }
    }

    let snapshot = query::snapshot(&world);
    if cli.json {
        let json =
            serde_json::to_string_pretty(&snapshot).context("failed to encode final snapshot")?;
        println!("{json}");
    } else {
        println!("{}", frame::render(&world));
        println!(
            "final score {} on level {} with {} lives left ({:?})",
            snapshot.stats.score,
            snapshot.stats.level,
            snapshot.stats.lives_remaining,
            snapshot.phase
        );
    }

    Ok(())
}

fn load_layout(path: Option<&Path>) -> Result<MazeLayout> {
    let Some(path) = path else {
        return Ok(MazeLayout::classic());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout {}", path.display()))?;
    MazeLayout::parse(&text).with_context(|| format!("invalid layout {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// One-line description of the events worth printing.
fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::PowerPelletEaten { position } => {
            format!("power pellet eaten at ({}, {})", position.row(), position.column())
        }
        Event::GhostEaten {
            ghost,
            streak_index,
            points,
        } => format!("{ghost:?} eaten (#{streak_index}) for {points} points"),
        Event::GhostRevived { ghost } => format!("{ghost:?} back in play"),
        Event::GlobalModeChanged { mode } => format!("ghosts switch to {mode:?}"),
        Event::FrightenedEnded { mode } => format!("frightened window over, ghosts {mode:?}"),
        Event::PlayerDied { lives_remaining } => {
            format!("player caught, {lives_remaining} lives left")
        }
        Event::LevelCompleted { level } => format!("level {level} begins"),
        Event::GameOver { final_score } => format!("game over with {final_score} points"),
        Event::PhaseChanged { phase } => format!("phase {phase:?}"),
        Event::TimeAdvanced { .. }
        | Event::PlayerMoved { .. }
        | Event::GhostMoved { .. }
        | Event::PelletEaten { .. } => return None,
    };
    Some(line)
}
