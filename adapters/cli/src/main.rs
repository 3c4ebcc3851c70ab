#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays a move script against a Box Pusher level.

mod config;
mod render;
mod script;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use box_pusher_system_controls::{ControlInput, Controls};
use box_pusher_system_level::{LevelDefinition, PlayerSettings, PLAYER_LABEL};
use box_pusher_system_progress::Progress;
use box_pusher_world::{self as world, query, World};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const BUILT_IN_LEVEL: &str = "\
XXXXXXX
X@ A aX
X  B  X
X   b X
XXXXXXX";

/// Box Pusher: push every block onto its target.
#[derive(Parser, Debug)]
#[command(name = "box-pusher", version)]
struct Cli {
    /// Level file to load instead of the built-in level.
    #[arg(long)]
    level: Option<PathBuf>,

    /// TOML file providing `push_strength` and `player_effort`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the player's push strength.
    #[arg(long)]
    push_strength: Option<u32>,

    /// Moves to replay, as N/E/S/W or U/R/D/L letters.
    moves: Vec<String>,
}

/// Entry point for the Box Pusher command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    let mut settings = PlayerSettings::default();
    if let Some(path) = &cli.config {
        settings = Config::load(path)?.apply(settings);
    }
    if let Some(push_strength) = cli.push_strength {
        settings.push_strength = push_strength;
    }

    let level_text = match &cli.level {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read level file {}", path.display()))?,
        None => BUILT_IN_LEVEL.to_owned(),
    };
    let level = LevelDefinition::parse(&level_text).context("failed to parse level")?;
    let arrangement = level
        .to_arrangement(settings)
        .context("failed to build level arrangement")?;
    let directions =
        script::parse_script(cli.moves.iter().map(String::as_str)).context("invalid move script")?;
    info!(
        width = level.width(),
        height = level.height(),
        moves = directions.len(),
        push_strength = settings.push_strength,
        "starting replay"
    );

    let mut world = World::new(arrangement);
    let mut controls = Controls::new(PLAYER_LABEL);
    let initial = query::arrangement(&world);
    let mut progress =
        Progress::new(initial.target_count(), initial.satisfied_targets()).with_player(PLAYER_LABEL);

    println!("{}", query::welcome_banner(&world));

    let mut events = Vec::new();
    for direction in directions {
        let mut commands = Vec::new();
        controls.handle(
            &events,
            ControlInput::Step(direction),
            query::player_cell(&world),
            &mut commands,
        );
        events.clear();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
        for event in &events {
            println!("{}", render::describe(event));
        }
        progress.handle(&events);
    }

    println!("{}", render::board(query::arrangement(&world)));
    let report = progress.report();
    println!(
        "targets {}/{}, moves {}{}",
        report.satisfied,
        report.total,
        report.moves,
        if report.complete { ", complete" } else { "" }
    );

    Ok(())
}
