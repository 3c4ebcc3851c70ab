#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for Box Pusher.
//!
//! The world owns the current [`Arrangement`] and the one it started from.
//! Adapters and systems mutate it exclusively through [`apply`], and read it
//! through the functions in [`query`].

mod arrangement;
mod builder;
mod diff;
mod movement;

use box_pusher_core::{BlockId, Cell, Command, Event, WELCOME_BANNER};
use tracing::{debug, instrument};

pub use arrangement::Arrangement;
pub use builder::{ArrangementBuilder, ConstructionError};
pub use diff::{
    moved_blocks, newly_completed_targets, newly_uncompleted_targets, ArrangementDiff, BlockMove,
};
pub use movement::{attempt_move, attempt_player_move, step_player};

/// Represents the authoritative Box Pusher board state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    initial: Arrangement,
    arrangement: Arrangement,
    moves_made: u64,
}

impl World {
    /// Creates a world that starts from the provided arrangement.
    #[must_use]
    pub fn new(arrangement: Arrangement) -> Self {
        Self {
            banner: WELCOME_BANNER,
            initial: arrangement.clone(),
            arrangement,
            moves_made: 0,
        }
    }

    fn resolve_move(&mut self, piece: BlockId, destination: Cell, out_events: &mut Vec<Event>) {
        let Some(next) = attempt_move(&self.arrangement, &piece, destination) else {
            debug!(%piece, %destination, "move rejected");
            out_events.push(Event::MoveRejected { piece, destination });
            return;
        };

        let previous = std::mem::replace(&mut self.arrangement, next);
        self.moves_made = self.moves_made.saturating_add(1);
        debug!(%piece, %destination, moves_made = self.moves_made, "move accepted");

        let diff = ArrangementDiff::new(&previous, &self.arrangement);
        out_events.extend(diff.block_moves().into_iter().map(|block_move| {
            Event::PieceMoved {
                piece: block_move.block,
                from: block_move.from,
                to: block_move.to,
            }
        }));

        let completed = diff.newly_completed_targets();
        let level_completed = !completed.is_empty() && self.arrangement.is_complete();
        out_events.extend(
            completed
                .into_iter()
                .map(|target| Event::TargetCompleted { target }),
        );
        out_events.extend(
            diff.newly_uncompleted_targets()
                .into_iter()
                .map(|target| Event::TargetUncompleted { target }),
        );

        if level_completed {
            debug!(moves_made = self.moves_made, "level completed");
            out_events.push(Event::LevelCompleted);
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
#[instrument(level = "trace", skip_all, fields(command = ?command))]
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MovePiece { piece, destination } => {
            world.resolve_move(piece, destination, out_events);
        }
        Command::StepPlayer { direction } => {
            let player = world
                .arrangement
                .player()
                .map(|player| player.id().clone())
                .zip(world.arrangement.player_cell());
            match player {
                Some((piece, origin)) => {
                    world.resolve_move(piece, origin.translate(direction.vector()), out_events);
                }
                None => {
                    debug!(?direction, "no player to step");
                    out_events.push(Event::PlayerMissing);
                }
            }
        }
        Command::Restart => {
            world.arrangement = world.initial.clone();
            world.moves_made = 0;
            out_events.push(Event::Restarted);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use box_pusher_core::{Block, Cell, CellBounds, Target};

    use super::{Arrangement, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the current arrangement.
    #[must_use]
    pub fn arrangement(world: &World) -> &Arrangement {
        &world.arrangement
    }

    /// Provides read-only access to the arrangement the world started from.
    #[must_use]
    pub fn initial_arrangement(world: &World) -> &Arrangement {
        &world.initial
    }

    /// Cell currently occupied by the player, if one is placed.
    #[must_use]
    pub fn player_cell(world: &World) -> Option<Cell> {
        world.arrangement.player_cell()
    }

    /// Block currently occupying the cell, if any.
    #[must_use]
    pub fn block_at(world: &World, cell: Cell) -> Option<&Block> {
        world.arrangement.block_at(cell)
    }

    /// Target marking the cell, if any.
    #[must_use]
    pub fn target_at(world: &World, cell: Cell) -> Option<&Target> {
        world.arrangement.target_at(cell)
    }

    /// Bounding box of the current arrangement's blocks.
    #[must_use]
    pub fn bounds(world: &World) -> Option<CellBounds> {
        world.arrangement.bounds()
    }

    /// Reports whether every target is currently satisfied.
    #[must_use]
    pub fn is_complete(world: &World) -> bool {
        world.arrangement.is_complete()
    }

    /// Number of accepted moves since the world started or last restarted.
    #[must_use]
    pub fn moves_made(world: &World) -> u64 {
        world.moves_made
    }
}
