#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic progress tracking derived purely from world events.

use std::collections::BTreeSet;

use box_pusher_core::{BlockId, Event, TargetId};
use tracing::debug;

/// Snapshot of how far the player is through the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressReport {
    /// Targets currently satisfied.
    pub satisfied: usize,
    /// Targets in the level.
    pub total: usize,
    /// Whether every target is satisfied.
    pub complete: bool,
    /// Accepted moves since the level started or was restarted.
    pub moves: u64,
}

/// Pure system folding target and movement events into a progress report.
#[derive(Clone, Debug)]
pub struct Progress {
    total: usize,
    initial: BTreeSet<TargetId>,
    satisfied: BTreeSet<TargetId>,
    player: Option<BlockId>,
    moves: u64,
}

impl Progress {
    /// Creates a tracker for `total` targets, seeded with those already satisfied.
    #[must_use]
    pub fn new<'a>(total: usize, satisfied: impl IntoIterator<Item = &'a TargetId>) -> Self {
        let initial: BTreeSet<TargetId> = satisfied.into_iter().cloned().collect();
        Self {
            total,
            satisfied: initial.clone(),
            initial,
            player: None,
            moves: 0,
        }
    }

    /// Counts moves only when the labelled player changes cells.
    ///
    /// Without a player every batch of events containing a movement counts
    /// as one move.
    #[must_use]
    pub fn with_player(mut self, player: impl Into<BlockId>) -> Self {
        self.player = Some(player.into());
        self
    }

    /// Folds one batch of world events, as produced by a single command.
    pub fn handle(&mut self, events: &[Event]) {
        let mut moved = false;
        let mut completed = false;

        for event in events {
            match event {
                Event::PieceMoved { piece, .. } => {
                    moved |= self.player.as_ref().map_or(true, |player| player == piece);
                }
                Event::TargetCompleted { target } => {
                    let _ = self.satisfied.insert(target.clone());
                }
                Event::TargetUncompleted { target } => {
                    let _ = self.satisfied.remove(target);
                }
                Event::Restarted => {
                    self.satisfied = self.initial.clone();
                    self.moves = 0;
                }
                Event::LevelCompleted => completed = true,
                Event::MoveRejected { .. } | Event::PlayerMissing => {}
            }
        }

        if moved {
            self.moves = self.moves.saturating_add(1);
        }
        if completed {
            debug!(moves = self.moves, "level completed");
        }
    }

    /// Current progress.
    #[must_use]
    pub fn report(&self) -> ProgressReport {
        let satisfied = self.satisfied.len();
        ProgressReport {
            satisfied,
            total: self.total,
            complete: satisfied >= self.total,
            moves: self.moves,
        }
    }
}
