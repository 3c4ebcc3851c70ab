#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Box Pusher engine.
//!
//! This crate defines the value types and message surface that connect
//! adapters, the authoritative world, and pure systems. Adapters submit
//! [`Command`] values describing requested moves, the world resolves them
//! against its current arrangement via its `apply` entry point, and then
//! broadcasts [`Event`] values describing what changed so systems and views
//! can react deterministically.

pub mod geometry;
pub mod pieces;

use serde::{Deserialize, Serialize};

pub use geometry::{Cell, CellBounds, CellRange, CellRangeIter, Direction, Vector};
pub use pieces::{
    Acceptance, Block, BlockId, BlockKind, Effort, Target, TargetId, DEFAULT_EFFORT,
    DEFAULT_PUSH_STRENGTH, WALL_LABEL_PREFIX,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Box Pusher.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Requests that a piece move onto an adjacent cell, pushing whatever
    /// stands in the way.
    MovePiece {
        /// Label of the piece attempting to move.
        piece: BlockId,
        /// Cell the piece should occupy after the move.
        destination: Cell,
    },
    /// Requests that the player piece take one step in a direction.
    StepPlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the world return to the arrangement it started with.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that a block changed cells as part of an accepted move.
    PieceMoved {
        /// Label of the block that moved.
        piece: BlockId,
        /// Cell the block occupied before the move.
        from: Cell,
        /// Cell the block occupies after the move.
        to: Cell,
    },
    /// Announces that a target became satisfied.
    TargetCompleted {
        /// Label of the target.
        target: TargetId,
    },
    /// Announces that a previously satisfied target is no longer satisfied.
    TargetUncompleted {
        /// Label of the target.
        target: TargetId,
    },
    /// Announces that every target is satisfied after an accepted move.
    LevelCompleted,
    /// Reports that a move request was illegal and the arrangement is unchanged.
    MoveRejected {
        /// Label of the piece that attempted to move.
        piece: BlockId,
        /// Cell the piece attempted to reach.
        destination: Cell,
    },
    /// Reports that a player step was requested but no player is placed.
    PlayerMissing,
    /// Confirms that the world returned to its starting arrangement.
    Restarted,
}
