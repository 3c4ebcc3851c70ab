#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system translating player intent into world commands.

use box_pusher_core::{BlockId, Cell, Command, Direction, Event};
use tracing::trace;

/// Input distilled from whatever device the adapter reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlInput {
    /// Step the player one cell in a direction.
    Step(Direction),
    /// Move the player onto the clicked cell.
    Click(Cell),
    /// Return the level to its starting arrangement.
    Restart,
}

/// Control system that emits move and restart commands.
///
/// Once the world reports a completed level, movement input is ignored until
/// a restart is observed.
#[derive(Clone, Debug)]
pub struct Controls {
    player: BlockId,
    level_complete: bool,
}

impl Controls {
    /// Creates a control system driving the labelled player piece.
    #[must_use]
    pub fn new(player: impl Into<BlockId>) -> Self {
        Self {
            player: player.into(),
            level_complete: false,
        }
    }

    /// Reports whether movement input is currently locked out.
    #[must_use]
    pub const fn is_level_complete(&self) -> bool {
        self.level_complete
    }

    /// Consumes world events and one input to emit commands.
    ///
    /// `player_cell` should mirror the world's `query::player_cell` so clicks
    /// can be checked for adjacency.
    pub fn handle(
        &mut self,
        events: &[Event],
        input: ControlInput,
        player_cell: Option<Cell>,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::LevelCompleted => self.level_complete = true,
                Event::Restarted => self.level_complete = false,
                _ => {}
            }
        }

        match input {
            ControlInput::Restart => out.push(Command::Restart),
            _ if self.level_complete => {
                trace!(?input, "level complete; ignoring movement");
            }
            ControlInput::Step(direction) => out.push(Command::StepPlayer { direction }),
            ControlInput::Click(cell) => {
                let adjacent =
                    player_cell.is_some_and(|origin| origin.manhattan_distance(cell) == 1);
                if adjacent {
                    out.push(Command::MovePiece {
                        piece: self.player.clone(),
                        destination: cell,
                    });
                } else {
                    trace!(%cell, "click is not next to the player");
                }
            }
        }
    }
}
