//! Move resolution: turns a requested destination into a new arrangement.
//!
//! A move is a single axis-aligned step. When the destination is occupied
//! the occupant is pushed one cell further along the same line, and so on
//! through the whole chain, each pushed block spending its effort from the
//! mover's push strength. The chain either lands its last block on a free
//! cell inside the playfield, in which case every member shifts exactly one
//! step, or the whole move is rejected and nothing changes.
//!
//! Resolution always terminates: every iteration advances the chain cursor
//! onto a cell holding a block not yet in the chain, and an arrangement holds
//! finitely many blocks.

use box_pusher_core::{BlockId, Cell, Direction};
use tracing::{instrument, trace};

use crate::{arrangement::Arrangement, builder::ArrangementBuilder};

#[derive(Clone, Debug)]
struct Shift {
    block: BlockId,
    to: Cell,
}

/// Attempts to move a block onto an adjacent cell.
///
/// Returns the derived arrangement when the move is legal and `None`
/// otherwise. Rejection covers: an unplaced or immovable mover, a
/// destination that is not a unit step away, a chain leaving the playfield,
/// and a chain whose total effort exceeds the mover's push strength or that
/// meets a wall.
///
/// # Panics
///
/// Panics if the derived placements collide, which can only happen when the
/// input arrangement violates its own occupancy invariant.
#[instrument(level = "trace", skip_all, fields(mover = %mover, destination = %destination))]
pub fn attempt_move(
    arrangement: &Arrangement,
    mover: &BlockId,
    destination: Cell,
) -> Option<Arrangement> {
    let chain = plan_push_chain(arrangement, mover, destination)?;

    let derived = chain
        .iter()
        .try_fold(ArrangementBuilder::derive_from(arrangement), |builder, shift| {
            builder.relocate(&shift.block, shift.to)
        })
        .and_then(ArrangementBuilder::build);

    match derived {
        Ok(next) => Some(next),
        Err(error) => panic!("push resolution produced an inconsistent arrangement: {error}"),
    }
}

/// Attempts to move the arrangement's player onto an adjacent cell.
///
/// Returns `None` when no player is placed or the move is illegal.
#[must_use]
pub fn attempt_player_move(arrangement: &Arrangement, destination: Cell) -> Option<Arrangement> {
    let player = arrangement.player()?.id().clone();
    attempt_move(arrangement, &player, destination)
}

/// Attempts to step the arrangement's player one cell in a direction.
#[must_use]
pub fn step_player(arrangement: &Arrangement, direction: Direction) -> Option<Arrangement> {
    let origin = arrangement.player_cell()?;
    attempt_player_move(arrangement, origin.translate(direction.vector()))
}

fn plan_push_chain(
    arrangement: &Arrangement,
    mover: &BlockId,
    destination: Cell,
) -> Option<Vec<Shift>> {
    let block = arrangement.block(mover)?;
    let origin = arrangement.block_cell(mover)?;

    if !block.effort_to_move().is_movable() {
        trace!("immovable pieces never move");
        return None;
    }

    let Some(mut push) = destination.checked_subtract(origin) else {
        trace!(%destination, "displacement exceeds the coordinate range");
        return None;
    };
    if !push.is_unit_step() {
        trace!(%push, "displacement is not a single axis step");
        return None;
    }

    let mut budget = block.push_strength();
    let mut chain = vec![Shift {
        block: mover.clone(),
        to: destination,
    }];
    let mut cursor = destination;

    loop {
        if !arrangement.is_within_playfield(cursor) {
            trace!(%cursor, "chain leaves the playfield");
            return None;
        }

        let Some(occupant) = arrangement.block_at(cursor) else {
            return Some(chain);
        };

        if chain.iter().any(|shift| &shift.block == occupant.id()) {
            trace!(occupant = %occupant.id(), "chain revisits a block");
            return None;
        }

        let Some(remaining) = occupant.effort_to_move().spend(budget) else {
            trace!(occupant = %occupant.id(), budget, "push strength exhausted");
            return None;
        };
        budget = remaining;

        push = occupant.translate_push_vector(push);
        if !push.is_unit_step() {
            trace!(occupant = %occupant.id(), %push, "pushed block leaves the line");
            return None;
        }

        let Some(next) = cursor.checked_translate(push) else {
            trace!(%cursor, "chain runs off the coordinate range");
            return None;
        };
        chain.push(Shift {
            block: occupant.id().clone(),
            to: next,
        });
        cursor = next;
    }
}

#[cfg(test)]
mod tests {
    use box_pusher_core::{Block, Cell};

    use super::*;

    fn line(push_strength: u32, efforts: &[u32]) -> Arrangement {
        let builder = ArrangementBuilder::new()
            .player("@", push_strength, Cell::new(0, 0))
            .expect("player");
        efforts
            .iter()
            .enumerate()
            .try_fold(builder, |builder, (index, effort)| {
                let column = i32::try_from(index).expect("small index") + 1;
                builder.place(
                    Block::movable(format!("B{column}")).with_effort(*effort),
                    Cell::new(0, column),
                )
            })
            .and_then(ArrangementBuilder::build)
            .expect("line builds")
    }

    #[test]
    fn zero_effort_chain_runs_until_free_cell() {
        let arrangement = line(0, &[0, 0, 0, 0, 0]);
        let next = attempt_move(&arrangement, &BlockId::new("@"), Cell::new(0, 1))
            .expect("zero effort blocks move for free");
        assert_eq!(
            next.block_cell(&BlockId::new("B5")),
            Some(Cell::new(0, 6))
        );
    }

    #[test]
    fn heavy_block_stops_chain() {
        let arrangement = line(3, &[1, 3]);
        assert!(attempt_move(&arrangement, &BlockId::new("@"), Cell::new(0, 1)).is_none());

        let arrangement = line(4, &[1, 3]);
        assert!(attempt_move(&arrangement, &BlockId::new("@"), Cell::new(0, 1)).is_some());
    }

    #[test]
    fn unplaced_mover_is_rejected() {
        let arrangement = line(1, &[]);
        assert!(attempt_move(&arrangement, &BlockId::new("nobody"), Cell::new(0, 1)).is_none());
    }

    #[test]
    fn walls_cannot_move_themselves() {
        let arrangement = ArrangementBuilder::new()
            .wall(Cell::new(0, 0))
            .and_then(ArrangementBuilder::build)
            .expect("wall builds");
        assert!(attempt_move(
            &arrangement,
            &BlockId::wall_at(Cell::new(0, 0)),
            Cell::new(0, 1)
        )
        .is_none());
    }

    #[test]
    fn step_player_requires_a_player() {
        let arrangement = ArrangementBuilder::new()
            .movable("A", Cell::new(0, 0))
            .and_then(ArrangementBuilder::build)
            .expect("builds");
        assert!(step_player(&arrangement, Direction::East).is_none());
    }
}
