//! Plain-text views of events and boards.

use box_pusher_core::{Cell, Event};
use box_pusher_world::Arrangement;

const WALL: char = 'X';
const FLOOR: char = ' ';

/// One-line description of a world event.
pub(crate) fn describe(event: &Event) -> String {
    match event {
        Event::PieceMoved { piece, from, to } => format!("moved {piece} from {from} to {to}"),
        Event::TargetCompleted { target } => format!("target {target} completed"),
        Event::TargetUncompleted { target } => format!("target {target} uncompleted"),
        Event::LevelCompleted => "level completed".to_owned(),
        Event::MoveRejected { piece, destination } => {
            format!("rejected move of {piece} to {destination}")
        }
        Event::PlayerMissing => "no player to move".to_owned(),
        Event::Restarted => "level restarted".to_owned(),
    }
}

/// Draws the arrangement in the same notation levels are written in.
///
/// Blocks hide the targets beneath them. Unbounded arrangements are drawn
/// over their bounding box.
pub(crate) fn board(arrangement: &Arrangement) -> String {
    let Some(area) = arrangement.playfield().or(arrangement.bounds()) else {
        return String::new();
    };

    (area.min().row()..=area.max().row())
        .map(|row| {
            (area.min().column()..=area.max().column())
                .map(|column| symbol_at(arrangement, Cell::new(row, column)))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn symbol_at(arrangement: &Arrangement, cell: Cell) -> char {
    if let Some(block) = arrangement.block_at(cell) {
        if block.is_wall() {
            return WALL;
        }
        return block.id().as_str().chars().next().unwrap_or(FLOOR);
    }
    arrangement
        .target_at(cell)
        .and_then(|target| target.id().as_str().chars().next())
        .unwrap_or(FLOOR)
}

#[cfg(test)]
mod tests {
    use box_pusher_system_level::{LevelDefinition, PlayerSettings};

    use super::*;

    #[test]
    fn board_round_trips_level_notation() {
        let text = "XXXXX\nX@AaX\nX b X\nXXXXX";
        let arrangement = LevelDefinition::parse(text)
            .and_then(|level| level.to_arrangement(PlayerSettings::default()))
            .expect("level builds");
        assert_eq!(board(&arrangement), text);
    }

    #[test]
    fn padded_rows_render_as_walls() {
        let arrangement = LevelDefinition::parse("XXX\nX@")
            .and_then(|level| level.to_arrangement(PlayerSettings::default()))
            .expect("level builds");
        assert_eq!(board(&arrangement), "XXX\nX@X");
    }
}
