use box_pusher_core::{BlockId, Cell, Direction, TargetId};
use box_pusher_system_level::{LevelDefinition, LevelError, PlayerSettings, PLAYER_LABEL};
use box_pusher_world::{step_player, ArrangementDiff};

const WAREHOUSE: &str = "\
X
X  @cX
XA a X
XXB X
XXXXXX";

fn warehouse() -> LevelDefinition {
    LevelDefinition::parse(WAREHOUSE).expect("warehouse parses")
}

#[test]
fn dimensions_follow_longest_row() {
    let level = warehouse();
    assert_eq!(level.width(), 6);
    assert_eq!(level.height(), 5);
}

#[test]
fn short_rows_are_padded_with_walls() {
    let level = warehouse();
    assert!(level.is_wall(0, 0));
    assert!(level.is_wall(0, 1), "cell past a short row is a wall");
    assert!(!level.is_wall(1, 1));
    assert!(!level.is_wall(2, 2));
    assert!(!level.is_wall(3, 3));
    assert!(level.is_wall(3, 4));
    assert!(level.is_wall(3, 5), "cell past a short row is a wall");
    assert!(level.is_wall(4, 4));
    assert!(level.is_wall(9, 9), "cells outside the level are walls");
}

#[test]
fn pieces_are_located() {
    let level = warehouse();
    assert_eq!(level.player_cell(), Some(Cell::new(1, 3)));
    assert_eq!(
        level.block_cells().get(&BlockId::new("A")),
        Some(&Cell::new(2, 1))
    );
    assert_eq!(
        level.block_cells().get(&BlockId::new("B")),
        Some(&Cell::new(3, 2))
    );
    assert_eq!(
        level.target_cells().get(&TargetId::new("a")),
        Some(&Cell::new(2, 3))
    );
    assert_eq!(
        level.target_cells().get(&TargetId::new("c")),
        Some(&Cell::new(1, 4))
    );
}

#[test]
fn blocks_link_to_matching_targets_only() {
    let level = warehouse();
    let links = level.block_target_links();
    assert_eq!(links.get(&BlockId::new("A")), Some(&TargetId::new("a")));
    assert_eq!(links.get(&BlockId::new("B")), None);
    assert_eq!(links.len(), 1);
}

#[test]
fn parse_errors_are_reported() {
    assert_eq!(LevelDefinition::parse(""), Err(LevelError::Empty));
    assert_eq!(
        LevelDefinition::parse("@ @"),
        Err(LevelError::MultiplePlayers {
            first: Cell::new(0, 0),
            second: Cell::new(0, 2),
        })
    );
    assert_eq!(
        LevelDefinition::parse("A\nXA"),
        Err(LevelError::DuplicateBlock {
            label: 'A',
            first: Cell::new(0, 0),
            second: Cell::new(1, 1),
        })
    );
    assert!(matches!(
        LevelDefinition::parse("bb"),
        Err(LevelError::DuplicateTarget { label: 'b', .. })
    ));
}

#[test]
fn hash_marks_walls_too() {
    let level = LevelDefinition::parse("#@#").expect("parses");
    assert!(level.is_wall(0, 0));
    assert!(!level.is_wall(0, 1));
    assert!(level.is_wall(0, 2));
}

#[test]
fn arrangement_places_walls_pieces_and_playfield() {
    let level = warehouse();
    let arrangement = level
        .to_arrangement(PlayerSettings::default())
        .expect("arrangement builds");

    assert_eq!(arrangement.player_cell(), Some(Cell::new(1, 3)));
    assert_eq!(
        arrangement
            .player()
            .map(|player| player.id().clone()),
        Some(BlockId::new(PLAYER_LABEL))
    );
    assert!(arrangement
        .block_at(Cell::new(0, 4))
        .is_some_and(|block| block.is_wall()));
    assert!(arrangement.block_at(Cell::new(1, 1)).is_none());
    assert_eq!(arrangement.target_count(), 2);
    assert_eq!(
        arrangement.playfield().map(|bounds| bounds.max()),
        Some(Cell::new(4, 5))
    );
}

#[test]
fn linked_target_rejects_other_blocks() {
    let level = LevelDefinition::parse("XXXXXX\nX@BaAX\nXXXXXX").expect("parses");
    let arrangement = level
        .to_arrangement(PlayerSettings::default())
        .expect("arrangement builds");

    let after = step_player(&arrangement, Direction::East).expect("push succeeds");
    assert!(
        ArrangementDiff::new(&arrangement, &after)
            .newly_completed_targets()
            .is_empty(),
        "target a only accepts block A"
    );
    assert_eq!(after.block_cell(&BlockId::new("B")), Some(Cell::new(1, 3)));
}

#[test]
fn push_strength_comes_from_settings() {
    let level = LevelDefinition::parse("X@ABcX").expect("parses");

    let weak = level
        .to_arrangement(PlayerSettings {
            push_strength: 1,
            ..PlayerSettings::default()
        })
        .expect("builds");
    assert!(step_player(&weak, Direction::East).is_none());

    let strong = level
        .to_arrangement(PlayerSettings {
            push_strength: 2,
            ..PlayerSettings::default()
        })
        .expect("builds");
    let after = step_player(&strong, Direction::East).expect("strength 2 pushes two blocks");
    assert_eq!(
        ArrangementDiff::new(&strong, &after).newly_completed_targets(),
        vec![TargetId::new("c")]
    );
}

#[test]
fn player_cannot_leave_the_level() {
    let level = LevelDefinition::parse("@ A").expect("parses");
    let arrangement = level
        .to_arrangement(PlayerSettings {
            push_strength: 5,
            ..PlayerSettings::default()
        })
        .expect("builds");

    assert!(step_player(&arrangement, Direction::North).is_none());
    assert!(step_player(&arrangement, Direction::West).is_none());
    let moved = step_player(&arrangement, Direction::East).expect("free cell");
    assert!(
        step_player(&moved, Direction::East).is_none(),
        "block A sits on the right edge"
    );
}
