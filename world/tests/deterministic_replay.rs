use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use box_pusher_core::{BlockId, Cell, Command, Direction, Event, Target};
use box_pusher_world::{self as world, query, ArrangementBuilder, World};

#[test]
fn deterministic_replay_produces_identical_logs() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(
        first.fingerprint(),
        second.fingerprint(),
        "fingerprints diverged between runs"
    );
}

#[test]
fn scripted_replay_solves_the_level() {
    let outcome = replay(scripted_commands());

    assert!(
        outcome.events.contains(&Event::LevelCompleted),
        "script should complete the level: {:?}",
        outcome.events
    );
    assert_eq!(outcome.player, Some(Cell::new(1, 3)));
    assert_eq!(outcome.moves_made, 4);
}

fn level() -> World {
    let arrangement = ArrangementBuilder::new()
        .wall_segment(Cell::new(0, 0), Cell::new(0, 5))
        .and_then(|builder| builder.wall_segment(Cell::new(3, 0), Cell::new(3, 5)))
        .and_then(|builder| builder.wall_segment(Cell::new(1, 0), Cell::new(2, 0)))
        .and_then(|builder| builder.wall_segment(Cell::new(1, 5), Cell::new(2, 5)))
        .and_then(|builder| builder.player("@", 1, Cell::new(1, 1)))
        .and_then(|builder| builder.movable("A", Cell::new(1, 2)))
        .and_then(|builder| builder.target(Target::for_block("a", "A"), Cell::new(1, 4)))
        .and_then(ArrangementBuilder::build)
        .expect("level builds");
    World::new(arrangement)
}

fn scripted_commands() -> Vec<Command> {
    vec![
        Command::StepPlayer {
            direction: Direction::North,
        },
        Command::StepPlayer {
            direction: Direction::East,
        },
        Command::MovePiece {
            piece: BlockId::new("@"),
            destination: Cell::new(2, 2),
        },
        Command::MovePiece {
            piece: BlockId::new("@"),
            destination: Cell::new(1, 2),
        },
        Command::StepPlayer {
            direction: Direction::East,
        },
    ]
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut world = level();
    let mut events = Vec::new();

    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    ReplayOutcome {
        player: query::player_cell(&world),
        moves_made: query::moves_made(&world),
        events,
    }
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    player: Option<Cell>,
    moves_made: u64,
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.player.hash(&mut hasher);
        self.moves_made.hash(&mut hasher);
        format!("{:?}", self.events).hash(&mut hasher);
        hasher.finish()
    }
}
