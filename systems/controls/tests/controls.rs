use box_pusher_core::{BlockId, Cell, Command, Direction, Event, Target};
use box_pusher_system_controls::{ControlInput, Controls};
use box_pusher_world::{self as world, query, ArrangementBuilder, World};

#[test]
fn steps_become_player_commands() {
    let mut controls = Controls::new("@");
    let mut commands = Vec::new();

    controls.handle(
        &[],
        ControlInput::Step(Direction::South),
        Some(Cell::new(0, 0)),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::StepPlayer {
            direction: Direction::South,
        }]
    );
}

#[test]
fn adjacent_clicks_move_the_player() {
    let mut controls = Controls::new("@");
    let mut commands = Vec::new();

    controls.handle(
        &[],
        ControlInput::Click(Cell::new(2, 3)),
        Some(Cell::new(2, 2)),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::MovePiece {
            piece: BlockId::new("@"),
            destination: Cell::new(2, 3),
        }]
    );
}

#[test]
fn clicks_across_the_coordinate_range_are_not_adjacent() {
    let mut controls = Controls::new("@");
    let mut commands = Vec::new();

    controls.handle(
        &[],
        ControlInput::Click(Cell::new(0, i32::MIN)),
        Some(Cell::new(0, i32::MAX)),
        &mut commands,
    );
    assert!(commands.is_empty(), "unexpected commands: {commands:?}");

    controls.handle(
        &[],
        ControlInput::Click(Cell::new(1, i32::MAX)),
        Some(Cell::new(0, i32::MAX)),
        &mut commands,
    );
    assert_eq!(commands.len(), 1);
}

#[test]
fn distant_or_diagonal_clicks_are_ignored() {
    let mut controls = Controls::new("@");
    let mut commands = Vec::new();

    for cell in [Cell::new(2, 4), Cell::new(3, 3), Cell::new(2, 2)] {
        controls.handle(
            &[],
            ControlInput::Click(cell),
            Some(Cell::new(2, 2)),
            &mut commands,
        );
    }
    controls.handle(
        &[],
        ControlInput::Click(Cell::new(0, 1)),
        None,
        &mut commands,
    );

    assert!(commands.is_empty(), "unexpected commands: {commands:?}");
}

#[test]
fn completed_level_only_accepts_restart() {
    let mut controls = Controls::new("@");
    let mut commands = Vec::new();

    controls.handle(
        &[Event::LevelCompleted],
        ControlInput::Step(Direction::East),
        Some(Cell::new(0, 0)),
        &mut commands,
    );
    assert!(commands.is_empty(), "movement must be locked after completion");
    assert!(controls.is_level_complete());

    controls.handle(
        &[],
        ControlInput::Restart,
        Some(Cell::new(0, 0)),
        &mut commands,
    );
    assert_eq!(commands, vec![Command::Restart]);

    commands.clear();
    controls.handle(
        &[Event::Restarted],
        ControlInput::Step(Direction::East),
        Some(Cell::new(0, 0)),
        &mut commands,
    );
    assert_eq!(
        commands,
        vec![Command::StepPlayer {
            direction: Direction::East,
        }]
    );
}

#[test]
fn controls_drive_world_to_completion() {
    let arrangement = ArrangementBuilder::new()
        .player("@", 1, Cell::new(0, 0))
        .and_then(|builder| builder.movable("A", Cell::new(0, 1)))
        .and_then(|builder| builder.target(Target::new("t"), Cell::new(0, 3)))
        .and_then(ArrangementBuilder::build)
        .expect("arrangement builds");
    let mut world = World::new(arrangement);
    let mut controls = Controls::new("@");
    let mut events: Vec<Event> = Vec::new();

    let script = [
        ControlInput::Step(Direction::East),
        ControlInput::Click(Cell::new(0, 2)),
        ControlInput::Step(Direction::East),
    ];

    for input in script {
        let mut commands = Vec::new();
        controls.handle(&events, input, query::player_cell(&world), &mut commands);
        events.clear();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
    }

    assert!(query::is_complete(&world));
    assert_eq!(query::player_cell(&world), Some(Cell::new(0, 2)));
    assert!(
        controls.is_level_complete(),
        "final step should be ignored after completion"
    );
    assert!(events.is_empty());
}
