use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use maze_chase_core::{Command, Direction, Event, Snapshot};
use maze_chase_world::{self as world, query, World};

#[test]
fn deterministic_replay_produces_identical_logs() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(
        first
            .events
            .iter()
            .any(|event| matches!(event, Event::PlayerMoved { .. })),
        "script should move the player"
    );
    assert!(first
        .events
        .iter()
        .any(|event| matches!(event, Event::GhostMoved { .. })));
}

#[test]
fn tick_granularity_does_not_change_the_outcome() {
    let coarse = replay(vec![
        Command::Start,
        Command::RequestDirection {
            direction: Direction::Left,
        },
        Command::Tick {
            dt: Duration::from_millis(3_000),
        },
    ]);
    let fine = replay(
        [
            Command::Start,
            Command::RequestDirection {
                direction: Direction::Left,
            },
        ]
        .into_iter()
        .chain((0..300).map(|_| Command::Tick {
            dt: Duration::from_millis(10),
        }))
        .collect(),
    );

    assert_eq!(coarse.snapshot, fine.snapshot);
    assert_eq!(
        gameplay_events(&coarse.events),
        gameplay_events(&fine.events)
    );
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new();
    let mut events = Vec::new();

    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    ReplayOutcome {
        snapshot: query::snapshot(&world),
        events,
    }
}

fn gameplay_events(events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|event| !matches!(event, Event::TimeAdvanced { .. }))
        .cloned()
        .collect()
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = vec![
        Command::Start,
        Command::RequestDirection {
            direction: Direction::Left,
        },
    ];
    commands.extend(ticks(250, 12));
    commands.push(Command::RequestDirection {
        direction: Direction::Up,
    });
    commands.extend(ticks(250, 12));
    commands.push(Command::TogglePause);
    commands.extend(ticks(1_000, 3));
    commands.push(Command::TogglePause);
    commands.push(Command::RequestDirection {
        direction: Direction::Right,
    });
    commands.extend(ticks(125, 40));
    commands.push(Command::Restart);
    commands.push(Command::RequestDirection {
        direction: Direction::Right,
    });
    commands.extend(ticks(500, 20));
    commands
}

fn ticks(millis: u64, count: usize) -> impl Iterator<Item = Command> {
    (0..count).map(move |_| Command::Tick {
        dt: Duration::from_millis(millis),
    })
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    snapshot: Snapshot,
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
