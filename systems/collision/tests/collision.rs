use maze_chase_core::{
    Direction, Event, GameStats, GhostActor, GhostIdentity, ModeOverride, PelletKind, PlayerActor,
    Position,
};
use maze_chase_maze::{Maze, MazeLayout};
use maze_chase_system_collision::{CollisionResolver, Contact};
use maze_chase_system_mode_timer::ModeTimer;

const STRIP: &str = "\
WWWWWWWW
W.Po...W
WWWGWWWW
WH1234HW
WWWWWWWW";

struct Fixture {
    maze: Maze,
    player: PlayerActor,
    ghosts: Vec<GhostActor>,
    timer: ModeTimer,
    stats: GameStats,
    events: Vec<Event>,
}

impl Fixture {
    fn new() -> Self {
        let layout = MazeLayout::parse(STRIP).expect("layout parses");
        let ghosts = GhostIdentity::ALL
            .into_iter()
            .map(|identity| {
                GhostActor::new(
                    identity,
                    layout.ghost_start(identity),
                    Direction::Up,
                    layout.home_corner(identity),
                )
            })
            .collect();
        let player = PlayerActor::new(layout.player_start(), Direction::Right);
        let maze = Maze::new(layout);
        let stats = GameStats {
            score: 0,
            level: 1,
            lives_remaining: 3,
            pellets_remaining: maze.pellets_remaining(),
        };
        Self {
            maze,
            player,
            ghosts,
            timer: ModeTimer::default(),
            stats,
            events: Vec::new(),
        }
    }

    fn consume_at(&mut self, row: u32, column: u32) -> Option<PelletKind> {
        self.player.position = Position::new(row, column);
        CollisionResolver.resolve_consumption(
            &mut self.maze,
            &self.player,
            &mut self.ghosts,
            &mut self.timer,
            &mut self.stats,
            &mut self.events,
        )
    }

    fn contacts(&mut self) -> Contact {
        CollisionResolver.resolve_contacts(
            &self.player,
            &mut self.ghosts,
            &mut self.timer,
            &mut self.stats,
            &mut self.events,
        )
    }

    fn ghost(&mut self, identity: GhostIdentity) -> &mut GhostActor {
        &mut self.ghosts[identity.index()]
    }
}

#[test]
fn pellet_scores_once() {
    let mut fixture = Fixture::new();
    let initial = fixture.stats.pellets_remaining;

    assert_eq!(fixture.consume_at(1, 4), Some(PelletKind::Pellet));
    assert_eq!(fixture.consume_at(1, 4), None);

    assert_eq!(fixture.stats.score, 10);
    assert_eq!(fixture.stats.pellets_remaining, initial - 1);
    assert_eq!(
        fixture.events,
        vec![Event::PelletEaten {
            position: Position::new(1, 4)
        }]
    );
}

#[test]
fn power_pellet_frightens_every_ghost_not_returning() {
    let mut fixture = Fixture::new();
    fixture.ghost(GhostIdentity::Whimsical).mode_override = Some(ModeOverride::Eaten);
    let _ = fixture.timer.record_ghost_eaten();

    assert_eq!(fixture.consume_at(1, 3), Some(PelletKind::PowerPellet));

    assert_eq!(fixture.stats.score, 50);
    assert!(fixture.timer.is_frightened());
    assert_eq!(fixture.timer.state().eaten_streak, 0);
    for ghost in &fixture.ghosts {
        let expected = if ghost.identity == GhostIdentity::Whimsical {
            Some(ModeOverride::Eaten)
        } else {
            Some(ModeOverride::Frightened)
        };
        assert_eq!(ghost.mode_override, expected, "{:?}", ghost.identity);
    }
    assert!(matches!(
        fixture.events.last(),
        Some(Event::PowerPelletEaten { .. })
    ));
}

#[test]
fn frightened_ghosts_are_eaten_with_rising_bounties() {
    let mut fixture = Fixture::new();
    let _ = fixture.consume_at(1, 3);
    fixture.player.position = Position::new(1, 5);
    for identity in [GhostIdentity::Chaser, GhostIdentity::Opportunist] {
        fixture.ghost(identity).position = Position::new(1, 5);
    }

    assert_eq!(fixture.contacts(), Contact::Clear);

    assert_eq!(fixture.stats.score, 50 + 200 + 400);
    assert_eq!(fixture.timer.state().eaten_streak, 2);
    let chaser = fixture.ghost(GhostIdentity::Chaser).clone();
    assert_eq!(chaser.mode_override, Some(ModeOverride::Eaten));
    assert_eq!(chaser.position, chaser.home_cell());
    assert_eq!(chaser.direction, Direction::Up);

    let bounties: Vec<(GhostIdentity, u32, u32)> = fixture
        .events
        .iter()
        .filter_map(|event| match event {
            Event::GhostEaten {
                ghost,
                streak_index,
                points,
            } => Some((*ghost, *streak_index, *points)),
            _ => None,
        })
        .collect();
    assert_eq!(
        bounties,
        vec![
            (GhostIdentity::Chaser, 1, 200),
            (GhostIdentity::Opportunist, 2, 400),
        ]
    );
}

#[test]
fn returning_ghosts_are_harmless() {
    let mut fixture = Fixture::new();
    fixture.player.position = Position::new(1, 5);
    let ambusher = fixture.ghost(GhostIdentity::Ambusher);
    ambusher.position = Position::new(1, 5);
    ambusher.mode_override = Some(ModeOverride::Eaten);

    assert_eq!(fixture.contacts(), Contact::Clear);
    assert_eq!(fixture.stats.score, 0);
    assert!(fixture.events.is_empty());
}

#[test]
fn plain_ghost_catches_the_player() {
    let mut fixture = Fixture::new();
    fixture.player.position = Position::new(1, 5);
    fixture.ghost(GhostIdentity::Whimsical).position = Position::new(1, 5);

    assert_eq!(
        fixture.contacts(),
        Contact::Caught {
            ghost: GhostIdentity::Whimsical
        }
    );
}

#[test]
fn earlier_frightened_ghost_is_eaten_before_a_later_catch() {
    let mut fixture = Fixture::new();
    fixture.player.position = Position::new(1, 5);
    let chaser = fixture.ghost(GhostIdentity::Chaser);
    chaser.position = Position::new(1, 5);
    chaser.mode_override = Some(ModeOverride::Frightened);
    fixture.ghost(GhostIdentity::Ambusher).position = Position::new(1, 5);

    assert_eq!(
        fixture.contacts(),
        Contact::Caught {
            ghost: GhostIdentity::Ambusher
        }
    );
    assert_eq!(fixture.stats.score, 200);
}
