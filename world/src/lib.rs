#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the maze chase simulation.
//!
//! The world is the only owner of mutable simulation state. Every command is
//! applied to completion through [`apply`]: ticks drive a named scheduler whose
//! timers invoke the pure systems in a fixed order, so each handler observes
//! the state committed by the one before it.

mod config;
mod scheduler;

pub use config::{ConfigError, SimulationConfig};

use std::time::Duration;

use log::{debug, info, trace};
use maze_chase_core::{
    Command, Direction, Event, GamePhase, GameStats, GhostActor, GhostIdentity, ModeOverride,
    PauseReason, PelletKind, PlayerActor,
};
use maze_chase_maze::{Maze, MazeLayout};
use maze_chase_system_collision::{CollisionResolver, Contact};
use maze_chase_system_ghost_ai::{GhostAi, GhostMove};
use maze_chase_system_mode_timer::{Countdown, ModeTimer};
use maze_chase_system_player::PlayerController;
use scheduler::{Scheduler, TimerId};

const STARTING_LEVEL: u32 = 1;
const PLAYER_START_DIRECTION: Direction = Direction::Down;

const fn ghost_start_direction(identity: GhostIdentity) -> Direction {
    match identity {
        GhostIdentity::Chaser => Direction::Left,
        GhostIdentity::Ambusher => Direction::Up,
        GhostIdentity::Whimsical | GhostIdentity::Opportunist => Direction::Down,
    }
}

/// Represents the authoritative maze chase world state.
#[derive(Debug)]
pub struct World {
    config: SimulationConfig,
    maze: Maze,
    phase: GamePhase,
    player: PlayerActor,
    ghosts: Vec<GhostActor>,
    mode_timer: ModeTimer,
    stats: GameStats,
    scheduler: Scheduler,
    player_controller: PlayerController,
    ghost_ai: GhostAi,
    collision: CollisionResolver,
}

impl World {
    /// Creates an idle world on the built-in maze with default timings.
    #[must_use]
    pub fn new() -> Self {
        Self::build(MazeLayout::classic(), SimulationConfig::default())
    }

    /// Creates an idle world on the provided layout.
    ///
    /// Fails when the configuration contains a zero duration or no lives.
    pub fn with_config(layout: MazeLayout, config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(layout, config))
    }

    fn build(layout: MazeLayout, config: SimulationConfig) -> Self {
        let player = PlayerActor::new(layout.player_start(), PLAYER_START_DIRECTION);
        let ghosts = GhostIdentity::ALL
            .into_iter()
            .map(|identity| {
                GhostActor::new(
                    identity,
                    layout.ghost_start(identity),
                    ghost_start_direction(identity),
                    layout.home_corner(identity),
                )
            })
            .collect();
        let maze = Maze::new(layout);
        let stats = initial_stats(&config, &maze);

        Self {
            mode_timer: ModeTimer::new(config.modes),
            config,
            maze,
            phase: GamePhase::Idle,
            player,
            ghosts,
            stats,
            scheduler: Scheduler::default(),
            player_controller: PlayerController,
            ghost_ai: GhostAi,
            collision: CollisionResolver,
        }
    }

    fn set_phase(&mut self, phase: GamePhase, out_events: &mut Vec<Event>) {
        if self.phase == phase {
            return;
        }
        info!("phase {:?} -> {phase:?}", self.phase);
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn resume_play(&mut self, out_events: &mut Vec<Event>) {
        self.set_phase(GamePhase::Running, out_events);
        self.scheduler
            .arm(TimerId::PlayerStep, self.config.player_step, true);
        self.scheduler
            .arm(TimerId::ModeClock, self.config.mode_clock, true);
        self.scheduler
            .arm(TimerId::GhostStep, self.config.ghost_step, true);
        if self.mode_timer.is_frightened() {
            self.scheduler
                .arm(TimerId::FrightenedClock, self.config.frightened_clock, true);
        }
    }

    fn pause(&mut self, reason: PauseReason, out_events: &mut Vec<Event>) {
        self.scheduler.cancel_all();
        self.set_phase(GamePhase::Paused(reason), out_events);
        let delay = match reason {
            PauseReason::Player => return,
            PauseReason::Death => self.config.death_pause,
            PauseReason::LevelComplete => self.config.level_pause,
        };
        self.scheduler.arm(TimerId::Resume, delay, false);
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        self.scheduler.cancel_all();
        self.maze.reset_pellets();
        self.mode_timer.reset();
        self.reset_actors();
        self.stats = initial_stats(&self.config, &self.maze);
        info!("game restarted");
        self.resume_play(out_events);
    }

    /// Returns every actor to its start cell and closes the frightened window.
    fn reset_actors(&mut self) {
        self.player.respawn();
        for ghost in &mut self.ghosts {
            ghost.respawn();
        }
        self.mode_timer.end_frightened();
        self.scheduler.cancel(TimerId::FrightenedClock);
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });

        let mut budget = dt;
        while let Some((timer, wait)) = self.scheduler.next_due() {
            if wait > budget {
                break;
            }
            self.scheduler.advance(wait);
            budget = budget.saturating_sub(wait);
            self.scheduler.complete(timer);
            trace!("{timer:?} fired");
            self.fire(timer, out_events);
        }
        self.scheduler.advance(budget);
    }

    fn fire(&mut self, timer: TimerId, out_events: &mut Vec<Event>) {
        match timer {
            TimerId::PlayerStep => self.step_player(out_events),
            TimerId::ModeClock => self.advance_mode_clock(out_events),
            TimerId::FrightenedClock => self.count_down_frightened(out_events),
            TimerId::GhostStep => self.step_ghosts(out_events),
            TimerId::Resume => self.resume_after_pause(out_events),
        }
        debug_assert!(self.actors_on_passable_tiles(), "actor standing on a wall");
    }

    fn step_player(&mut self, out_events: &mut Vec<Event>) {
        if let Some(step) = self.player_controller.advance(&mut self.player, &self.maze) {
            out_events.push(Event::PlayerMoved {
                from: step.from,
                to: step.to,
            });
        }

        let consumed = self.collision.resolve_consumption(
            &mut self.maze,
            &self.player,
            &mut self.ghosts,
            &mut self.mode_timer,
            &mut self.stats,
            out_events,
        );
        if consumed == Some(PelletKind::PowerPellet) {
            self.scheduler
                .arm(TimerId::FrightenedClock, self.config.frightened_clock, true);
            debug!(
                "frightened window opened for {:?}",
                self.config.modes.frightened
            );
        }

        // Clearing the board wins over a ghost sharing the last pellet's cell.
        if self.maze.pellets_remaining() == 0 {
            info!("level {} cleared", self.stats.level);
            self.pause(PauseReason::LevelComplete, out_events);
            return;
        }

        self.resolve_contacts(out_events);
    }

    fn advance_mode_clock(&mut self, out_events: &mut Vec<Event>) {
        if let Some(mode) = self.mode_timer.advance_global(self.config.mode_clock) {
            debug!("global mode switched to {mode:?}");
            out_events.push(Event::GlobalModeChanged { mode });
        }
    }

    fn count_down_frightened(&mut self, out_events: &mut Vec<Event>) {
        match self.mode_timer.count_down(self.config.frightened_clock) {
            Countdown::Running => {}
            Countdown::Inactive => self.scheduler.cancel(TimerId::FrightenedClock),
            Countdown::Expired => {
                self.scheduler.cancel(TimerId::FrightenedClock);
                self.mode_timer.end_frightened();
                for ghost in &mut self.ghosts {
                    if ghost.mode_override == Some(ModeOverride::Frightened) {
                        ghost.mode_override = None;
                    }
                }
                let mode = self.mode_timer.global_mode();
                debug!("frightened window closed, ghosts revert to {mode:?}");
                out_events.push(Event::FrightenedEnded { mode });
            }
        }
    }

    fn step_ghosts(&mut self, out_events: &mut Vec<Event>) {
        let global_mode = self.mode_timer.global_mode();
        let chaser = self.ghosts[GhostIdentity::Chaser.index()].position;

        for ghost in &mut self.ghosts {
            let outcome =
                self.ghost_ai
                    .advance(ghost, global_mode, &self.player, chaser, &self.maze);
            match outcome {
                GhostMove::Moved { from, to, revived } => {
                    out_events.push(Event::GhostMoved {
                        ghost: ghost.identity,
                        from,
                        to,
                    });
                    if revived {
                        out_events.push(Event::GhostRevived {
                            ghost: ghost.identity,
                        });
                    }
                }
                GhostMove::Revived => out_events.push(Event::GhostRevived {
                    ghost: ghost.identity,
                }),
                GhostMove::Blocked => {}
            }
        }

        self.resolve_contacts(out_events);
    }

    fn resolve_contacts(&mut self, out_events: &mut Vec<Event>) {
        let contact = self.collision.resolve_contacts(
            &self.player,
            &mut self.ghosts,
            &mut self.mode_timer,
            &mut self.stats,
            out_events,
        );
        if let Contact::Caught { ghost } = contact {
            self.lose_life(ghost, out_events);
        }
    }

    fn lose_life(&mut self, ghost: GhostIdentity, out_events: &mut Vec<Event>) {
        self.scheduler.cancel_all();
        self.stats.lives_remaining = self.stats.lives_remaining.saturating_sub(1);
        let lives_remaining = self.stats.lives_remaining;
        info!("player caught by {ghost:?}, {lives_remaining} lives left");
        out_events.push(Event::PlayerDied { lives_remaining });

        if lives_remaining == 0 {
            self.player.alive = false;
            self.set_phase(GamePhase::GameOver, out_events);
            let final_score = self.stats.score;
            info!("game over with {final_score} points");
            out_events.push(Event::GameOver { final_score });
            return;
        }

        self.reset_actors();
        self.pause(PauseReason::Death, out_events);
    }

    fn resume_after_pause(&mut self, out_events: &mut Vec<Event>) {
        if self.phase == GamePhase::Paused(PauseReason::LevelComplete) {
            self.maze.reset_pellets();
            self.stats.pellets_remaining = self.maze.pellets_remaining();
            self.reset_actors();
            self.stats.level = self.stats.level.saturating_add(1);
            let level = self.stats.level;
            info!("level {level} started");
            out_events.push(Event::LevelCompleted { level });
        }
        self.resume_play(out_events);
    }

    fn actors_on_passable_tiles(&self) -> bool {
        std::iter::once(self.player.position)
            .chain(self.ghosts.iter().map(|ghost| ghost.position))
            .all(|position| self.maze.tile_at(position).is_passable())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn initial_stats(config: &SimulationConfig, maze: &Maze) -> GameStats {
    GameStats {
        score: 0,
        level: STARTING_LEVEL,
        lives_remaining: config.starting_lives,
        pellets_remaining: maze.pellets_remaining(),
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Start => {
            if world.phase == GamePhase::Idle {
                world.resume_play(out_events);
            }
        }
        Command::TogglePause => match world.phase {
            GamePhase::Running => world.pause(PauseReason::Player, out_events),
            GamePhase::Paused(PauseReason::Player) => world.resume_play(out_events),
            _ => {}
        },
        Command::RequestDirection { direction } => {
            if world.phase != GamePhase::GameOver {
                world
                    .player_controller
                    .request_direction(&mut world.player, direction);
            }
        }
        Command::Restart => world.restart(out_events),
        Command::Tick { dt } => world.tick(dt, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{SimulationConfig, World};
    use maze_chase_core::{
        GamePhase, GameStats, GhostActor, GhostIdentity, GhostSnapshot, GlobalMode, PlayerActor,
        PlayerSnapshot, Snapshot,
    };
    use maze_chase_maze::Maze;

    /// Captures the committed state rendering and UI layers consume.
    #[must_use]
    pub fn snapshot(world: &World) -> Snapshot {
        let global_mode = world.mode_timer.global_mode();
        let mode_state = world.mode_timer.state();
        let player = &world.player;

        Snapshot {
            phase: world.phase,
            global_mode,
            frightened_remaining: mode_state.frightened_remaining,
            eaten_streak: mode_state.eaten_streak,
            player: PlayerSnapshot {
                position: player.position,
                direction: player.direction,
                buffered_direction: player.buffered_direction,
                alive: player.alive,
            },
            ghosts: world
                .ghosts
                .iter()
                .map(|ghost| GhostSnapshot {
                    identity: ghost.identity,
                    position: ghost.position,
                    direction: ghost.direction,
                    mode: ghost.effective_mode(global_mode),
                })
                .collect(),
            stats: world.stats,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Score and progression counters.
    #[must_use]
    pub fn stats(world: &World) -> GameStats {
        world.stats
    }

    /// Live global scatter/chase mode.
    #[must_use]
    pub fn global_mode(world: &World) -> GlobalMode {
        world.mode_timer.global_mode()
    }

    /// Provides read-only access to the live maze.
    #[must_use]
    pub fn maze(world: &World) -> &Maze {
        &world.maze
    }

    /// Provides read-only access to the player actor.
    #[must_use]
    pub fn player(world: &World) -> &PlayerActor {
        &world.player
    }

    /// Ghost actors in canonical identity order.
    #[must_use]
    pub fn ghosts(world: &World) -> &[GhostActor] {
        &world.ghosts
    }

    /// Provides read-only access to a single ghost.
    #[must_use]
    pub fn ghost(world: &World, identity: GhostIdentity) -> &GhostActor {
        &world.ghosts[identity.index()]
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &SimulationConfig {
        &world.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{GhostMode, GlobalMode, Position};

    fn run(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events);
        events
    }

    #[test]
    fn new_world_waits_idle_on_the_classic_maze() {
        let world = World::new();
        let snapshot = query::snapshot(&world);

        assert_eq!(snapshot.phase, GamePhase::Idle);
        assert_eq!(snapshot.global_mode, GlobalMode::Scatter);
        assert_eq!(snapshot.player.position, Position::new(11, 9));
        assert_eq!(snapshot.player.direction, Direction::Down);
        assert_eq!(snapshot.stats.level, 1);
        assert_eq!(snapshot.stats.lives_remaining, 3);
        assert_eq!(snapshot.stats.score, 0);
        assert_eq!(
            snapshot.stats.pellets_remaining,
            query::maze(&world).pellets_remaining()
        );

        let ghosts: Vec<(Position, Direction, GhostMode)> = snapshot
            .ghosts
            .iter()
            .map(|ghost| (ghost.position, ghost.direction, ghost.mode))
            .collect();
        assert_eq!(
            ghosts,
            vec![
                (Position::new(7, 8), Direction::Left, GhostMode::Scatter),
                (Position::new(7, 9), Direction::Up, GhostMode::Scatter),
                (Position::new(7, 10), Direction::Down, GhostMode::Scatter),
                (Position::new(7, 11), Direction::Down, GhostMode::Scatter),
            ]
        );
    }

    #[test]
    fn idle_world_ignores_ticks() {
        let mut world = World::new();

        let events = run(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(5),
            },
        );

        assert_eq!(
            events,
            vec![Event::TimeAdvanced {
                dt: Duration::from_secs(5)
            }]
        );
        assert_eq!(query::player(&world).position, Position::new(11, 9));
    }

    #[test]
    fn start_arms_gameplay_timers() {
        let mut world = World::new();

        let events = run(&mut world, Command::Start);

        assert_eq!(
            events,
            vec![Event::PhaseChanged {
                phase: GamePhase::Running
            }]
        );
        assert!(world.scheduler.is_armed(TimerId::PlayerStep));
        assert!(world.scheduler.is_armed(TimerId::ModeClock));
        assert!(world.scheduler.is_armed(TimerId::GhostStep));
        assert!(!world.scheduler.is_armed(TimerId::FrightenedClock));
        assert!(run(&mut world, Command::Start).is_empty());
    }

    #[test]
    fn rejects_invalid_configuration() {
        let config = SimulationConfig {
            player_step: Duration::ZERO,
            ..SimulationConfig::default()
        };

        let result = World::with_config(MazeLayout::classic(), config);

        assert!(matches!(
            result,
            Err(ConfigError::ZeroDuration {
                name: "player_step"
            })
        ));
    }
}
