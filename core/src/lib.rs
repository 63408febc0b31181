#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze chase simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the pure systems. Adapters submit [`Command`]
//! values describing player intent or the passage of time, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values that presentation layers react to. Read-only [`Snapshot`] values
//! describe the committed state after every command.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cardinal movement directions available to actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Fixed order used to break ties between equally scored moves.
    ///
    /// The order is observable as ghost path behaviour and must stay stable.
    pub const PREFERENCE: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Returns the direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Row and column delta produced by a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Location of a single maze cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u32,
    column: u32,
}

impl Position {
    /// Creates a new cell position.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

/// Point a ghost steers toward.
///
/// Targets are derived from actor positions plus offsets and may lie outside
/// the grid, so the coordinates are signed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetCell {
    row: i32,
    column: i32,
}

impl TargetCell {
    /// Creates a new target point.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Signed row coordinate of the target.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Signed column coordinate of the target.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Moves the target `steps` cells along the provided direction.
    #[must_use]
    pub const fn offset(self, direction: Direction, steps: i32) -> Self {
        let (row_delta, column_delta) = direction.delta();
        Self {
            row: self.row + row_delta * steps,
            column: self.column + column_delta * steps,
        }
    }

    /// Reflects `other` through this point: `self + (self - other)`.
    #[must_use]
    pub const fn reflect(self, other: TargetCell) -> Self {
        Self {
            row: 2 * self.row - other.row,
            column: 2 * self.column - other.column,
        }
    }

    /// Manhattan distance between the target and a grid position.
    #[must_use]
    pub fn distance_to(self, position: Position) -> u32 {
        let row = i64::from(position.row()) - i64::from(self.row);
        let column = i64::from(position.column()) - i64::from(self.column);
        u32::try_from(row.unsigned_abs() + column.unsigned_abs()).unwrap_or(u32::MAX)
    }
}

impl From<Position> for TargetCell {
    fn from(position: Position) -> Self {
        Self {
            row: i32::try_from(position.row()).unwrap_or(i32::MAX),
            column: i32::try_from(position.column()).unwrap_or(i32::MAX),
        }
    }
}

/// Content of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Impassable wall segment.
    Wall,
    /// Empty corridor.
    Path,
    /// Corridor holding a regular pellet.
    Pellet,
    /// Corridor holding a power pellet.
    PowerPellet,
    /// Door leading into the ghost house.
    GhostDoor,
    /// Interior of the ghost house.
    GhostHouse,
}

impl Tile {
    /// Reports whether actors may occupy the tile.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Reports whether the tile belongs to the ghost house, door included.
    #[must_use]
    pub const fn is_ghost_home(self) -> bool {
        matches!(self, Self::GhostDoor | Self::GhostHouse)
    }

    /// Kind of pellet the tile holds, if any.
    #[must_use]
    pub const fn pellet(self) -> Option<PelletKind> {
        match self {
            Self::Pellet => Some(PelletKind::Pellet),
            Self::PowerPellet => Some(PelletKind::PowerPellet),
            _ => None,
        }
    }
}

/// Kinds of consumable pellets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PelletKind {
    /// Regular pellet worth a handful of points.
    Pellet,
    /// Power pellet that frightens the ghosts.
    PowerPellet,
}

/// Identity of a pursuer, which selects its targeting heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GhostIdentity {
    /// Pursues the player's current cell directly.
    Chaser,
    /// Intercepts a few cells ahead of the player.
    Ambusher,
    /// Reflects the chaser's position through a point ahead of the player.
    Whimsical,
    /// Pursues from afar and retreats when close.
    Opportunist,
}

impl GhostIdentity {
    /// Every identity in canonical processing order.
    pub const ALL: [GhostIdentity; 4] = [
        GhostIdentity::Chaser,
        GhostIdentity::Ambusher,
        GhostIdentity::Whimsical,
        GhostIdentity::Opportunist,
    ];

    /// Zero-based index of the identity within [`GhostIdentity::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Chaser => 0,
            Self::Ambusher => 1,
            Self::Whimsical => 2,
            Self::Opportunist => 3,
        }
    }
}

/// Global scatter/chase mode shared by every ghost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlobalMode {
    /// Ghosts head for their home corners.
    Scatter,
    /// Ghosts pursue the player with their identity heuristic.
    Chase,
}

impl GlobalMode {
    /// Returns the mode that follows this one in the alternation.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Scatter => Self::Chase,
            Self::Chase => Self::Scatter,
        }
    }
}

/// Per-ghost override layered on top of the global mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeOverride {
    /// Fleeing and vulnerable after a power pellet.
    Frightened,
    /// Consumed by the player and returning home.
    Eaten,
}

/// Effective mode of a ghost after applying override precedence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GhostMode {
    /// Heading for the home corner.
    Scatter,
    /// Pursuing the player.
    Chase,
    /// Fleeing the player.
    Frightened,
    /// Returning to the ghost house.
    Eaten,
}

impl GhostMode {
    /// Resolves the effective mode: an override always wins over the global mode.
    #[must_use]
    pub const fn resolve(global: GlobalMode, mode_override: Option<ModeOverride>) -> Self {
        match (mode_override, global) {
            (Some(ModeOverride::Frightened), _) => Self::Frightened,
            (Some(ModeOverride::Eaten), _) => Self::Eaten,
            (None, GlobalMode::Scatter) => Self::Scatter,
            (None, GlobalMode::Chase) => Self::Chase,
        }
    }
}

/// Reason the simulation is suspended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauseReason {
    /// The player toggled the pause; no automatic resume.
    Player,
    /// Brief pause after losing a life.
    Death,
    /// Brief pause after clearing every pellet.
    LevelComplete,
}

/// Top-level lifecycle phase of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Awaiting the start signal.
    Idle,
    /// Timers are active and actors move.
    Running,
    /// Ticking is suspended.
    Paused(PauseReason),
    /// Terminal until an explicit restart.
    GameOver,
}

impl GamePhase {
    /// Reports whether gameplay timers should be advancing.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Mutable record describing the player actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerActor {
    /// Cell currently occupied by the player.
    pub position: Position,
    /// Direction the player is travelling and facing.
    pub direction: Direction,
    /// Most recently requested turn, applied once it becomes passable.
    pub buffered_direction: Direction,
    /// Whether the player is currently alive.
    pub alive: bool,
    start: Position,
    start_direction: Direction,
}

impl PlayerActor {
    /// Creates a player standing on its start cell.
    #[must_use]
    pub const fn new(start: Position, start_direction: Direction) -> Self {
        Self {
            position: start,
            direction: start_direction,
            buffered_direction: start_direction,
            alive: true,
            start,
            start_direction,
        }
    }

    /// Cell the player occupies at the start of a life.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the player to its start cell and heading.
    pub fn respawn(&mut self) {
        self.position = self.start;
        self.direction = self.start_direction;
        self.buffered_direction = self.start_direction;
        self.alive = true;
    }
}

/// Mutable record describing a single ghost actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostActor {
    /// Identity selecting the ghost's targeting heuristic.
    pub identity: GhostIdentity,
    /// Cell currently occupied by the ghost.
    pub position: Position,
    /// Direction the ghost last moved in.
    pub direction: Direction,
    /// Active override, if any; absent means the global mode applies.
    pub mode_override: Option<ModeOverride>,
    /// Corner targeted while scattering.
    pub home_corner: Position,
    home_cell: Position,
    start_direction: Direction,
}

impl GhostActor {
    /// Creates a ghost standing on its home cell inside the ghost house.
    #[must_use]
    pub const fn new(
        identity: GhostIdentity,
        home_cell: Position,
        start_direction: Direction,
        home_corner: Position,
    ) -> Self {
        Self {
            identity,
            position: home_cell,
            direction: start_direction,
            mode_override: None,
            home_corner,
            home_cell,
            start_direction,
        }
    }

    /// Start cell inside the ghost house the ghost returns to when eaten.
    #[must_use]
    pub const fn home_cell(&self) -> Position {
        self.home_cell
    }

    /// Reports whether the ghost is returning home after being eaten.
    #[must_use]
    pub const fn returning(&self) -> bool {
        matches!(self.mode_override, Some(ModeOverride::Eaten))
    }

    /// Resolves the effective mode against the live global mode.
    #[must_use]
    pub const fn effective_mode(&self, global: GlobalMode) -> GhostMode {
        GhostMode::resolve(global, self.mode_override)
    }

    /// Returns the ghost to its start cell, heading and the global mode.
    pub fn respawn(&mut self) {
        self.position = self.home_cell;
        self.direction = self.start_direction;
        self.mode_override = None;
    }
}

/// Score and progression counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameStats {
    /// Points accumulated across the whole game.
    pub score: u32,
    /// One-based level number.
    pub level: u32,
    /// Lives left, including the one currently in play.
    pub lives_remaining: u32,
    /// Pellets and power pellets still on the board.
    pub pellets_remaining: u32,
}

/// Commands that express all permissible simulation inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Leaves the idle phase and starts play.
    Start,
    /// Toggles the player pause while running.
    TogglePause,
    /// Buffers a turn for the player.
    RequestDirection {
        /// Direction the player wants to travel next.
        direction: Direction,
    },
    /// Reinitialises the entire game and starts play.
    Restart,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of host time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Indicates that the host clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the lifecycle phase changed.
    PhaseChanged {
        /// Phase active after the transition.
        phase: GamePhase,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell occupied before the step.
        from: Position,
        /// Cell occupied after the step.
        to: Position,
    },
    /// Confirms that a ghost moved between two cells.
    GhostMoved {
        /// Ghost that moved.
        ghost: GhostIdentity,
        /// Cell occupied before the step.
        from: Position,
        /// Cell occupied after the step.
        to: Position,
    },
    /// A regular pellet was consumed.
    PelletEaten {
        /// Cell the pellet was removed from.
        position: Position,
    },
    /// A power pellet was consumed and the frightened window (re)started.
    PowerPelletEaten {
        /// Cell the power pellet was removed from.
        position: Position,
    },
    /// A frightened ghost was eaten.
    GhostEaten {
        /// Ghost that was eaten.
        ghost: GhostIdentity,
        /// One-based position of the ghost in the current frightened window.
        streak_index: u32,
        /// Points awarded for the ghost.
        points: u32,
    },
    /// An eaten ghost reached the ghost house and resumed the global mode.
    GhostRevived {
        /// Ghost that revived.
        ghost: GhostIdentity,
    },
    /// The global scatter/chase mode flipped.
    GlobalModeChanged {
        /// Mode active after the flip.
        mode: GlobalMode,
    },
    /// The frightened window expired.
    FrightenedEnded {
        /// Global mode every frightened ghost reverted to.
        mode: GlobalMode,
    },
    /// The player was caught by a ghost.
    PlayerDied {
        /// Lives left after the loss.
        lives_remaining: u32,
    },
    /// Every pellet was cleared and a new level started.
    LevelCompleted {
        /// Level number that just started.
        level: u32,
    },
    /// The last life was lost.
    GameOver {
        /// Score at the end of the game.
        final_score: u32,
    },
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Cell occupied by the player.
    pub position: Position,
    /// Direction the player is facing.
    pub direction: Direction,
    /// Turn waiting to be applied.
    pub buffered_direction: Direction,
    /// Whether the player is alive.
    pub alive: bool,
}

/// Immutable representation of a ghost used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GhostSnapshot {
    /// Identity of the ghost.
    pub identity: GhostIdentity,
    /// Cell occupied by the ghost.
    pub position: Position,
    /// Direction the ghost is facing.
    pub direction: Direction,
    /// Effective mode after override precedence.
    pub mode: GhostMode,
}

/// Read-only snapshot of the committed simulation state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current lifecycle phase.
    pub phase: GamePhase,
    /// Global scatter/chase mode.
    pub global_mode: GlobalMode,
    /// Time left in the frightened window; zero when inactive.
    pub frightened_remaining: Duration,
    /// Ghosts eaten during the current frightened window.
    pub eaten_streak: u32,
    /// Player state.
    pub player: PlayerSnapshot,
    /// Ghost states in canonical identity order.
    pub ghosts: Vec<GhostSnapshot>,
    /// Score and progression counters.
    pub stats: GameStats,
}
