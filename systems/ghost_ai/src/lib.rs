#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic ghost steering.
//!
//! Each ghost picks a target through a strategy table keyed by its
//! [`GhostIdentity`], then greedily chooses the legal neighbouring cell that
//! best approaches (or, while frightened, escapes) that target. Reversal is
//! only allowed from dead ends, and ties fall back to
//! [`Direction::PREFERENCE`]. Eaten ghosts ignore targeting and walk back to
//! their house cell.

use maze_chase_core::{
    Direction, GhostActor, GhostIdentity, GhostMode, GlobalMode, ModeOverride, PlayerActor,
    Position, TargetCell,
};
use maze_chase_maze::Maze;

/// Cells ahead of the player the ambusher aims for.
pub const AMBUSH_LEAD: i32 = 4;
/// Cells ahead of the player used as the whimsical reflection point.
pub const WHIMSY_LEAD: i32 = 2;
/// Manhattan distance beyond which the opportunist keeps chasing.
pub const OPPORTUNIST_RADIUS: u32 = 8;

/// Inputs available to a targeting strategy.
#[derive(Clone, Copy, Debug)]
pub struct TargetContext<'a> {
    /// Ghost choosing a target.
    pub ghost: &'a GhostActor,
    /// Player as committed by the most recent player step.
    pub player: &'a PlayerActor,
    /// Chaser position as committed before the current ghost step.
    pub chaser: Position,
}

/// Pure function mapping the current situation to a chase target.
pub type TargetStrategy = fn(&TargetContext<'_>) -> TargetCell;

/// Strategy table: the single extension point for ghost identities.
#[must_use]
pub const fn strategy(identity: GhostIdentity) -> TargetStrategy {
    match identity {
        GhostIdentity::Chaser => pursue_player,
        GhostIdentity::Ambusher => ambush_player,
        GhostIdentity::Whimsical => reflect_chaser,
        GhostIdentity::Opportunist => pursue_or_retreat,
    }
}

fn pursue_player(context: &TargetContext<'_>) -> TargetCell {
    TargetCell::from(context.player.position)
}

fn ambush_player(context: &TargetContext<'_>) -> TargetCell {
    TargetCell::from(context.player.position).offset(context.player.direction, AMBUSH_LEAD)
}

fn reflect_chaser(context: &TargetContext<'_>) -> TargetCell {
    let ahead =
        TargetCell::from(context.player.position).offset(context.player.direction, WHIMSY_LEAD);
    ahead.reflect(TargetCell::from(context.chaser))
}

fn pursue_or_retreat(context: &TargetContext<'_>) -> TargetCell {
    let distance = context
        .ghost
        .position
        .manhattan_distance(context.player.position);
    if distance > OPPORTUNIST_RADIUS {
        TargetCell::from(context.player.position)
    } else {
        TargetCell::from(context.ghost.home_corner)
    }
}

/// How a ghost scores candidate cells against its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Steering {
    /// Minimise the distance to the target.
    Approach(TargetCell),
    /// Maximise the distance to the target.
    Flee(TargetCell),
}

/// Result of advancing one ghost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GhostMove {
    /// The ghost stepped into a neighbouring cell.
    Moved {
        /// Cell occupied before the step.
        from: Position,
        /// Cell occupied after the step.
        to: Position,
        /// Whether the step ended an eaten ghost's journey home.
        revived: bool,
    },
    /// An eaten ghost standing in the house resumed the global mode in place.
    Revived,
    /// Every neighbouring cell is a wall.
    Blocked,
}

/// Pure system resolving ghost movement.
#[derive(Debug, Default)]
pub struct GhostAi;

impl GhostAi {
    /// Steering the ghost applies this step, or `None` while eaten.
    #[must_use]
    pub fn steering(
        &self,
        ghost: &GhostActor,
        global_mode: GlobalMode,
        player: &PlayerActor,
        chaser: Position,
    ) -> Option<Steering> {
        match ghost.effective_mode(global_mode) {
            GhostMode::Eaten => None,
            GhostMode::Frightened => Some(Steering::Flee(TargetCell::from(player.position))),
            GhostMode::Scatter => Some(Steering::Approach(TargetCell::from(ghost.home_corner))),
            GhostMode::Chase => {
                let context = TargetContext {
                    ghost,
                    player,
                    chaser,
                };
                Some(Steering::Approach(strategy(ghost.identity)(&context)))
            }
        }
    }

    /// Moves the ghost a single cell.
    ///
    /// `chaser` must be the chaser's position as committed before this ghost
    /// step so every ghost observes the same state regardless of processing
    /// order.
    pub fn advance(
        &self,
        ghost: &mut GhostActor,
        global_mode: GlobalMode,
        player: &PlayerActor,
        chaser: Position,
        maze: &Maze,
    ) -> GhostMove {
        let Some(steering) = self.steering(ghost, global_mode, player, chaser) else {
            return advance_eaten(ghost, maze);
        };

        let Some(direction) = choose_direction(maze, ghost.position, ghost.direction, steering)
        else {
            return GhostMove::Blocked;
        };
        step(ghost, direction, maze, false)
    }
}

/// Picks the direction a ghost at `position` heading `heading` should take.
///
/// Reversing is excluded unless it is the only legal move. Among the remaining
/// legal moves the resulting cell with the best distance wins; ties go to the
/// earliest entry in [`Direction::PREFERENCE`]. Returns `None` when the ghost
/// is walled in.
#[must_use]
pub fn choose_direction(
    maze: &Maze,
    position: Position,
    heading: Direction,
    steering: Steering,
) -> Option<Direction> {
    let reverse = heading.opposite();
    let mut best: Option<Candidate> = None;

    for direction in Direction::PREFERENCE {
        if direction == reverse {
            continue;
        }
        let Some(cell) = maze.step(position, direction) else {
            continue;
        };

        let candidate = Candidate::score(direction, cell, steering);
        best = Some(match best {
            Some(existing) if !candidate.is_better_than(existing) => existing,
            _ => candidate,
        });
    }

    best.map(|candidate| candidate.direction)
        .or_else(|| maze.step(position, reverse).map(|_| reverse))
}

fn advance_eaten(ghost: &mut GhostActor, maze: &Maze) -> GhostMove {
    if maze.tile_at(ghost.position).is_ghost_home() {
        revive(ghost);
        return GhostMove::Revived;
    }

    let home = ghost.home_cell();
    let Some(direction) = homing_direction(maze, ghost.position, ghost.direction, home).or_else(
        || {
            choose_direction(
                maze,
                ghost.position,
                ghost.direction,
                Steering::Approach(TargetCell::from(home)),
            )
        },
    ) else {
        return GhostMove::Blocked;
    };

    step(ghost, direction, maze, true)
}

/// Greedy per-axis step toward `home`, rows first, never reversing.
fn homing_direction(
    maze: &Maze,
    position: Position,
    heading: Direction,
    home: Position,
) -> Option<Direction> {
    let vertical = match position.row().cmp(&home.row()) {
        std::cmp::Ordering::Greater => Some(Direction::Up),
        std::cmp::Ordering::Less => Some(Direction::Down),
        std::cmp::Ordering::Equal => None,
    };
    let horizontal = match position.column().cmp(&home.column()) {
        std::cmp::Ordering::Greater => Some(Direction::Left),
        std::cmp::Ordering::Less => Some(Direction::Right),
        std::cmp::Ordering::Equal => None,
    };

    [vertical, horizontal]
        .into_iter()
        .flatten()
        .filter(|direction| *direction != heading.opposite())
        .find(|direction| maze.is_passable(position, *direction))
}

fn step(ghost: &mut GhostActor, direction: Direction, maze: &Maze, returning: bool) -> GhostMove {
    let from = ghost.position;
    let Some(to) = maze.step(from, direction) else {
        return GhostMove::Blocked;
    };
    debug_assert!(maze.tile_at(to).is_passable(), "ghost entered a wall");

    ghost.position = to;
    ghost.direction = direction;

    let revived = returning && maze.tile_at(to).is_ghost_home();
    if revived {
        revive(ghost);
    }
    GhostMove::Moved { from, to, revived }
}

fn revive(ghost: &mut GhostActor) {
    if ghost.mode_override == Some(ModeOverride::Eaten) {
        ghost.mode_override = None;
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    direction: Direction,
    distance: u32,
    flee: bool,
}

impl Candidate {
    fn score(direction: Direction, cell: Position, steering: Steering) -> Self {
        let (target, flee) = match steering {
            Steering::Approach(target) => (target, false),
            Steering::Flee(target) => (target, true),
        };
        Self {
            direction,
            distance: target.distance_to(cell),
            flee,
        }
    }

    // Strict comparison keeps the earlier preference entry on ties.
    fn is_better_than(self, other: Candidate) -> bool {
        if self.flee {
            self.distance > other.distance
        } else {
            self.distance < other.distance
        }
    }
}
