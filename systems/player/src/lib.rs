#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player movement: buffered turns resolved against the maze.

use maze_chase_core::{Direction, PlayerActor, Position};
use maze_chase_maze::Maze;

/// Movement performed by the player during one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerStep {
    /// Cell occupied before the step.
    pub from: Position,
    /// Cell occupied after the step.
    pub to: Position,
    /// Direction the step was taken in.
    pub direction: Direction,
}

/// Pure system advancing the player one cell per movement tick.
#[derive(Debug, Default)]
pub struct PlayerController;

impl PlayerController {
    /// Records a requested turn; it is applied once it becomes passable.
    ///
    /// Requests into walls are not rejected, they simply wait.
    pub fn request_direction(&self, player: &mut PlayerActor, direction: Direction) {
        player.buffered_direction = direction;
    }

    /// Advances the player a single cell.
    ///
    /// The buffered turn is taken the moment it is legal; otherwise the
    /// player keeps its current heading. Returns `None` when the player is
    /// dead or its heading is blocked.
    pub fn advance(&self, player: &mut PlayerActor, maze: &Maze) -> Option<PlayerStep> {
        if !player.alive {
            return None;
        }

        let from = player.position;
        if player.buffered_direction != player.direction
            && maze.is_passable(from, player.buffered_direction)
        {
            player.direction = player.buffered_direction;
        }

        let to = maze.step(from, player.direction)?;
        debug_assert!(maze.tile_at(to).is_passable(), "player entered a wall");
        player.position = to;

        Some(PlayerStep {
            from,
            to,
            direction: player.direction,
        })
    }
}
