//! Seeded stand-in for a human player.

use maze_chase_core::{Direction, PlayerActor};
use maze_chase_maze::Maze;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Probability of turning at a junction while the heading is still open.
const TURN_CHANCE: f64 = 0.25;

/// Picks direction requests for the player from a seeded generator.
#[derive(Debug)]
pub(crate) struct Autopilot {
    rng: ChaCha12Rng,
}

impl Autopilot {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Direction to request this frame, or `None` to keep going.
    ///
    /// Turning back is only chosen when nothing else is open.
    pub(crate) fn steer(&mut self, maze: &Maze, player: &PlayerActor) -> Option<Direction> {
        let position = player.position;
        let heading = player.direction;
        let open: Vec<Direction> = Direction::PREFERENCE
            .into_iter()
            .filter(|direction| maze.is_passable(position, *direction))
            .collect();
        let forward: Vec<Direction> = open
            .iter()
            .copied()
            .filter(|direction| *direction != heading.opposite())
            .collect();

        let blocked = !open.contains(&heading);
        if !blocked && !self.rng.gen_bool(TURN_CHANCE) {
            return None;
        }

        let candidates = if forward.is_empty() { &open } else { &forward };
        candidates.choose(&mut self.rng).copied()
    }
}
