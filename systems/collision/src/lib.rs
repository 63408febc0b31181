#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pellet scoring and player/ghost contact resolution.

use maze_chase_core::{
    Direction, Event, GameStats, GhostActor, GhostIdentity, ModeOverride, PelletKind, PlayerActor,
};
use maze_chase_maze::Maze;
use maze_chase_system_mode_timer::ModeTimer;

/// Points awarded for a regular pellet.
pub const PELLET_POINTS: u32 = 10;
/// Points awarded for a power pellet.
pub const POWER_PELLET_POINTS: u32 = 50;
/// Bounty for the first ghost eaten in a frightened window.
pub const GHOST_BOUNTY_BASE: u32 = 200;
/// Bounty awarded for the fourth and every later ghost in the same window.
pub const GHOST_BOUNTY_CAP: u32 = 1_600;

/// Points for the ghost at the one-based `streak_index` of a frightened window.
///
/// Doubles from [`GHOST_BOUNTY_BASE`] and stays at [`GHOST_BOUNTY_CAP`] from
/// the fourth ghost onwards.
#[must_use]
pub fn ghost_bounty(streak_index: u32) -> u32 {
    let doublings = streak_index.saturating_sub(1).min(3);
    (GHOST_BOUNTY_BASE << doublings).min(GHOST_BOUNTY_CAP)
}

/// Outcome of checking the player's cell against every ghost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    /// The player survived; frightened ghosts on the cell were eaten.
    Clear,
    /// A ghost without an override caught the player.
    Caught {
        /// First ghost in identity order that caught the player.
        ghost: GhostIdentity,
    },
}

/// Pure system applying scoring and mode side effects of overlaps.
#[derive(Debug, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    /// Consumes the pellet under the player, if any.
    ///
    /// A power pellet opens (or refreshes) the frightened window and marks
    /// every ghost that is not returning home as frightened.
    pub fn resolve_consumption(
        &self,
        maze: &mut Maze,
        player: &PlayerActor,
        ghosts: &mut [GhostActor],
        timer: &mut ModeTimer,
        stats: &mut GameStats,
        out: &mut Vec<Event>,
    ) -> Option<PelletKind> {
        let position = player.position;
        let kind = maze.consume(position)?;
        stats.pellets_remaining = maze.pellets_remaining();

        match kind {
            PelletKind::Pellet => {
                stats.score = stats.score.saturating_add(PELLET_POINTS);
                out.push(Event::PelletEaten { position });
            }
            PelletKind::PowerPellet => {
                stats.score = stats.score.saturating_add(POWER_PELLET_POINTS);
                timer.trigger_frightened();
                for ghost in ghosts.iter_mut().filter(|ghost| !ghost.returning()) {
                    ghost.mode_override = Some(ModeOverride::Frightened);
                }
                out.push(Event::PowerPelletEaten { position });
            }
        }

        Some(kind)
    }

    /// Resolves every ghost sharing the player's cell in identity order.
    ///
    /// Frightened ghosts are eaten and sent back to the house, returning
    /// ghosts are ignored, and the first ghost without an override catches
    /// the player. Ghosts after a catch are left untouched.
    pub fn resolve_contacts(
        &self,
        player: &PlayerActor,
        ghosts: &mut [GhostActor],
        timer: &mut ModeTimer,
        stats: &mut GameStats,
        out: &mut Vec<Event>,
    ) -> Contact {
        if !player.alive {
            return Contact::Clear;
        }

        for ghost in ghosts
            .iter_mut()
            .filter(|ghost| ghost.position == player.position)
        {
            match ghost.mode_override {
                Some(ModeOverride::Eaten) => {}
                Some(ModeOverride::Frightened) => {
                    let streak_index = timer.record_ghost_eaten();
                    let points = ghost_bounty(streak_index);
                    stats.score = stats.score.saturating_add(points);

                    ghost.mode_override = Some(ModeOverride::Eaten);
                    ghost.position = ghost.home_cell();
                    ghost.direction = Direction::Up;

                    out.push(Event::GhostEaten {
                        ghost: ghost.identity,
                        streak_index,
                        points,
                    });
                }
                None => {
                    return Contact::Caught {
                        ghost: ghost.identity,
                    }
                }
            }
        }

        Contact::Clear
    }
}
