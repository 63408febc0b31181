//! ASCII frame of the current world state.

use std::fmt::Write as _;

use maze_chase_core::{GhostIdentity, GhostMode, Position, Tile};
use maze_chase_world::{query, World};

const fn tile_glyph(tile: Tile) -> char {
    match tile {
        Tile::Wall => '#',
        Tile::Pellet => '.',
        Tile::PowerPellet => 'o',
        Tile::GhostDoor => '-',
        Tile::Path | Tile::GhostHouse => ' ',
    }
}

const fn ghost_glyph(identity: GhostIdentity, mode: GhostMode) -> char {
    match mode {
        GhostMode::Frightened => 'f',
        GhostMode::Eaten => 'e',
        GhostMode::Scatter | GhostMode::Chase => match identity {
            GhostIdentity::Chaser => 'C',
            GhostIdentity::Ambusher => 'A',
            GhostIdentity::Whimsical => 'W',
            GhostIdentity::Opportunist => 'O',
        },
    }
}

/// Draws the maze with the player and ghosts on top, followed by a status line.
///
/// Ghosts are drawn over the player when they share a cell.
pub(crate) fn render(world: &World) -> String {
    let maze = query::maze(world);
    let snapshot = query::snapshot(world);
    let columns = maze.columns() as usize;
    let mut grid: Vec<Vec<char>> = (0..maze.rows())
        .map(|row| {
            (0..maze.columns())
                .map(|column| tile_glyph(maze.tile_at(Position::new(row, column))))
                .collect()
        })
        .collect();

    let mut place = |position: Position, glyph: char| {
        if let Some(cell) = grid
            .get_mut(position.row() as usize)
            .and_then(|line| line.get_mut(position.column() as usize))
        {
            *cell = glyph;
        }
    };
    place(snapshot.player.position, 'P');
    for ghost in &snapshot.ghosts {
        place(ghost.position, ghost_glyph(ghost.identity, ghost.mode));
    }

    let mut frame = String::with_capacity(grid.len() * (columns + 1) + 64);
    for line in &grid {
        frame.extend(line.iter());
        frame.push('\n');
    }
    let _ = write!(
        frame,
        "score {}  level {}  lives {}  pellets {}  {:?}/{:?}",
        snapshot.stats.score,
        snapshot.stats.level,
        snapshot.stats.lives_remaining,
        snapshot.stats.pellets_remaining,
        snapshot.phase,
        snapshot.global_mode,
    );
    frame
}
