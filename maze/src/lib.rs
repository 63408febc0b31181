#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Maze model: the static layout plus the only mutable grid state, pellet presence.

mod layout;

pub use layout::{LayoutError, MazeLayout, CLASSIC_LAYOUT};

use maze_chase_core::{Direction, PelletKind, Position, Tile};

/// Live maze whose pellets are consumed during a level.
///
/// The grid shape never changes; only pellet and power pellet cells turn into
/// paths when eaten, and [`Maze::reset_pellets`] restores them for the next
/// level.
#[derive(Clone, Debug)]
pub struct Maze {
    layout: MazeLayout,
    tiles: Vec<Tile>,
    pellets_remaining: u32,
}

impl Maze {
    /// Creates a maze with every pellet of the layout in place.
    #[must_use]
    pub fn new(layout: MazeLayout) -> Self {
        let tiles = layout.tiles().to_vec();
        let pellets_remaining = count_pellets(&tiles);
        Self {
            layout,
            tiles,
            pellets_remaining,
        }
    }

    /// Static layout the maze was built from.
    #[must_use]
    pub fn layout(&self) -> &MazeLayout {
        &self.layout
    }

    /// Number of rows in the grid.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.layout.rows()
    }

    /// Number of columns in the grid.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.layout.columns()
    }

    /// Current tile at the provided position.
    ///
    /// # Panics
    ///
    /// Panics when the position lies outside the grid, which indicates a
    /// movement bug rather than a recoverable condition.
    #[must_use]
    pub fn tile_at(&self, position: Position) -> Tile {
        self.tiles[self.layout.index(position)]
    }

    /// Cell reached by a single step, wrapping through tunnel edges.
    ///
    /// Returns `None` when the step leaves the grid through an edge that is
    /// not a tunnel. Walls are not considered.
    #[must_use]
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        let (row_delta, column_delta) = direction.delta();
        let rows = i64::from(self.rows());
        let columns = i64::from(self.columns());
        let mut row = i64::from(position.row()) + i64::from(row_delta);
        let mut column = i64::from(position.column()) + i64::from(column_delta);

        if column < 0 || column >= columns {
            if !self.layout.is_tunnel_row(position.row()) {
                return None;
            }
            column = column.rem_euclid(columns);
        }
        if row < 0 || row >= rows {
            if !self.layout.is_tunnel_column(position.column()) {
                return None;
            }
            row = row.rem_euclid(rows);
        }

        Some(Position::new(
            u32::try_from(row).ok()?,
            u32::try_from(column).ok()?,
        ))
    }

    /// Reports whether a step in `direction` from `position` is legal.
    ///
    /// Only walls and non-tunnel edges block movement.
    #[must_use]
    pub fn is_passable(&self, position: Position, direction: Direction) -> bool {
        self.step(position, direction).is_some()
    }

    /// Cell reached by a legal step, or `None` when the step is blocked.
    #[must_use]
    pub fn step(&self, position: Position, direction: Direction) -> Option<Position> {
        self.neighbor(position, direction)
            .filter(|next| self.tile_at(*next).is_passable())
    }

    /// Removes a pellet from the cell and reports which kind was eaten.
    ///
    /// Cells without a pellet are left untouched and yield `None`.
    pub fn consume(&mut self, position: Position) -> Option<PelletKind> {
        let index = self.layout.index(position);
        let kind = self.tiles[index].pellet()?;
        self.tiles[index] = Tile::Path;
        self.pellets_remaining = self.pellets_remaining.saturating_sub(1);
        Some(kind)
    }

    /// Number of pellets and power pellets still on the board.
    #[must_use]
    pub fn pellets_remaining(&self) -> u32 {
        self.pellets_remaining
    }

    /// Restores every pellet of the layout.
    pub fn reset_pellets(&mut self) {
        self.tiles.clear();
        self.tiles.extend_from_slice(self.layout.tiles());
        self.pellets_remaining = count_pellets(&self.tiles);
    }
}

fn count_pellets(tiles: &[Tile]) -> u32 {
    let count = tiles.iter().filter(|tile| tile.pellet().is_some()).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tunnel_maze() -> Maze {
        let layout = MazeLayout::parse(
            "\
WW.WWW
.P..o.
W1234W
WW.WWW",
        )
        .expect("layout parses");
        Maze::new(layout)
    }

    #[test]
    fn tunnel_row_wraps_horizontally() {
        let maze = tunnel_maze();

        assert_eq!(
            maze.neighbor(Position::new(1, 0), Direction::Left),
            Some(Position::new(1, 5))
        );
        assert_eq!(
            maze.neighbor(Position::new(1, 5), Direction::Right),
            Some(Position::new(1, 0))
        );
        assert!(maze.is_passable(Position::new(1, 0), Direction::Left));
    }

    #[test]
    fn tunnel_column_wraps_vertically() {
        let maze = tunnel_maze();

        assert_eq!(
            maze.step(Position::new(0, 2), Direction::Up),
            Some(Position::new(3, 2))
        );
        assert_eq!(
            maze.step(Position::new(3, 2), Direction::Down),
            Some(Position::new(0, 2))
        );
    }

    #[test]
    fn non_tunnel_edges_block_movement() {
        let maze = Maze::new(
            MazeLayout::parse(
                "\
.P.W
W12W
W34W",
            )
            .expect("layout parses"),
        );

        assert!(!maze.layout().is_tunnel_row(0));
        assert_eq!(maze.neighbor(Position::new(0, 0), Direction::Left), None);
        assert!(!maze.is_passable(Position::new(0, 0), Direction::Left));
        assert!(!maze.is_passable(Position::new(0, 0), Direction::Up));
    }

    #[test]
    fn walls_are_the_only_blocking_tiles() {
        let maze = tunnel_maze();

        assert!(!maze.is_passable(Position::new(1, 1), Direction::Up));
        assert!(maze.is_passable(Position::new(1, 1), Direction::Down));
        assert_eq!(maze.tile_at(Position::new(2, 1)), Tile::GhostHouse);
    }

    #[test]
    fn pellets_are_consumed_once() {
        let mut maze = tunnel_maze();
        let initial = maze.pellets_remaining();

        assert_eq!(
            maze.consume(Position::new(1, 2)),
            Some(PelletKind::Pellet)
        );
        assert_eq!(maze.consume(Position::new(1, 2)), None);
        assert_eq!(maze.tile_at(Position::new(1, 2)), Tile::Path);
        assert_eq!(maze.pellets_remaining(), initial - 1);

        assert_eq!(
            maze.consume(Position::new(1, 4)),
            Some(PelletKind::PowerPellet)
        );
        assert_eq!(maze.pellets_remaining(), initial - 2);
        assert_eq!(maze.consume(Position::new(1, 1)), None);
    }

    #[test]
    fn reset_restores_every_pellet() {
        let mut maze = tunnel_maze();
        let initial = maze.pellets_remaining();
        let _ = maze.consume(Position::new(1, 2));
        let _ = maze.consume(Position::new(1, 4));

        maze.reset_pellets();

        assert_eq!(maze.pellets_remaining(), initial);
        assert_eq!(maze.tile_at(Position::new(1, 4)), Tile::PowerPellet);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_range_positions_are_defects() {
        let maze = tunnel_maze();
        let _ = maze.tile_at(Position::new(9, 9));
    }
}
