//! Text layout format describing the static maze.

use std::str::FromStr;

use maze_chase_core::{GhostIdentity, Position, Tile};
use thiserror::Error;

/// Built-in 21x19 maze with a ghost house on row 7 and a side tunnel on row 9.
pub const CLASSIC_LAYOUT: &str = "\
WWWWWWWWWWWWWWWWWWW
W........W........W
WoWW.WWW.W.WWW.WWoW
W.................W
W.WW.W.WWWWW.W.WW.W
W....W.......W....W
WWWW.WWWWGWWWW.WWWW
W....WHH1234HW....W
W.WW.WWWWWWWWW.WW.W
....W.........W....
W.WW.W.WWWWW.W.WW.W
W....W...P...W....W
WWW..WWW.W.WWW..WWW
W........W........W
W.WW.WWW.W.WWW.WW.W
Wo.W...........W.oW
WW.W.W.WWWWW.W.W.WW
W....W...W...W....W
W.WWWWWW.W.WWWWWW.W
W.................W
WWWWWWWWWWWWWWWWWWW";

/// Reasons a maze layout can be rejected while parsing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout contained no rows.
    #[error("maze layout contains no rows")]
    Empty,
    /// The layout is too large to index with 32-bit coordinates.
    #[error("maze layout is too large")]
    TooLarge,
    /// A row's width differs from the first row.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: u32,
        /// Width of the first row.
        expected: u32,
        /// Width of the offending row.
        found: u32,
    },
    /// A glyph outside the layout alphabet was found.
    #[error("unknown glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        /// Zero-based row of the glyph.
        row: u32,
        /// Zero-based column of the glyph.
        column: u32,
        /// The unexpected character.
        glyph: char,
    },
    /// No `P` glyph marks the player start.
    #[error("maze layout has no player start")]
    MissingPlayerStart,
    /// More than one `P` glyph was found.
    #[error("second player start at row {row}, column {column}")]
    DuplicatePlayerStart {
        /// Zero-based row of the duplicate.
        row: u32,
        /// Zero-based column of the duplicate.
        column: u32,
    },
    /// A ghost start digit is missing.
    #[error("maze layout has no start cell for {ghost:?}")]
    MissingGhostStart {
        /// Ghost lacking a start cell.
        ghost: GhostIdentity,
    },
    /// A ghost start digit appears more than once.
    #[error("maze layout has more than one start cell for {ghost:?}")]
    DuplicateGhostStart {
        /// Ghost with several start cells.
        ghost: GhostIdentity,
    },
    /// The layout has nothing to eat, so a level could never start.
    #[error("maze layout contains no pellets")]
    NoPellets,
}

/// Immutable description of a maze: tile shape, tunnels and start cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    rows: u32,
    columns: u32,
    tiles: Vec<Tile>,
    tunnel_rows: Vec<u32>,
    tunnel_columns: Vec<u32>,
    player_start: Position,
    ghost_starts: [Position; 4],
}

impl MazeLayout {
    /// Parses a layout from its text representation.
    ///
    /// Glyphs: `W`/`#` wall, space/`_` path, `.` pellet, `o` power pellet,
    /// `G` ghost door, `H` ghost house, `P` player start on a path tile and
    /// `1`-`4` ghost starts on ghost house tiles in [`GhostIdentity::ALL`]
    /// order. Empty lines are ignored. Rows whose two edge cells are open
    /// become tunnel rows; columns whose top and bottom cells are open become
    /// tunnel columns.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = lines.first() else {
            return Err(LayoutError::Empty);
        };
        let rows = u32::try_from(lines.len()).map_err(|_| LayoutError::TooLarge)?;
        let columns =
            u32::try_from(first.chars().count()).map_err(|_| LayoutError::TooLarge)?;

        let mut tiles = Vec::with_capacity(lines.len() * first.chars().count());
        let mut player_start = None;
        let mut ghost_starts: [Option<Position>; 4] = [None; 4];

        for (row, line) in (0..rows).zip(lines.iter()) {
            let found = u32::try_from(line.chars().count()).map_err(|_| LayoutError::TooLarge)?;
            if found != columns {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected: columns,
                    found,
                });
            }

            for (column, glyph) in (0..columns).zip(line.chars()) {
                let position = Position::new(row, column);
                let tile = match glyph {
                    'W' | '#' => Tile::Wall,
                    ' ' | '_' => Tile::Path,
                    '.' => Tile::Pellet,
                    'o' => Tile::PowerPellet,
                    'G' => Tile::GhostDoor,
                    'H' => Tile::GhostHouse,
                    'P' => {
                        if player_start.replace(position).is_some() {
                            return Err(LayoutError::DuplicatePlayerStart { row, column });
                        }
                        Tile::Path
                    }
                    '1'..='4' => {
                        let index = glyph as usize - '1' as usize;
                        if ghost_starts[index].replace(position).is_some() {
                            return Err(LayoutError::DuplicateGhostStart {
                                ghost: GhostIdentity::ALL[index],
                            });
                        }
                        Tile::GhostHouse
                    }
                    _ => return Err(LayoutError::UnknownGlyph { row, column, glyph }),
                };
                tiles.push(tile);
            }
        }

        let player_start = player_start.ok_or(LayoutError::MissingPlayerStart)?;
        let mut starts = [Position::new(0, 0); 4];
        for (identity, slot) in GhostIdentity::ALL.into_iter().zip(starts.iter_mut()) {
            *slot = ghost_starts[identity.index()]
                .ok_or(LayoutError::MissingGhostStart { ghost: identity })?;
        }

        if !tiles.iter().any(|tile| tile.pellet().is_some()) {
            return Err(LayoutError::NoPellets);
        }

        let mut layout = Self {
            rows,
            columns,
            tiles,
            tunnel_rows: Vec::new(),
            tunnel_columns: Vec::new(),
            player_start,
            ghost_starts: starts,
        };
        layout.tunnel_rows = (0..rows)
            .filter(|&row| {
                layout.tile(Position::new(row, 0)).is_passable()
                    && layout.tile(Position::new(row, columns - 1)).is_passable()
            })
            .collect();
        layout.tunnel_columns = (0..columns)
            .filter(|&column| {
                layout.tile(Position::new(0, column)).is_passable()
                    && layout.tile(Position::new(rows - 1, column)).is_passable()
            })
            .collect();

        Ok(layout)
    }

    /// Returns the built-in classic maze.
    #[must_use]
    pub fn classic() -> Self {
        Self::parse(CLASSIC_LAYOUT).expect("built-in layout is valid")
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Tile originally placed at the provided position.
    ///
    /// # Panics
    ///
    /// Panics when the position lies outside the grid.
    #[must_use]
    pub fn tile(&self, position: Position) -> Tile {
        self.tiles[self.index(position)]
    }

    /// Tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Rows whose horizontal edges wrap around.
    #[must_use]
    pub fn tunnel_rows(&self) -> &[u32] {
        &self.tunnel_rows
    }

    /// Columns whose vertical edges wrap around.
    #[must_use]
    pub fn tunnel_columns(&self) -> &[u32] {
        &self.tunnel_columns
    }

    /// Reports whether leaving the row through its left or right edge wraps.
    #[must_use]
    pub fn is_tunnel_row(&self, row: u32) -> bool {
        self.tunnel_rows.contains(&row)
    }

    /// Reports whether leaving the column through its top or bottom edge wraps.
    #[must_use]
    pub fn is_tunnel_column(&self, column: u32) -> bool {
        self.tunnel_columns.contains(&column)
    }

    /// Cell the player starts every life on.
    #[must_use]
    pub const fn player_start(&self) -> Position {
        self.player_start
    }

    /// Ghost house cell the provided ghost starts on and returns to.
    #[must_use]
    pub const fn ghost_start(&self, identity: GhostIdentity) -> Position {
        self.ghost_starts[identity.index()]
    }

    /// Grid corner the provided ghost targets while scattering.
    #[must_use]
    pub const fn home_corner(&self, identity: GhostIdentity) -> Position {
        let last_row = self.rows.saturating_sub(1);
        let last_column = self.columns.saturating_sub(1);
        match identity {
            GhostIdentity::Chaser => Position::new(0, last_column),
            GhostIdentity::Ambusher => Position::new(0, 0),
            GhostIdentity::Whimsical => Position::new(last_row, last_column),
            GhostIdentity::Opportunist => Position::new(last_row, 0),
        }
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.row() < self.rows && position.column() < self.columns
    }

    pub(crate) fn index(&self, position: Position) -> usize {
        assert!(
            self.contains(position),
            "position {position:?} outside {}x{} maze",
            self.rows,
            self.columns
        );
        position.row() as usize * self.columns as usize + position.column() as usize
    }
}

impl FromStr for MazeLayout {
    type Err = LayoutError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_layout_parses() {
        let layout = MazeLayout::classic();

        assert_eq!(layout.rows(), 21);
        assert_eq!(layout.columns(), 19);
        assert_eq!(layout.player_start(), Position::new(11, 9));
        assert_eq!(
            layout.ghost_start(GhostIdentity::Chaser),
            Position::new(7, 8)
        );
        assert_eq!(
            layout.ghost_start(GhostIdentity::Opportunist),
            Position::new(7, 11)
        );
        assert_eq!(layout.tunnel_rows(), &[9]);
        assert!(layout.tunnel_columns().is_empty());
        assert_eq!(layout.tile(Position::new(6, 9)), Tile::GhostDoor);
    }

    #[test]
    fn home_corners_follow_grid_corners() {
        let layout = MazeLayout::classic();

        assert_eq!(
            layout.home_corner(GhostIdentity::Chaser),
            Position::new(0, 18)
        );
        assert_eq!(
            layout.home_corner(GhostIdentity::Ambusher),
            Position::new(0, 0)
        );
        assert_eq!(
            layout.home_corner(GhostIdentity::Whimsical),
            Position::new(20, 18)
        );
        assert_eq!(
            layout.home_corner(GhostIdentity::Opportunist),
            Position::new(20, 0)
        );
    }

    #[test]
    fn rejects_empty_layout() {
        assert_eq!(MazeLayout::parse("\n\n"), Err(LayoutError::Empty));
    }

    #[test]
    fn rejects_ragged_rows() {
        let error = MazeLayout::parse("WWWW\nW.P\nW1234").expect_err("ragged rows");
        assert_eq!(
            error,
            LayoutError::RaggedRow {
                row: 1,
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn rejects_unknown_glyphs() {
        let error = MazeLayout::parse("W.P?\n1234").expect_err("unknown glyph");
        assert_eq!(
            error,
            LayoutError::UnknownGlyph {
                row: 0,
                column: 3,
                glyph: '?'
            }
        );
    }

    #[test]
    fn rejects_missing_starts() {
        assert_eq!(
            MazeLayout::parse("W..W\n1234"),
            Err(LayoutError::MissingPlayerStart)
        );
        assert_eq!(
            MazeLayout::parse("W.PW\n123H"),
            Err(LayoutError::MissingGhostStart {
                ghost: GhostIdentity::Opportunist
            })
        );
        assert_eq!(
            MazeLayout::parse("P.P.\n1234"),
            Err(LayoutError::DuplicatePlayerStart { row: 0, column: 2 })
        );
    }

    #[test]
    fn rejects_layout_without_pellets() {
        assert_eq!(
            MazeLayout::parse("WPWW\n1234"),
            Err(LayoutError::NoPellets)
        );
    }

    #[test]
    fn detects_tunnel_rows_and_columns() {
        let layout: MazeLayout = "\
WW.WWW
.....o
W1234W
WP.WWW
WW.WWW"
            .parse()
            .expect("layout parses");

        assert_eq!(layout.tunnel_rows(), &[1]);
        assert_eq!(layout.tunnel_columns(), &[2]);
    }
}
