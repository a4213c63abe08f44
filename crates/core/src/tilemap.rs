//! Tile map module - level geometry and collision queries
//!
//! Levels are plain text, one character per `TILE_SIZE` pixel tile:
//!
//! | Char | Meaning |
//! |------|---------|
//! | `#` | blocker |
//! | `E` | exit trigger |
//! | `P` | player spawn |
//! | `D` `R` `O` `T` | diamond, ruby, pearl, trophy |
//! | `.` or space | empty |
//!
//! Lines starting with `;` are comments. Short rows are padded with empty tiles.
//!
//! Blocker and exit tiles are coalesced into rectangles (maximal runs per row,
//! then identical runs stacked across rows), so a floor is one rectangle with no
//! internal seams for the player to catch on.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{ObstacleClass, Rect, TILE_SIZE};

/// Upper bound on cells reported by a single query.
///
/// Entities are at most a couple of tiles large, so real queries stay far below this.
pub const MAX_HITS: usize = 32;

/// Cells returned by a collision query, in row-major order.
pub type Hits = ArrayVec<Rect, MAX_HITS>;

/// Answers "which cells of this class overlap this rectangle?".
pub trait CollisionQuery {
    /// Cells overlapping `probe`, ordered by top edge then left edge.
    fn collide(&self, probe: &Rect, class: ObstacleClass) -> Hits;
}

/// A single grid tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Empty,
    Blocker,
    Exit,
}

/// An item trigger found in the map: a string tag at a pixel position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTrigger {
    pub tag: &'static str,
    pub x: i32,
    pub y: i32,
}

/// Errors produced while parsing a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// No tile rows at all
    Empty,
    /// No `P` tile
    MissingPlayerSpawn,
    /// A character outside the tile legend (1-based line and column)
    UnknownTile { line: usize, column: usize, ch: char },
    /// Wider or taller than `u16::MAX` tiles
    TooLarge { cols: usize, rows: usize },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Empty => write!(f, "map has no tiles"),
            MapError::MissingPlayerSpawn => write!(f, "map has no player spawn ('P')"),
            MapError::UnknownTile { line, column, ch } => {
                write!(f, "unknown tile {:?} at line {}, column {}", ch, line, column)
            }
            MapError::TooLarge { cols, rows } => {
                write!(f, "map is {}x{} tiles, at most {} per side", cols, rows, u16::MAX)
            }
        }
    }
}

impl std::error::Error for MapError {}

/// Parsed level: tile grid, coalesced collision rectangles and spawn triggers.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    cols: u16,
    rows: u16,
    /// Row-major tile grid (y * cols + x)
    tiles: Vec<Tile>,
    blockers: Vec<Rect>,
    exits: Vec<Rect>,
    player_spawn: (i32, i32),
    items: Vec<ItemTrigger>,
}

impl TileMap {
    /// Parse a map from its text form.
    pub fn parse(src: &str) -> Result<Self, MapError> {
        let mut grid: Vec<Vec<Tile>> = Vec::new();
        let mut player_spawns: Vec<(i32, i32)> = Vec::new();
        let mut items = Vec::new();

        for (line_idx, line) in src.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.starts_with(';') {
                continue;
            }

            let row = grid.len() as i32;
            let mut tiles = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                let px = col as i32 * TILE_SIZE;
                let py = row * TILE_SIZE;
                let tile = match ch {
                    '#' => Tile::Blocker,
                    'E' => Tile::Exit,
                    '.' | ' ' => Tile::Empty,
                    'P' => {
                        player_spawns.push((px, py));
                        Tile::Empty
                    }
                    'D' | 'R' | 'O' | 'T' => {
                        items.push(ItemTrigger {
                            tag: item_tag(ch),
                            x: px,
                            y: py,
                        });
                        Tile::Empty
                    }
                    other => {
                        return Err(MapError::UnknownTile {
                            line: line_idx + 1,
                            column: col + 1,
                            ch: other,
                        })
                    }
                };
                tiles.push(tile);
            }
            grid.push(tiles);
        }

        // Trailing blank lines carry no tiles.
        while grid.last().is_some_and(|row| row.is_empty()) {
            grid.pop();
        }

        let rows = grid.len();
        let cols = grid.iter().map(Vec::len).max().unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(MapError::Empty);
        }
        let (Ok(cols16), Ok(rows16)) = (u16::try_from(cols), u16::try_from(rows)) else {
            return Err(MapError::TooLarge { cols, rows });
        };

        let player_spawn = match player_spawns.as_slice() {
            [] => return Err(MapError::MissingPlayerSpawn),
            [first] => *first,
            [first, ..] => {
                log::warn!(
                    "map has {} player spawns, using the first at ({}, {})",
                    player_spawns.len(),
                    first.0,
                    first.1
                );
                *first
            }
        };

        let mut tiles = Vec::with_capacity(rows * cols);
        for mut row in grid {
            row.resize(cols, Tile::Empty);
            tiles.extend(row);
        }

        let (cols, rows) = (cols16, rows16);
        let blockers = coalesce(&tiles, cols, rows, Tile::Blocker);
        let exits = coalesce(&tiles, cols, rows, Tile::Exit);

        Ok(Self {
            cols,
            rows,
            tiles,
            blockers,
            exits,
            player_spawn,
            items,
        })
    }

    /// Width in tiles
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Height in tiles
    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn pixel_width(&self) -> i32 {
        self.cols as i32 * TILE_SIZE
    }

    pub fn pixel_height(&self) -> i32 {
        self.rows as i32 * TILE_SIZE
    }

    /// Tile at grid position, `None` outside the map
    pub fn tile(&self, col: i32, row: i32) -> Option<Tile> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(self.tiles[row as usize * self.cols as usize + col as usize])
    }

    /// Coalesced blocker rectangles, row-major
    pub fn blockers(&self) -> &[Rect] {
        &self.blockers
    }

    /// Coalesced exit rectangles, row-major
    pub fn exits(&self) -> &[Rect] {
        &self.exits
    }

    /// Top-left pixel of the player spawn tile
    pub fn player_spawn(&self) -> (i32, i32) {
        self.player_spawn
    }

    /// Item triggers in reading order
    pub fn items(&self) -> &[ItemTrigger] {
        &self.items
    }

    fn cells(&self, class: ObstacleClass) -> &[Rect] {
        match class {
            ObstacleClass::Blockers => &self.blockers,
            ObstacleClass::Exit => &self.exits,
        }
    }
}

impl CollisionQuery for TileMap {
    fn collide(&self, probe: &Rect, class: ObstacleClass) -> Hits {
        let mut hits = Hits::new();
        for cell in self.cells(class) {
            // Sorted by top edge: nothing further down can overlap.
            if cell.top() >= probe.bottom() {
                break;
            }
            if cell.intersects(probe) && hits.try_push(*cell).is_err() {
                log::warn!("collision query hit the {} cell cap at {:?}", MAX_HITS, probe);
                break;
            }
        }
        hits
    }
}

fn item_tag(ch: char) -> &'static str {
    match ch {
        'D' => "diamond",
        'R' => "ruby",
        'O' => "pearl",
        _ => "trophy",
    }
}

/// Merge tiles of one kind into rectangles.
///
/// Each row is split into maximal runs; a run continues the rectangle above it
/// only when that rectangle has exactly the same column span.
fn coalesce(tiles: &[Tile], cols: u16, rows: u16, want: Tile) -> Vec<Rect> {
    // (start_col, end_col, top_row) for rectangles still growing downwards
    let mut open: Vec<(u16, u16, u16)> = Vec::new();
    let mut out = Vec::new();

    let close = |(start, end, top): (u16, u16, u16), bottom: u16, out: &mut Vec<Rect>| {
        out.push(Rect::new(
            start as i32 * TILE_SIZE,
            top as i32 * TILE_SIZE,
            (end - start) as i32 * TILE_SIZE,
            (bottom - top) as i32 * TILE_SIZE,
        ));
    };

    for row in 0..rows {
        let line = &tiles[row as usize * cols as usize..(row as usize + 1) * cols as usize];
        let mut next_open = Vec::with_capacity(open.len());

        let mut col = 0u16;
        while col < cols {
            if line[col as usize] != want {
                col += 1;
                continue;
            }
            let start = col;
            while col < cols && line[col as usize] == want {
                col += 1;
            }
            match open.iter().position(|&(s, e, _)| s == start && e == col) {
                Some(i) => next_open.push(open.swap_remove(i)),
                None => next_open.push((start, col, row)),
            }
        }

        for rect in open.drain(..) {
            close(rect, row, &mut out);
        }
        open = next_open;
    }
    for rect in open {
        close(rect, rows, &mut out);
    }

    out.sort_by_key(|r| (r.y, r.x));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coalesces_rows_into_runs() {
        let map = TileMap::parse("#P.#\n####").unwrap();
        assert_eq!(
            map.blockers(),
            &[
                Rect::new(0, 0, 32, 32),
                Rect::new(96, 0, 32, 32),
                Rect::new(0, 32, 128, 32),
            ]
        );
    }

    #[test]
    fn stacks_identical_runs_vertically() {
        let map = TileMap::parse("#P\n#.\n##").unwrap();
        assert_eq!(
            map.blockers(),
            &[Rect::new(0, 0, 32, 64), Rect::new(0, 64, 64, 32)]
        );
    }

    #[test]
    fn pads_ragged_rows() {
        let map = TileMap::parse("P\n...#").unwrap();
        assert_eq!(map.cols(), 4);
        assert_eq!(map.rows(), 2);
        assert_eq!(map.tile(0, 0), Some(Tile::Empty));
        assert_eq!(map.tile(3, 0), Some(Tile::Empty));
        assert_eq!(map.tile(3, 1), Some(Tile::Blocker));
        assert_eq!(map.tile(4, 1), None);
    }

    #[test]
    fn comments_are_skipped_and_not_counted_as_rows() {
        let map = TileMap::parse("; level\n.P\n##\n").unwrap();
        assert_eq!(map.rows(), 2);
        assert_eq!(map.player_spawn(), (32, 0));
    }

    #[test]
    fn query_stops_at_capacity_without_panicking() {
        let row = "#.".repeat(40);
        let src = format!("P\n{}", row);
        let map = TileMap::parse(&src).unwrap();
        let probe = Rect::new(0, 0, map.pixel_width(), map.pixel_height());
        let hits = map.collide(&probe, ObstacleClass::Blockers);
        assert_eq!(hits.len(), MAX_HITS);
    }

    #[test]
    fn rejects_maps_wider_than_u16() {
        let src = format!("P{}\n{}", ".".repeat(65536), "#".repeat(65537));
        assert_eq!(
            TileMap::parse(&src),
            Err(MapError::TooLarge {
                cols: 65537,
                rows: 2
            })
        );
    }

    #[test]
    fn largest_width_still_parses() {
        let src = format!("P\n{}", "#".repeat(u16::MAX as usize));
        let map = TileMap::parse(&src).unwrap();
        assert_eq!(map.cols(), u16::MAX);
        assert_eq!(map.blockers(), &[Rect::new(0, 32, u16::MAX as i32 * 32, 32)]);
    }
}
