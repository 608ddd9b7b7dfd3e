//! Board model: offset hex coordinates, cell kinds and the static grid

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised while building or querying a board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("coordinate {coord} is outside the {rows}x{cols} board")]
    OutOfBounds { coord: Coord, rows: usize, cols: usize },

    #[error("board has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    #[error("unknown cell glyph {glyph:?} at {coord}")]
    UnknownGlyph { glyph: String, coord: Coord },
}

// ============================================================================
// COORDINATES
// ============================================================================

/// Offset hex coordinate (row, col)
///
/// Ordering is lexicographic by (row, col), which keeps the sorted sets used
/// in search signatures stable.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Translate by a (drow, dcol) vector
    pub const fn offset(self, (drow, dcol): (i32, i32)) -> Self {
        Self::new(self.row + drow, self.col + dcol)
    }

    /// `|Δrow| + |Δcol|` on the raw offset coordinates
    pub fn manhattan_to(self, other: Coord) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// True hex distance, via cube coordinates
    ///
    /// Even columns sit half a cell lower than odd ones.
    pub fn hex_distance_to(self, other: Coord) -> i32 {
        let (ax, ay, az) = self.to_cube();
        let (bx, by, bz) = other.to_cube();
        ((ax - bx).abs() + (ay - by).abs() + (az - bz).abs()) / 2
    }

    /// "even-q" offset to cube (q, r, s)
    fn to_cube(self) -> (i32, i32, i32) {
        let q = self.col;
        let r = self.row - (self.col + (self.col & 1)).div_euclid(2);
        (q, r, -q - r)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

// ============================================================================
// CELL KINDS
// ============================================================================

/// Contents of a single board cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Obstacle,
    Treasure,
    /// Doubles gravity
    Trap1,
    /// Halves speed
    Trap2,
    /// Throws the walker two cells further along its heading
    Trap3,
    /// Cannot be entered while any treasure is outstanding
    Trap4,
    /// Halves gravity
    Reward1,
    /// Doubles speed
    Reward2,
}

/// Every cell kind, in glyph-table order
pub const CELL_KINDS: [CellKind; 9] = [
    CellKind::Empty,
    CellKind::Obstacle,
    CellKind::Treasure,
    CellKind::Trap1,
    CellKind::Trap2,
    CellKind::Trap3,
    CellKind::Trap4,
    CellKind::Reward1,
    CellKind::Reward2,
];

impl CellKind {
    /// Display glyph
    pub fn glyph(self) -> &'static str {
        match self {
            CellKind::Empty => " ",
            CellKind::Obstacle => "O",
            CellKind::Treasure => "$",
            CellKind::Trap1 => "(~)",
            CellKind::Trap2 => "(+)",
            CellKind::Trap3 => "(x)",
            CellKind::Trap4 => "(/)",
            CellKind::Reward1 => "[+]",
            CellKind::Reward2 => "[x]",
        }
    }

    /// Parse a display glyph; surrounding whitespace is ignored except for
    /// the all-blank empty cell
    pub fn from_glyph(glyph: &str) -> Option<Self> {
        let trimmed = glyph.trim();
        if trimmed.is_empty() || trimmed == "." {
            return Some(CellKind::Empty);
        }
        CELL_KINDS
            .iter()
            .copied()
            .find(|kind| kind.glyph() == trimmed)
    }

    pub fn is_trap(self) -> bool {
        matches!(
            self,
            CellKind::Trap1 | CellKind::Trap2 | CellKind::Trap3 | CellKind::Trap4
        )
    }

    pub fn is_reward(self) -> bool {
        matches!(self, CellKind::Reward1 | CellKind::Reward2)
    }

    /// Traps and rewards are one-shot effects
    pub fn is_effect(self) -> bool {
        self.is_trap() || self.is_reward()
    }

    /// Human-readable description for logs
    pub fn describe(self) -> &'static str {
        match self {
            CellKind::Empty => "empty",
            CellKind::Obstacle => "obstacle",
            CellKind::Treasure => "treasure",
            CellKind::Trap1 => "gravity trap",
            CellKind::Trap2 => "slowing trap",
            CellKind::Trap3 => "teleport trap",
            CellKind::Trap4 => "locked trap",
            CellKind::Reward1 => "gravity reward",
            CellKind::Reward2 => "speed reward",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Static rectangular grid of cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
}

impl Board {
    /// Build from row-major cell kinds
    pub fn new(cells: Vec<Vec<CellKind>>) -> Result<Self, BoardError> {
        let rows = cells.len();
        let cols = cells.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(BoardError::Empty);
        }

        let mut flat = Vec::with_capacity(rows * cols);
        for (row, line) in cells.into_iter().enumerate() {
            if line.len() != cols {
                return Err(BoardError::Ragged {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            flat.extend(line);
        }

        Ok(Self {
            rows,
            cols,
            cells: flat,
        })
    }

    /// Build from rows of display glyphs
    pub fn from_glyph_rows<R, S>(rows: &[R]) -> Result<Self, BoardError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut cells = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let parsed = line
                .as_ref()
                .iter()
                .enumerate()
                .map(|(col, glyph)| {
                    CellKind::from_glyph(glyph.as_ref()).ok_or_else(|| {
                        BoardError::UnknownGlyph {
                            glyph: glyph.as_ref().to_string(),
                            coord: Coord::new(row as i32, col as i32),
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(parsed);
        }
        Self::new(cells)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.rows
            && (coord.col as usize) < self.cols
    }

    /// Kind of the cell at `coord`
    pub fn cell_kind(&self, coord: Coord) -> Result<CellKind, BoardError> {
        if !self.in_bounds(coord) {
            return Err(BoardError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.cells[coord.row as usize * self.cols + coord.col as usize])
    }

    /// In bounds and not an obstacle
    pub fn is_traversable(&self, coord: Coord) -> bool {
        matches!(self.cell_kind(coord), Ok(kind) if kind != CellKind::Obstacle)
    }

    /// Iterate every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Coord, CellKind)> + '_ {
        self.cells.iter().enumerate().map(move |(i, &kind)| {
            let coord = Coord::new((i / self.cols) as i32, (i % self.cols) as i32);
            (coord, kind)
        })
    }

    pub fn treasure_coordinates(&self) -> BTreeSet<Coord> {
        self.cells()
            .filter(|(_, kind)| *kind == CellKind::Treasure)
            .map(|(coord, _)| coord)
            .collect()
    }

    /// All trap and reward cells
    pub fn effect_coordinates(&self) -> BTreeSet<Coord> {
        self.cells()
            .filter(|(_, kind)| kind.is_effect())
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Rows of display glyphs, the inverse of [`Board::from_glyph_rows`]
    pub fn glyph_rows(&self) -> Vec<Vec<String>> {
        self.cells
            .chunks(self.cols)
            .map(|line| line.iter().map(|kind| kind.glyph().to_string()).collect())
            .collect()
    }
}
