//! Hex topology over offset coordinates
//!
//! The board is a rectangular array of flat-topped hexes in which even
//! columns sit half a cell lower than odd ones. Vertical moves keep the
//! column; the four diagonal moves change the column by one and change the
//! row by 0 or 1 depending on the parity of the column being left.

use crate::board::{Board, Coord};
use serde::{Deserialize, Serialize};

/// Hex headings, clockwise from north
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    SE,
    S,
    SW,
    NW,
}

/// All headings in neighbor-enumeration order
pub const DIRECTIONS: [Direction; 6] = [
    Direction::N,
    Direction::NE,
    Direction::SE,
    Direction::S,
    Direction::SW,
    Direction::NW,
];

/// (drow, dcol) offsets leaving an even column
pub const EVEN_COL_OFFSETS: [(i32, i32); 6] = [
    (-1, 0), // N
    (0, 1),  // NE
    (1, 1),  // SE
    (1, 0),  // S
    (1, -1), // SW
    (0, -1), // NW
];

/// (drow, dcol) offsets leaving an odd column
pub const ODD_COL_OFFSETS: [(i32, i32); 6] = [
    (-1, 0),  // N
    (-1, 1),  // NE
    (0, 1),   // SE
    (1, 0),   // S
    (0, -1),  // SW
    (-1, -1), // NW
];

/// Secondary displacement applied by the teleport trap, keyed by the
/// heading the walker entered the trap with. Two further hex steps along the
/// same heading; parity independent.
pub const TELEPORT_DISPLACEMENTS: [(i32, i32); 6] = [
    (-2, 0),  // N
    (-1, 2),  // NE
    (1, 2),   // SE
    (2, 0),   // S
    (1, -2),  // SW
    (-1, -2), // NW
];

impl Direction {
    fn index(self) -> usize {
        self as usize
    }

    /// Direction vector when leaving a cell in column `col`
    pub fn offset(self, col: i32) -> (i32, i32) {
        if col.rem_euclid(2) == 0 {
            EVEN_COL_OFFSETS[self.index()]
        } else {
            ODD_COL_OFFSETS[self.index()]
        }
    }

    pub fn opposite(self) -> Direction {
        DIRECTIONS[(self.index() + 3) % 6]
    }

    /// Heading that turns `from` into `to`, if they are adjacent
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        DIRECTIONS
            .iter()
            .copied()
            .find(|dir| from.offset(dir.offset(from.col)) == to)
    }
}

/// Cell one step from `coord` along `dir`, bounds unchecked
pub fn step(coord: Coord, dir: Direction) -> Coord {
    coord.offset(dir.offset(coord.col))
}

/// In-bounds, traversable neighbors with the heading used to reach each
pub fn neighbors(board: &Board, coord: Coord) -> Vec<(Coord, Direction)> {
    DIRECTIONS
        .iter()
        .map(|&dir| (step(coord, dir), dir))
        .filter(|&(next, _)| board.is_traversable(next))
        .collect()
}

/// Displacement the teleport trap applies after entering along `dir`
pub fn teleport_displacement(dir: Direction) -> (i32, i32) {
    TELEPORT_DISPLACEMENTS[dir.index()]
}

/// Where the teleport trap at `landing` throws a walker that arrived along
/// `dir`. `None` when the destination is off the board or blocked.
pub fn teleport_destination(board: &Board, landing: Coord, dir: Direction) -> Option<Coord> {
    let dest = landing.offset(teleport_displacement(dir));
    board.is_traversable(dest).then_some(dest)
}
