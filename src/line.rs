use serde::{Deserialize, Serialize};
use std::fmt;

/// The dimension of the board: N x N cells.
pub(crate) const N: usize = 15;

/// The center cell, a double-word square that the first move must cover.
pub const CENTER: Position = Position { row: 7, col: 7 };

/// Orientation of a line or word on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// The perpendicular direction.
    pub fn ortho(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// (row, col) increment when stepping along this direction.
    pub(crate) fn step(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A cell coordinate: row and column, each in 0..15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Position {
        debug_assert!(row < N && col < N);
        Position { row, col }
    }

    /// The position offset by (dr, dc), or None when it leaves the board.
    pub(crate) fn offset(self, dr: isize, dc: isize) -> Option<Position> {
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        if (0..N as isize).contains(&row) && (0..N as isize).contains(&col) {
            Some(Position {
                row: row as usize,
                col: col as usize,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A full row or column, viewed as a sequence of 15 positions.
///
/// The same search runs across a row or down a column; the line maps
/// its linear offsets to board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    pub direction: Direction,
    pub index: usize,
}

impl Line {
    pub fn new(direction: Direction, index: usize) -> Line {
        debug_assert!(index < N);
        Line { direction, index }
    }

    /// Board position of the cell at `offset` in this line.
    pub fn position(self, offset: usize) -> Position {
        debug_assert!(offset < N);
        match self.direction {
            Direction::Across => Position::new(self.index, offset),
            Direction::Down => Position::new(offset, self.index),
        }
    }

    /// Offset in this line of a position lying on it.
    pub fn offset_of(self, pos: Position) -> usize {
        match self.direction {
            Direction::Across => {
                debug_assert!(pos.row == self.index);
                pos.col
            }
            Direction::Down => {
                debug_assert!(pos.col == self.index);
                pos.row
            }
        }
    }

    /// All 15 positions of the line, in order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (0..N).map(move |i| self.position(i))
    }

    /// The 30 lines of the board: 15 across, then 15 down.
    pub fn all() -> impl Iterator<Item = Line> {
        (0..N)
            .map(|i| Line::new(Direction::Across, i))
            .chain((0..N).map(|i| Line::new(Direction::Down, i)))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.direction, self.index)
    }
}
