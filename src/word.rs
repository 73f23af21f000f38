use crate::error::Error;
use crate::line::{Direction, Line, Position, N};
use crate::tiles::Letter;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A word at a fixed place on the board: text, direction and the
/// position of its first letter.
///
/// No board reference is kept; words are built and scored in large
/// numbers before one of them is committed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Word {
    text: String,
    direction: Direction,
    origin: Position,
}

impl Word {
    /// Build a word, checking its text and that it fits on the board.
    /// ## Errors
    /// If the text is not 2..=15 uppercase letters, or the word runs
    /// past the board edge.
    pub fn new(text: &str, direction: Direction, origin: Position) -> Result<Word, Error> {
        let len = text.len();
        if !(2..=N).contains(&len) || !text.bytes().all(|b| b.is_ascii_uppercase()) {
            if let Some(bad) = text.chars().find(|c| !c.is_ascii_uppercase()) {
                return Err(Error::InvalidLetter(bad));
            }
            return Err(Error::InvalidWordLength {
                word: text.into(),
                len,
            });
        }
        let (dr, dc) = direction.step();
        if origin.row + dr * (len - 1) >= N || origin.col + dc * (len - 1) >= N {
            return Err(Error::WordOutOfBounds {
                text: text.into(),
                row: origin.row,
                col: origin.col,
            });
        }
        Ok(Word {
            text: text.into(),
            direction,
            origin,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// The line this word lies on.
    pub fn line(&self) -> Line {
        match self.direction {
            Direction::Across => Line::new(Direction::Across, self.origin.row),
            Direction::Down => Line::new(Direction::Down, self.origin.col),
        }
    }

    /// The letters of the word, in order.
    pub fn letters(&self) -> impl Iterator<Item = Letter> + '_ {
        self.text.bytes().map(|b| Letter::from_index(b - b'A'))
    }

    /// The board positions of the word, first letter to last.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let (dr, dc) = self.direction.step();
        let origin = self.origin;
        (0..self.len()).map(move |i| Position::new(origin.row + dr * i, origin.col + dc * i))
    }

    pub fn covers(&self, pos: Position) -> bool {
        self.positions().any(|p| p == pos)
    }

    /// True if every position of `other` is covered by this word.
    ///
    /// Placing LES over an existing LE engulfs it: the shorter word
    /// loses its identity in the board index.
    pub fn engulfs(&self, other: &Word) -> bool {
        other.positions().all(|pos| self.covers(pos))
    }

    /// Offset in this word of the cell where `other` crosses it, or
    /// None when the words do not cross.
    pub fn intersection_index(&self, other: &Word) -> Option<usize> {
        if other.direction != self.direction.ortho() {
            return None;
        }
        let (i, crossed) = match self.direction {
            Direction::Across => (
                other.origin.col.checked_sub(self.origin.col)?,
                other.origin.row <= self.origin.row
                    && self.origin.row < other.origin.row + other.len(),
            ),
            Direction::Down => (
                other.origin.row.checked_sub(self.origin.row)?,
                other.origin.col <= self.origin.col
                    && self.origin.col < other.origin.col + other.len(),
            ),
        };
        if i < self.len() && crossed {
            Some(i)
        } else {
            None
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.text, self.direction, self.origin)
    }
}

/// A perpendicular word formed as a side effect of placing a main
/// word; `main_index` is the offset of the shared cell inside the
/// cross word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossWord {
    pub word: Word,
    pub main_index: usize,
}

/// A blank used in a word: offset in the word and the letter it
/// stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankTile {
    pub index: usize,
    pub letter: Letter,
}
