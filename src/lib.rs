#![deny(
    clippy::used_underscore_binding,
    clippy::map_unwrap_or,
    clippy::int_plus_one,
    clippy::string_add_assign,
    clippy::if_not_else,
    clippy::invalid_upcast_comparisons,
    clippy::mut_mut,
    clippy::items_after_statements,
    clippy::mem_forget
)]

//! A scrabble move-generation engine for Rust.
//! <br>
//! This crate finds and scores every legal placement for a board and a
//! rack of tiles: a trie-based lexicon answers membership, wildcard
//! completion and masked rack searches; an anchor-driven board scan
//! turns each row and column into a mask of per-cell constraints; and
//! the generator enumerates candidate words, derives the perpendicular
//! words they form, assigns blanks, and scores under the full rule set
//! (premium squares, blanks worth zero, 50 point bingo bonus).
//!
//! The lexicon must be an uppercase word list, one word per line or a
//! JSON array of strings. English and french tile sets are built in.
//! With the `rayon` feature (on by default) the 30 board lines are
//! searched in parallel.
//!
//! # Basic usage
//! ```
//! # use scrabble_engine::{Board, Generator, Language, Lexicon, Rack, Error};
//! let lexicon = Lexicon::from_words(&["DESK", "TOP", "POT"])?;
//! let generator = Generator::new(&lexicon);
//! let mut board = Board::new(Language::Fr);
//! let rack: Rack = "DESKTOP".parse()?;
//! let best = generator.best_solution(&board, &rack)?.expect("a move exists");
//! assert_eq!(best.word().text(), "DESK");
//! assert_eq!(best.value(), 28);
//! board.apply_solution(&best)?;
//! println!("{}", board);
//! # Ok::<(), Error>(())
//! ```
mod bag;
mod board;
mod error;
mod generator;
mod grid;
mod letterset;
mod lexicon;
mod line;
mod mask;
mod tiles;
mod tileset;
mod turn;
mod word;

pub use crate::bag::Bag;
pub use crate::board::{Board, LineNeighbors};
pub use crate::error::Error;
pub use crate::generator::{Generator, Solution};
pub use crate::grid::{Bonus, Grid};
pub use crate::letterset::LetterSet;
pub use crate::lexicon::{Completion, Completions, Lexicon};
pub use crate::line::{Direction, Line, Position, CENTER};
pub use crate::mask::{Mask, MaskCell};
pub use crate::tiles::{Cell, Letter, Rack, Tile, RACK_SIZE};
pub use crate::tileset::{Language, TileSet};
pub use crate::turn::{exchange, Phase, Proposal, Turn, TurnOutcome};
pub use crate::word::{BlankTile, CrossWord, Word};
