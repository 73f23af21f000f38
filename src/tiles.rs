//! Basic types for letters, tiles, racks and board cells.
mod cell;
mod letter;
mod rack;

pub use cell::Cell;
pub use letter::{Letter, Tile};
pub use rack::{Rack, RACK_SIZE};

pub(crate) use letter::ALPHABET;
pub(crate) use rack::BLANK_SLOT;
