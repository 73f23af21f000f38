use super::{Letter, Tile, ALPHABET};
use crate::bag::Bag;
use crate::error::Error;
use rand::Rng;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// Maximum number of tiles on a rack.
pub const RACK_SIZE: usize = 7;

/// Counter slot for the blank tile, after the 26 letters.
pub(crate) const BLANK_SLOT: usize = ALPHABET;

const SLOTS: usize = ALPHABET + 1;

/// An unordered multiset of up to 7 tiles.
///
/// Kept as a fixed 27-entry counter (26 letters plus the blank), so
/// that the subset checks and updates of the masked search are O(1)
/// and copies are cheap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rack {
    counts: [u8; SLOTS],
}

impl Rack {
    pub fn new() -> Rack {
        Rack::default()
    }

    /// Number of tiles on the rack.
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    fn slot(tile: Tile) -> usize {
        match tile {
            Tile::Letter(letter) => letter.index(),
            Tile::Blank => BLANK_SLOT,
        }
    }

    /// How many copies of `tile` the rack holds.
    pub fn count(&self, tile: Tile) -> usize {
        self.counts[Rack::slot(tile)] as usize
    }

    /// Add a tile to the rack.
    /// ## Errors
    /// If the rack already holds 7 tiles.
    pub fn add(&mut self, tile: Tile) -> Result<(), Error> {
        let len = self.len();
        if len == RACK_SIZE {
            return Err(Error::RackOverflow(len + 1));
        }
        self.counts[Rack::slot(tile)] += 1;
        Ok(())
    }

    /// Remove one copy of `tile`; false if the rack does not hold it.
    pub fn remove(&mut self, tile: Tile) -> bool {
        let slot = Rack::slot(tile);
        if self.counts[slot] == 0 {
            return false;
        }
        self.counts[slot] -= 1;
        true
    }

    /// The tiles on the rack, letters in order and blanks last.
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(self.len());
        for letter in Letter::all() {
            for _ in 0..self.counts[letter.index()] {
                tiles.push(Tile::Letter(letter));
            }
        }
        for _ in 0..self.counts[BLANK_SLOT] {
            tiles.push(Tile::Blank);
        }
        tiles
    }

    /// Remove and return all tiles.
    pub fn take_all(&mut self) -> Vec<Tile> {
        let tiles = self.tiles();
        self.counts = [0; SLOTS];
        tiles
    }

    /// Top the rack up to 7 tiles with random draws from the bag.
    pub fn fill_from<R: Rng>(&mut self, bag: &mut Bag, rng: &mut R) {
        while self.len() < RACK_SIZE {
            match bag.draw(rng) {
                Some(tile) => {
                    if self.add(tile).is_err() {
                        break;
                    }
                }
                None => break,
            }
        }
    }

    pub(crate) fn counts(&self) -> &[u8; SLOTS] {
        &self.counts
    }
}

impl FromStr for Rack {
    type Err = Error;

    /// Parse a rack from uppercase letters and '*' for blanks.
    fn from_str(s: &str) -> Result<Rack, Error> {
        let mut rack = Rack::new();
        for c in s.chars() {
            rack.add(Tile::try_from(c)?)?;
        }
        Ok(rack)
    }
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for tile in self.tiles() {
            write!(f, "{}", tile)?;
        }
        Ok(())
    }
}
