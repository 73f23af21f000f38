use crate::tiles::{Letter, Tile};
use serde::{Deserialize, Serialize};

/// These languages are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// English: 100 tiles including 2 blanks
    En,
    /// French: 102 tiles including 2 blanks
    Fr,
}

/// count, points
type TileInfo = (u32, u32);

/// Every language plays with two blanks.
const BLANK_COUNT: u32 = 2;

// Distributions indexed by letter, 'A'..='Z'.
const TILES_EN: [TileInfo; 26] = [
    (9, 1),  // A
    (2, 3),  // B
    (2, 3),  // C
    (4, 2),  // D
    (12, 1), // E
    (2, 4),  // F
    (3, 2),  // G
    (2, 4),  // H
    (9, 1),  // I
    (1, 8),  // J
    (1, 5),  // K
    (4, 1),  // L
    (2, 3),  // M
    (6, 1),  // N
    (8, 1),  // O
    (2, 3),  // P
    (1, 10), // Q
    (6, 1),  // R
    (4, 1),  // S
    (6, 1),  // T
    (4, 1),  // U
    (2, 4),  // V
    (2, 4),  // W
    (1, 8),  // X
    (2, 4),  // Y
    (1, 10), // Z
];

const TILES_FR: [TileInfo; 26] = [
    (9, 1),  // A
    (2, 3),  // B
    (2, 3),  // C
    (3, 2),  // D
    (15, 1), // E
    (2, 4),  // F
    (2, 2),  // G
    (2, 4),  // H
    (8, 1),  // I
    (1, 8),  // J
    (1, 10), // K
    (5, 1),  // L
    (3, 2),  // M
    (6, 1),  // N
    (6, 1),  // O
    (2, 3),  // P
    (1, 8),  // Q
    (6, 1),  // R
    (6, 1),  // S
    (6, 1),  // T
    (6, 1),  // U
    (2, 4),  // V
    (1, 10), // W
    (1, 10), // X
    (1, 10), // Y
    (1, 10), // Z
];

/// The tile distribution and point values for a language.
#[derive(Debug, Clone)]
pub struct TileSet {
    language: Language,
    tiles: &'static [TileInfo; 26],
}

impl TileSet {
    /// Return a new `TileSet` for language.
    pub fn new(language: Language) -> TileSet {
        let tiles = match language {
            Language::En => &TILES_EN,
            Language::Fr => &TILES_FR,
        };
        TileSet { language, tiles }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Point value of a letter tile. Blanks are worth 0.
    pub fn points(&self, letter: Letter) -> u32 {
        self.tiles[letter.index()].1
    }

    /// Number of copies of a letter in the full bag.
    pub fn count(&self, letter: Letter) -> u32 {
        self.tiles[letter.index()].0
    }

    pub fn blank_count(&self) -> u32 {
        BLANK_COUNT
    }

    /// Total number of tiles in the full bag, blanks included.
    pub fn tile_count(&self) -> u32 {
        self.tiles.iter().map(|&(count, _)| count).sum::<u32>() + BLANK_COUNT
    }

    /// Every distinct tile with its count, the blank last.
    pub fn tiles(&self) -> impl Iterator<Item = (Tile, u32)> + '_ {
        Letter::all()
            .map(move |letter| (Tile::Letter(letter), self.count(letter)))
            .chain(std::iter::once((Tile::Blank, BLANK_COUNT)))
    }
}
