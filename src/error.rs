use crate::line::Position;
use thiserror::Error;

#[derive(Error, Debug)]
/// Errors that can be returned
pub enum Error {
    /// Error reading a word list file
    #[error("word file \"{path}\" could not be read")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// Error parsing a JSON-array word list
    #[error("word file \"{path}\" is not a valid word list: {detail}")]
    WordFileFormat { path: String, detail: String },

    /// A character that is not an uppercase letter
    #[error("invalid letter '{0}' (expect 'A'..='Z')")]
    InvalidLetter(char),

    /// A character that is neither an uppercase letter nor the blank '*'
    #[error("invalid tile '{0}' (expect 'A'..='Z' or '*')")]
    InvalidTile(char),

    /// Words must be 2 to 15 letters
    #[error("word \"{word}\" has invalid length {len} (expect 2..=15)")]
    InvalidWordLength { word: String, len: usize },

    /// A completion pattern needs exactly one space acting as wildcard
    #[error("pattern \"{0}\" must be 1..=15 uppercase letters with exactly one space")]
    InvalidPattern(String),

    /// A rack holds at most 7 tiles
    #[error("rack can hold at most 7 tiles (got {0})")]
    RackOverflow(usize),

    /// Attempt to place (part of) a word outside the board
    #[error("word \"{text}\" does not fit on the board at row {row}, col {col}")]
    WordOutOfBounds {
        text: String,
        row: usize,
        col: usize,
    },

    /// Attempt to place a letter on a cell holding a different letter
    #[error("cell {position} already holds '{existing}', cannot place '{proposed}'")]
    CellConflict {
        position: Position,
        existing: char,
        proposed: char,
    },

    /// Post-validation of a proposed main word failed
    #[error("word \"{0}\" is not in the lexicon")]
    WordNotInLexicon(String),

    /// Post-validation of a perpendicular word failed
    #[error("cross word \"{0}\" is not in the lexicon")]
    CrossWordNotInLexicon(String),

    /// The first word of a game must touch the center cell
    #[error("the first word must cover the center cell (7, 7)")]
    FirstMoveMustCoverCenter,

    /// Exchanging tiles needs a full rack and a bag with at least 7 tiles
    #[error("exchange needs a full rack and at least 7 tiles in the bag (rack {rack}, bag {bag})")]
    ExchangeNotAllowed { rack: usize, bag: usize },
}
