use crate::error::Error;
use crate::grid::Grid;
use crate::line::{Direction, Line, Position, N};
use crate::tiles::{Cell, Letter, Tile};
use crate::tileset::{Language, TileSet};
use crate::word::{BlankTile, CrossWord, Word};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Filled positions adjacent to a line, one list per side, in line
/// order. Used by the mask builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNeighbors {
    pub lower: Vec<Position>,
    pub higher: Vec<Position>,
}

/// The state of a scrabble board.
///
/// Holds the 15x15 cells with their effective tile values, the set of
/// placed words with a per-position index, the premium grid and the
/// tile values of the chosen language, and the move counter.
///
/// A letter, once placed, is never overwritten; every letter on the
/// board belongs to at least one indexed word.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "BoardState", into = "BoardState")]
pub struct Board {
    cells: Vec<Cell>,
    words: BTreeSet<Word>,
    index: HashMap<Position, Vec<Word>>,
    moves: u32,
    grid: Grid,
    tileset: TileSet,
}

/// Serialized form of a [`Board`]: the index is rebuilt, the grid and
/// tile values are fixed per language.
#[derive(Serialize, Deserialize)]
struct BoardState {
    language: Language,
    cells: Vec<Cell>,
    words: BTreeSet<Word>,
    moves: u32,
}

impl From<Board> for BoardState {
    fn from(board: Board) -> BoardState {
        BoardState {
            language: board.tileset.language(),
            cells: board.cells,
            words: board.words,
            moves: board.moves,
        }
    }
}

impl From<BoardState> for Board {
    fn from(state: BoardState) -> Board {
        let mut index: HashMap<Position, Vec<Word>> = HashMap::new();
        for word in &state.words {
            for pos in word.positions() {
                index.entry(pos).or_default().push(word.clone());
            }
        }
        Board {
            cells: state.cells,
            words: state.words,
            index,
            moves: state.moves,
            grid: Grid::standard(),
            tileset: TileSet::new(state.language),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(Language::Fr)
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.tileset.language() == other.tileset.language()
            && self.cells == other.cells
            && self.words == other.words
            && self.moves == other.moves
    }
}

/// Display the board as 15 lines of 15 cells. Empty cells show as
/// ".", letters placed by a blank show lowercase.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..N {
            for col in 0..N {
                let c = match self.cell_at(Position::new(row, col)) {
                    Cell::Empty => '.',
                    Cell::Occupied { letter, value: 0 } => letter.as_char().to_ascii_lowercase(),
                    Cell::Occupied { letter, .. } => letter.as_char(),
                };
                write!(f, "{}", c)?;
            }
            if row < N - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Board {
    /// Create a new empty board with the tile values of `language`.
    pub fn new(language: Language) -> Board {
        Board {
            cells: vec![Cell::Empty; N * N],
            words: BTreeSet::new(),
            index: HashMap::new(),
            moves: 0,
            grid: Grid::standard(),
            tileset: TileSet::new(language),
        }
    }

    pub fn language(&self) -> Language {
        self.tileset.language()
    }

    pub fn tileset(&self) -> &TileSet {
        &self.tileset
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of main words played so far.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn cell_at(&self, pos: Position) -> Cell {
        self.cells[pos.row * N + pos.col]
    }

    pub fn letter_at(&self, pos: Position) -> Option<Letter> {
        self.cell_at(pos).letter()
    }

    /// Effective value of the tile at `pos`: 0 when empty or placed
    /// by a blank.
    pub fn value_at(&self, pos: Position) -> u8 {
        self.cell_at(pos).value()
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.cell_at(pos).is_empty()
    }

    /// The placed words, in order.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    pub fn has_word(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    /// The placed words covering `pos` (at most two).
    pub fn words_at(&self, pos: Position) -> &[Word] {
        self.index.get(&pos).map_or(&[], Vec::as_slice)
    }

    /// Filled positions directly next to the line, per side.
    pub fn neighbors_of_line(&self, line: Line) -> LineNeighbors {
        let (dr, dc) = line.direction.ortho().step();
        let mut lower = Vec::new();
        let mut higher = Vec::new();
        for pos in line.positions() {
            if let Some(p) = pos.offset(-(dr as isize), -(dc as isize)) {
                if !self.is_empty(p) {
                    lower.push(p);
                }
            }
            if let Some(p) = pos.offset(dr as isize, dc as isize) {
                if !self.is_empty(p) {
                    higher.push(p);
                }
            }
        }
        LineNeighbors { lower, higher }
    }

    /// Place a main word on the board.
    ///
    /// Every target cell must be empty or already hold the same
    /// letter. Cells listed in `blanks` are written with an effective
    /// value of 0. An existing word whose positions are a subset of
    /// the new word's is retracted from the index first (LE replaced
    /// by LES). Increments the move counter.
    ///
    /// Returns the rack tiles consumed, blanks reported as blanks.
    /// ## Errors
    /// [`Error::CellConflict`] if a cell holds a different letter; the
    /// board is left unchanged.
    /// ## Examples
    /// ```
    /// # use scrabble_engine::{Board, Direction, Position, Word, Error};
    /// # use std::collections::BTreeSet;
    /// let mut board = Board::default();
    /// let word = Word::new("TICS", Direction::Across, Position::new(7, 7))?;
    /// let used = board.place(&word, &BTreeSet::new())?;
    /// assert_eq!(used.len(), 4);
    /// assert!(!board.is_empty(Position::new(7, 7)));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn place(&mut self, word: &Word, blanks: &BTreeSet<BlankTile>) -> Result<Vec<Tile>, Error> {
        let placed = self.place_word(word, blanks, true)?;
        Ok(placed
            .into_iter()
            .map(|(i, letter)| {
                if blanks.iter().any(|b| b.index == i) {
                    Tile::Blank
                } else {
                    Tile::Letter(letter)
                }
            })
            .collect())
    }

    /// Commit a scored solution: the main word, then every derived
    /// cross word (cross words do not count as moves).
    ///
    /// Returns the rack tiles consumed by the main word.
    /// ## Errors
    /// [`Error::CellConflict`] as for [`place`](Board::place).
    pub fn apply_solution(
        &mut self,
        solution: &crate::generator::Solution,
    ) -> Result<Vec<Tile>, Error> {
        let used = self.place(solution.word(), solution.blanks())?;
        for cross in solution.cross_words() {
            self.place_word(&cross.word, &BTreeSet::new(), false)?;
        }
        Ok(used)
    }

    fn place_word(
        &mut self,
        word: &Word,
        blanks: &BTreeSet<BlankTile>,
        main: bool,
    ) -> Result<Vec<(usize, Letter)>, Error> {
        // check all cells up front so a conflict leaves the board intact
        for (letter, pos) in word.letters().zip(word.positions()) {
            if let Some(existing) = self.letter_at(pos) {
                if existing != letter {
                    return Err(Error::CellConflict {
                        position: pos,
                        existing: existing.as_char(),
                        proposed: letter.as_char(),
                    });
                }
            }
        }

        // retract words the new word engulfs (LE under LES)
        let engulfed: Vec<Word> = self
            .words
            .iter()
            .filter(|w| *w != word && word.engulfs(w))
            .cloned()
            .collect();
        for old in engulfed {
            self.words.remove(&old);
            for pos in old.positions() {
                if let Some(entry) = self.index.get_mut(&pos) {
                    entry.retain(|w| w != &old);
                }
            }
        }

        let mut placed = Vec::new();
        for (i, (letter, pos)) in word.letters().zip(word.positions()).enumerate() {
            if self.is_empty(pos) {
                let value = if blanks.iter().any(|b| b.index == i) {
                    0
                } else {
                    self.tileset.points(letter) as u8
                };
                self.cells[pos.row * N + pos.col] = Cell::Occupied { letter, value };
                placed.push((i, letter));
            }
            let entry = self.index.entry(pos).or_default();
            if !entry.contains(word) {
                entry.push(word.clone());
            }
        }
        self.words.insert(word.clone());
        if main {
            self.moves += 1;
        }
        Ok(placed)
    }

    /// Value of a main word if it were placed now, per the standard
    /// rules: letter premiums count only on newly covered cells, word
    /// premiums multiply once per newly covered cell, tiles already on
    /// the board contribute their effective value unmultiplied, and
    /// placing 7 tiles earns the 50 point bingo bonus.
    ///
    /// Must be called before the word is committed; afterwards new and
    /// old tiles can no longer be told apart.
    pub fn word_value(&self, word: &Word, blanks: &BTreeSet<BlankTile>) -> u32 {
        let mut value = 0;
        let mut word_coeff = 1;
        let mut new_tiles = 0;
        for (i, (letter, pos)) in word.letters().zip(word.positions()).enumerate() {
            if self.is_empty(pos) {
                new_tiles += 1;
                if !blanks.iter().any(|b| b.index == i) {
                    value += self.tileset.points(letter) * self.grid.letter_multiplier(pos);
                }
                word_coeff *= self.grid.word_multiplier(pos);
            } else {
                value += u32::from(self.value_at(pos));
            }
        }
        let mut total = value * word_coeff;
        if new_tiles >= 7 {
            total += 50;
        }
        total
    }

    /// Value of a cross word formed by the main word. Only the
    /// crossing cell is newly placed: it alone sees premiums (and
    /// scores 0 when covered by a blank); the other cells contribute
    /// their effective values.
    pub fn cross_word_value(&self, cross: &CrossWord, blank_at_crossing: bool) -> u32 {
        let mut value = 0;
        let mut word_coeff = 1;
        for (i, (letter, pos)) in cross
            .word
            .letters()
            .zip(cross.word.positions())
            .enumerate()
        {
            if i == cross.main_index {
                if !blank_at_crossing {
                    value += self.tileset.points(letter) * self.grid.letter_multiplier(pos);
                }
                word_coeff *= self.grid.word_multiplier(pos);
            } else {
                value += u32::from(self.value_at(pos));
            }
        }
        value * word_coeff
    }

    /// The perpendicular word that would run through `pos` if `letter`
    /// were placed there.
    pub(crate) fn cross_text(&self, pos: Position, direction: Direction, letter: Letter) -> String {
        let (dr, dc) = direction.step();
        let mut start = pos;
        while let Some(prev) = start.offset(-(dr as isize), -(dc as isize)) {
            if self.is_empty(prev) {
                break;
            }
            start = prev;
        }
        let mut text = String::new();
        let mut cursor = Some(start);
        while let Some(cur) = cursor {
            if cur == pos {
                text.push(letter.as_char());
            } else {
                match self.letter_at(cur) {
                    Some(l) => text.push(l.as_char()),
                    None => break,
                }
            }
            cursor = cur.offset(dr as isize, dc as isize);
        }
        text
    }
}
