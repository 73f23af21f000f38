use crate::board::Board;
use crate::error::Error;
use crate::lexicon::Lexicon;
use crate::line::{Direction, Line, Position, CENTER, N};
use crate::mask::{Mask, MaskCell};
use crate::tiles::{Letter, Rack, RACK_SIZE};
use crate::word::{BlankTile, CrossWord, Word};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A scored candidate move: the main word, the cross words it forms,
/// the blanks it uses, and the total value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    word: Word,
    cross_words: Vec<CrossWord>,
    blanks: BTreeSet<BlankTile>,
    value: u32,
    new_tiles: usize,
}

impl Solution {
    /// Score a candidate against the current board. Must run before
    /// the word is committed.
    pub(crate) fn score(
        board: &Board,
        word: Word,
        cross_words: Vec<CrossWord>,
        blanks: BTreeSet<BlankTile>,
    ) -> Solution {
        let mut value = board.word_value(&word, &blanks);
        for cross in &cross_words {
            let blank_at_crossing = word
                .intersection_index(&cross.word)
                .map_or(false, |i| blanks.iter().any(|b| b.index == i));
            value += board.cross_word_value(cross, blank_at_crossing);
        }
        let new_tiles = word
            .positions()
            .filter(|&pos| board.is_empty(pos))
            .count();
        Solution {
            word,
            cross_words,
            blanks,
            value,
            new_tiles,
        }
    }

    /// The main word.
    pub fn word(&self) -> &Word {
        &self.word
    }

    /// The perpendicular words formed as side effects.
    pub fn cross_words(&self) -> &[CrossWord] {
        &self.cross_words
    }

    /// The blanks used, with the letters they stand for.
    pub fn blanks(&self) -> &BTreeSet<BlankTile> {
        &self.blanks
    }

    /// Total value: main word plus all cross words.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Number of tiles taken from the rack.
    pub fn new_tiles(&self) -> usize {
        self.new_tiles
    }

    /// True when the move plays all 7 rack tiles.
    pub fn is_bingo(&self) -> bool {
        self.new_tiles >= RACK_SIZE
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.word, self.value)
    }
}

/// Enumerates every legal placement for a board and rack.
///
/// The lexicon is read-only and shared; the generator itself holds no
/// mutable state, so one instance can serve any number of queries.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> Generator<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Generator<'a> {
        Generator { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        self.lexicon
    }

    /// Every legal placement, sorted by value ascending with the main
    /// word text as tie break, so identical inputs always return the
    /// identical order.
    /// ## Examples
    /// ```
    /// # use scrabble_engine::{Board, Generator, Lexicon, Rack, Error};
    /// let lexicon = Lexicon::from_words(&["DESK", "TOP", "POT"])?;
    /// let generator = Generator::new(&lexicon);
    /// let board = Board::default();
    /// let rack: Rack = "DESKTOP".parse()?;
    /// let solutions = generator.solutions_for(&board, &rack)?;
    /// assert_eq!(solutions.len(), 3);
    /// assert_eq!(solutions.last().unwrap().word().text(), "DESK");
    /// # Ok::<(), Error>(())
    /// ```
    pub fn solutions_for(&self, board: &Board, rack: &Rack) -> Result<Vec<Solution>, Error> {
        let mut solutions = if board.moves() == 0 {
            self.first_move_solutions(board, rack)?
        } else {
            let lines: Vec<Line> = Line::all().collect();
            let per_line: Result<Vec<Vec<Solution>>, Error>;
            #[cfg(feature = "rayon")]
            {
                per_line = lines
                    .par_iter()
                    .map(|&line| self.line_solutions(board, line, rack))
                    .collect();
            }
            #[cfg(not(feature = "rayon"))]
            {
                per_line = lines
                    .iter()
                    .map(|&line| self.line_solutions(board, line, rack))
                    .collect();
            }
            per_line?.into_iter().flatten().collect()
        };
        solutions.sort_by(|a, b| {
            a.value
                .cmp(&b.value)
                .then_with(|| a.word.text().cmp(b.word.text()))
        });
        Ok(solutions)
    }

    /// The highest scoring placement, or None when no move exists
    /// (the caller then decides between exchanging and passing).
    pub fn best_solution(&self, board: &Board, rack: &Rack) -> Result<Option<Solution>, Error> {
        Ok(self.solutions_for(board, rack)?.pop())
    }

    /// First move: a 7-cell open window laid across the center cell.
    fn first_move_solutions(&self, board: &Board, rack: &Rack) -> Result<Vec<Solution>, Error> {
        let mask = vec![MaskCell::Open; RACK_SIZE];
        let mut solutions = Vec::new();
        for text in self.lexicon.masked_rack_search(&mask, rack, 2) {
            let word = Word::new(&text, Direction::Across, CENTER)?;
            let blanks = assign_blanks(&text, &mask, rack);
            solutions.push(Solution::score(board, word, Vec::new(), blanks));
        }
        Ok(solutions)
    }

    fn line_solutions(&self, board: &Board, line: Line, rack: &Rack) -> Result<Vec<Solution>, Error> {
        let mask = Mask::for_line(board, self.lexicon, line)?;
        let mut solutions = Vec::new();
        for (anchor, start) in extension_windows(&mask) {
            let window = &mask.cells()[start..];
            // the candidate must span from the window start through the
            // anchor and absorb any occupied run just after it
            let mut min_length = anchor + 1 - start;
            while min_length < window.len() && window[min_length].is_letter() {
                min_length += 1;
            }
            for text in self.lexicon.masked_rack_search(window, rack, min_length) {
                let end = start + text.len();
                if end < N && mask[end].is_letter() {
                    // would truncate the word lying just after it
                    continue;
                }
                let word = Word::new(&text, line.direction, line.position(start))?;
                if board.has_word(&word) {
                    continue;
                }
                let prefix = &window[..text.len()];
                if prefix.iter().all(MaskCell::is_letter) {
                    // no tile of ours would be placed
                    continue;
                }
                let cross_words = self.derive_cross_words(line, start, &text, prefix)?;
                let blanks = assign_blanks(&text, prefix, rack);
                solutions.push(Solution::score(board, word, cross_words, blanks));
            }
        }
        Ok(solutions)
    }

    fn derive_cross_words(
        &self,
        line: Line,
        start: usize,
        text: &str,
        window: &[MaskCell],
    ) -> Result<Vec<CrossWord>, Error> {
        let mut cross_words = Vec::new();
        for (i, cell) in window.iter().enumerate() {
            if let MaskCell::Cross(completions) = cell {
                let letter = Letter::from_index(text.as_bytes()[i] - b'A');
                if let Some(completion) = completions.get(&letter) {
                    let origin = match line.direction {
                        Direction::Across => {
                            Position::new(line.index - completion.index, start + i)
                        }
                        Direction::Down => {
                            Position::new(start + i, line.index - completion.index)
                        }
                    };
                    cross_words.push(CrossWord {
                        word: Word::new(&completion.text, line.direction.ortho(), origin)?,
                        main_index: completion.index,
                    });
                }
            }
        }
        Ok(cross_words)
    }

    /// Validate a caller-proposed word against the lexicon, the board
    /// and the cross checks, and build the scored solution for it.
    /// ## Errors
    /// - [`Error::WordNotInLexicon`] when the text is unknown;
    /// - [`Error::FirstMoveMustCoverCenter`] on a first move that
    ///   misses (7, 7);
    /// - [`Error::CellConflict`] when the word fights a placed letter;
    /// - [`Error::CrossWordNotInLexicon`] when a perpendicular word it
    ///   would form is invalid.
    pub fn solution_for_word(
        &self,
        board: &Board,
        word: Word,
        blanks: BTreeSet<BlankTile>,
    ) -> Result<Solution, Error> {
        if !self.lexicon.contains(word.text())? {
            return Err(Error::WordNotInLexicon(String::from(word.text())));
        }
        if board.moves() == 0 && !word.covers(CENTER) {
            return Err(Error::FirstMoveMustCoverCenter);
        }
        for (letter, pos) in word.letters().zip(word.positions()) {
            if let Some(existing) = board.letter_at(pos) {
                if existing != letter {
                    return Err(Error::CellConflict {
                        position: pos,
                        existing: existing.as_char(),
                        proposed: letter.as_char(),
                    });
                }
            }
        }
        let line = word.line();
        let mask = Mask::for_line(board, self.lexicon, line)?;
        let start = line.offset_of(word.origin());
        let mut cross_words = Vec::new();
        for (i, (letter, pos)) in word.letters().zip(word.positions()).enumerate() {
            if !board.is_empty(pos) {
                continue;
            }
            match &mask[start + i] {
                MaskCell::Cross(completions) => match completions.get(&letter) {
                    Some(completion) => {
                        let origin = match line.direction {
                            Direction::Across => {
                                Position::new(line.index - completion.index, start + i)
                            }
                            Direction::Down => {
                                Position::new(start + i, line.index - completion.index)
                            }
                        };
                        cross_words.push(CrossWord {
                            word: Word::new(&completion.text, line.direction.ortho(), origin)?,
                            main_index: completion.index,
                        });
                    }
                    None => {
                        return Err(Error::CrossWordNotInLexicon(board.cross_text(
                            pos,
                            line.direction.ortho(),
                            letter,
                        )))
                    }
                },
                MaskCell::Dead => {
                    return Err(Error::CrossWordNotInLexicon(board.cross_text(
                        pos,
                        line.direction.ortho(),
                        letter,
                    )))
                }
                _ => {}
            }
        }
        Ok(Solution::score(board, word, cross_words, blanks))
    }
}

/// Anchors: empty cells directly before an occupied cell on the line.
fn anchor_indices(mask: &Mask) -> Vec<usize> {
    (0..N - 1)
        .filter(|&i| mask[i].is_vacant() && mask[i + 1].is_letter())
        .collect()
}

/// The left-extension windows, as (anchor, start) pairs.
///
/// A window is the suffix of the mask beginning at `start`; candidates
/// from it must reach the anchor (and thus connect to the board).
///
/// Every occupied run contributes the window starting on its first
/// letter: a candidate beginning there absorbs the run and can bridge
/// the gap behind it into the next run, so a single new tile dropped
/// between two runs is found with the run letters forced around it.
/// An anchor squeezed directly behind a run is served by that window
/// and adds nothing of its own. Every other usable anchor contributes
/// one window per start position on the empty stretch to its left,
/// bounded by a letter run, a dead cell, the edge, or the 7 tile rack
/// cap; starts keep one empty cell of separation from a preceding
/// run, whose own window covers the words welded onto it.
fn extension_windows(mask: &Mask) -> Vec<(usize, usize)> {
    let mut windows = Vec::new();
    let mut i = 0;
    while i < N {
        if mask[i].is_letter() {
            windows.push((i, i));
            while i < N && mask[i].is_letter() {
                i += 1;
            }
        } else {
            i += 1;
        }
    }
    for anchor in anchor_indices(mask) {
        if let MaskCell::Dead = mask[anchor] {
            continue;
        }
        if anchor > 0 && mask[anchor - 1].is_letter() {
            // between two runs: the preceding run's window reaches
            // through this cell already
            continue;
        }
        let mut lowest = anchor.saturating_sub(RACK_SIZE - 1);
        let mut j = anchor;
        while j > lowest {
            match mask[j - 1] {
                MaskCell::Letter(_) => {
                    // keep one empty cell between the window and the
                    // preceding word
                    lowest = j + 1;
                    break;
                }
                MaskCell::Dead => {
                    lowest = j;
                    break;
                }
                _ => j -= 1,
            }
        }
        for start in lowest..=anchor {
            windows.push((anchor, start));
        }
    }
    windows
}

/// Greedy blank assignment: positions covered by board letters cost
/// nothing; every other position consumes the matching rack letter
/// when available, a blank otherwise.
fn assign_blanks(text: &str, window: &[MaskCell], rack: &Rack) -> BTreeSet<BlankTile> {
    let mut counts = *rack.counts();
    let mut blanks = BTreeSet::new();
    for (i, b) in text.bytes().enumerate() {
        if window[i].is_letter() {
            continue;
        }
        let slot = (b - b'A') as usize;
        if counts[slot] > 0 {
            counts[slot] -= 1;
        } else {
            blanks.insert(BlankTile {
                index: i,
                letter: Letter::from_index(b - b'A'),
            });
        }
    }
    blanks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::Tile;
    use crate::tileset::Language;
    use std::convert::TryFrom;

    type Result<T> = std::result::Result<T, Error>;

    fn place(board: &mut Board, text: &str, direction: Direction, row: usize, col: usize) {
        let word = Word::new(text, direction, Position::new(row, col)).unwrap();
        board.place(&word, &BTreeSet::new()).unwrap();
    }

    #[test]
    fn test_first_move_best() -> Result<()> {
        let lexicon = Lexicon::from_words(&["DESK", "TOP", "POT", "DOE"])?;
        let generator = Generator::new(&lexicon);
        let board = Board::new(Language::Fr);
        let rack: Rack = "DESKTOP".parse()?;
        let solutions = generator.solutions_for(&board, &rack)?;
        assert!(!solutions.is_empty());
        // ascending by value, ties broken by text
        for pair in solutions.windows(2) {
            assert!(
                (pair[0].value(), pair[0].word().text())
                    <= (pair[1].value(), pair[1].word().text())
            );
        }
        let best = generator.best_solution(&board, &rack)?.unwrap();
        assert_eq!(best.word().text(), "DESK");
        assert_eq!(best.word().origin(), Position::new(7, 7));
        assert_eq!(best.word().direction(), Direction::Across);
        assert_eq!(best.value(), 28);
        assert!(!best.is_bingo());
        assert!(best.cross_words().is_empty());
        Ok(())
    }

    #[test]
    fn test_first_move_with_blank() -> Result<()> {
        let lexicon = Lexicon::from_words(&["DESK"])?;
        let generator = Generator::new(&lexicon);
        let board = Board::new(Language::Fr);
        // no K on the rack: the blank stands in for it and scores 0
        let rack: Rack = "DESTOP*".parse()?;
        let best = generator.best_solution(&board, &rack)?.unwrap();
        assert_eq!(best.word().text(), "DESK");
        let blanks: Vec<BlankTile> = best.blanks().iter().copied().collect();
        assert_eq!(blanks.len(), 1);
        assert_eq!(blanks[0].index, 3);
        assert_eq!(blanks[0].letter.as_char(), 'K');
        // (2 + 1 + 1 + 0) * 2
        assert_eq!(best.value(), 8);
        Ok(())
    }

    #[test]
    fn test_no_move_on_first_play() -> Result<()> {
        let lexicon = Lexicon::from_words(&["DESK"])?;
        let generator = Generator::new(&lexicon);
        let board = Board::new(Language::Fr);
        let rack: Rack = "ZZZZ".parse()?;
        assert!(generator.best_solution(&board, &rack)?.is_none());
        Ok(())
    }

    #[test]
    fn test_cross_words_and_retraction() -> Result<()> {
        let lexicon = Lexicon::from_words(&["LE", "LES", "SOS"])?;
        let generator = Generator::new(&lexicon);
        let mut board = Board::new(Language::Fr);
        place(&mut board, "LE", Direction::Across, 7, 7);
        place(&mut board, "OS", Direction::Down, 8, 9);
        let rack: Rack = "S".parse()?;

        let solutions = generator.solutions_for(&board, &rack)?;
        let names: Vec<&str> = solutions.iter().map(|s| s.word().text()).collect();
        assert_eq!(names, vec!["LES", "SOS"]);
        for solution in &solutions {
            assert_eq!(solution.value(), 6);
            assert_eq!(solution.cross_words().len(), 1);
            assert_eq!(solution.new_tiles(), 1);
        }
        // LES across forms SOS down, and vice versa
        assert_eq!(solutions[0].cross_words()[0].word.text(), "SOS");
        assert_eq!(solutions[1].cross_words()[0].word.text(), "LES");

        // committing the best solution replaces the engulfed words
        let best = generator.best_solution(&board, &rack)?.unwrap();
        assert_eq!(best.word().text(), "SOS");
        let used = board.apply_solution(&best)?;
        assert_eq!(used, vec![Tile::Letter(Letter::try_from('S').unwrap())]);
        let texts: Vec<&str> = board.words().map(Word::text).collect();
        assert_eq!(texts, vec!["LES", "SOS"]);
        Ok(())
    }

    #[test]
    fn test_determinism() -> Result<()> {
        let lexicon = Lexicon::from_words(&["LE", "LES", "SOS", "SEL", "ET", "TE"])?;
        let generator = Generator::new(&lexicon);
        let mut board = Board::new(Language::Fr);
        place(&mut board, "LE", Direction::Across, 7, 7);
        place(&mut board, "OS", Direction::Down, 8, 9);
        let rack: Rack = "SELT*".parse()?;
        let first = generator.solutions_for(&board, &rack)?;
        let second = generator.solutions_for(&board, &rack)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_word_already_on_board_is_rejected() -> Result<()> {
        let lexicon = Lexicon::from_words(&["TE", "ET"])?;
        let generator = Generator::new(&lexicon);
        let mut board = Board::new(Language::Fr);
        place(&mut board, "TE", Direction::Across, 7, 7);
        // the rack could only replay TE in place
        let rack: Rack = "TE".parse()?;
        let solutions = generator.solutions_for(&board, &rack)?;
        assert!(solutions
            .iter()
            .all(|s| s.word() != &Word::new("TE", Direction::Across, Position::new(7, 7)).unwrap()));
        Ok(())
    }

    #[test]
    fn test_extension_through_left_letters() -> Result<()> {
        // placing S after TIC must absorb the run and read TICS
        let lexicon = Lexicon::from_words(&["TIC", "TICS"])?;
        let generator = Generator::new(&lexicon);
        let mut board = Board::new(Language::Fr);
        place(&mut board, "TIC", Direction::Across, 7, 7);
        let rack: Rack = "S".parse()?;
        let best = generator.best_solution(&board, &rack)?.unwrap();
        assert_eq!(best.word().text(), "TICS");
        assert_eq!(best.word().origin(), Position::new(7, 7));
        assert_eq!(best.new_tiles(), 1);
        Ok(())
    }

    #[test]
    fn test_best_solution_commits_cleanly() -> Result<()> {
        // §8: the best solution always places without conflict and
        // all its perpendicular words are valid
        let lexicon = Lexicon::from_words(&["LE", "LES", "SOS", "TICS", "TE"])?;
        let generator = Generator::new(&lexicon);
        let mut board = Board::new(Language::Fr);
        place(&mut board, "LE", Direction::Across, 7, 7);
        place(&mut board, "OS", Direction::Down, 8, 9);
        let rack: Rack = "STE".parse()?;
        let best = generator.best_solution(&board, &rack)?.unwrap();
        for cross in best.cross_words() {
            assert!(generator.lexicon().contains(cross.word.text())?);
        }
        board.apply_solution(&best)?;
        Ok(())
    }

    #[test]
    fn test_solution_for_word_validates() -> Result<()> {
        let lexicon = Lexicon::from_words(&["LE", "LES", "SOS"])?;
        let generator = Generator::new(&lexicon);
        let mut board = Board::new(Language::Fr);

        // unknown words are refused
        let bad = Word::new("ZZZ", Direction::Across, Position::new(7, 7)).unwrap();
        assert!(matches!(
            generator.solution_for_word(&board, bad, BTreeSet::new()),
            Err(Error::WordNotInLexicon(_))
        ));

        // the first move must cover the center
        let off_center = Word::new("LE", Direction::Across, Position::new(0, 0)).unwrap();
        assert!(matches!(
            generator.solution_for_word(&board, off_center, BTreeSet::new()),
            Err(Error::FirstMoveMustCoverCenter)
        ));

        let le = Word::new("LE", Direction::Across, Position::new(7, 7)).unwrap();
        let solution = generator.solution_for_word(&board, le, BTreeSet::new())?;
        board.apply_solution(&solution)?;

        // a word fighting a placed letter is a conflict
        let clash = Word::new("SOS", Direction::Down, Position::new(7, 7)).unwrap();
        assert!(matches!(
            generator.solution_for_word(&board, clash, BTreeSet::new()),
            Err(Error::CellConflict { .. })
        ));

        // a word forming an invalid perpendicular word is refused
        place(&mut board, "OS", Direction::Down, 8, 9);
        let bad_cross = Word::new("SOS", Direction::Down, Position::new(8, 8)).unwrap();
        assert!(matches!(
            generator.solution_for_word(&board, bad_cross, BTreeSet::new()),
            Err(Error::CrossWordNotInLexicon(_))
        ));

        // while the good hook is accepted with its cross word
        let sos = Word::new("SOS", Direction::Down, Position::new(7, 9)).unwrap();
        let solution = generator.solution_for_word(&board, sos, BTreeSet::new())?;
        assert_eq!(solution.cross_words().len(), 1);
        assert_eq!(solution.cross_words()[0].word.text(), "LES");
        Ok(())
    }

    #[test]
    fn test_anchor_windows() -> Result<()> {
        let lexicon = Lexicon::from_words(&["LE"])?;
        let mut board = Board::new(Language::Fr);
        place(&mut board, "LE", Direction::Across, 7, 4);
        let mask = Mask::for_line(&board, &lexicon, Line::new(Direction::Across, 7))?;
        assert_eq!(anchor_indices(&mask), vec![3]);
        let windows = extension_windows(&mask);
        // one window on the run itself, then anchor 3 with starts
        // 0..=3, bounded by the edge on the left
        assert_eq!(
            windows,
            vec![(4, 4), (3, 0), (3, 1), (3, 2), (3, 3)]
        );
        Ok(())
    }

    #[test]
    fn test_line_starting_with_letter_gets_window() -> Result<()> {
        let lexicon = Lexicon::from_words(&["LE"])?;
        let mut board = Board::new(Language::Fr);
        place(&mut board, "LE", Direction::Across, 7, 0);
        let mask = Mask::for_line(&board, &lexicon, Line::new(Direction::Across, 7))?;
        let windows = extension_windows(&mask);
        assert!(windows.contains(&(0, 0)));
        Ok(())
    }

    #[test]
    fn test_rack_cap_bounds_window() -> Result<()> {
        let lexicon = Lexicon::from_words(&["LE"])?;
        let mut board = Board::new(Language::Fr);
        place(&mut board, "LE", Direction::Across, 7, 13);
        let mask = Mask::for_line(&board, &lexicon, Line::new(Direction::Across, 7))?;
        let windows = extension_windows(&mask);
        assert!(windows.contains(&(13, 13)));
        // anchor 12: a window cannot start more than 6 cells left of it
        let starts: Vec<usize> = windows
            .iter()
            .filter(|w| w.0 == 12)
            .map(|w| w.1)
            .collect();
        assert_eq!(starts, (6..=12).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_single_tile_bridges_two_runs() -> Result<()> {
        // LE and ON with a one-cell gap: dropping a C at (7, 6) must
        // be found, with the run letters forced around it
        let lexicon = Lexicon::from_words(&["LE", "ON", "LECON"])?;
        let generator = Generator::new(&lexicon);
        let mut board = Board::new(Language::Fr);
        place(&mut board, "LE", Direction::Across, 7, 4);
        place(&mut board, "ON", Direction::Across, 7, 7);
        let mask = Mask::for_line(&board, &lexicon, Line::new(Direction::Across, 7))?;
        // the window on the first run reaches through the gap
        assert!(extension_windows(&mask).contains(&(4, 4)));

        let rack: Rack = "C".parse()?;
        let solutions = generator.solutions_for(&board, &rack)?;
        assert_eq!(solutions.len(), 1);
        let solution = &solutions[0];
        assert_eq!(solution.word().text(), "LECON");
        assert_eq!(solution.word().origin(), Position::new(7, 4));
        assert_eq!(solution.new_tiles(), 1);
        assert_eq!(solution.value(), 7);
        Ok(())
    }
}
