use crate::board::Board;
use crate::error::Error;
use crate::lexicon::{Completions, Lexicon};
use crate::line::{Direction, Line, Position};
use crate::tiles::Letter;
use std::fmt;
use std::ops::Index;

/// Classification of one line cell for the move search.
#[derive(Debug, Clone, PartialEq)]
pub enum MaskCell {
    /// The cell already holds this letter.
    Letter(Letter),
    /// Empty with no perpendicular neighbor: any letter playable.
    Open,
    /// Empty with perpendicular neighbors; the map holds every letter
    /// that forms a valid cross word, with the word it makes.
    Cross(Completions),
    /// Empty with perpendicular neighbors but no valid cross word.
    /// The cell cannot be used at all.
    Dead,
}

impl MaskCell {
    pub fn is_letter(&self) -> bool {
        matches!(self, MaskCell::Letter(_))
    }

    pub fn letter(&self) -> Option<Letter> {
        match self {
            MaskCell::Letter(letter) => Some(*letter),
            _ => None,
        }
    }

    /// Empty and playable: `Open` or `Cross`.
    pub fn is_usable(&self) -> bool {
        matches!(self, MaskCell::Open | MaskCell::Cross(_))
    }

    /// Empty, whether playable or not.
    pub fn is_vacant(&self) -> bool {
        !self.is_letter()
    }
}

impl fmt::Display for MaskCell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MaskCell::Letter(letter) => write!(f, "{}", letter),
            MaskCell::Open => write!(f, "."),
            MaskCell::Cross(completions) => {
                let letters: String = completions.keys().map(|l| l.as_char()).collect();
                write!(f, "[{}]", letters)
            }
            MaskCell::Dead => write!(f, "#"),
        }
    }
}

/// The per-line mask: one [`MaskCell`] for each of the 15 cells.
///
/// Built per query from the board and the lexicon, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    line: Line,
    cells: Vec<MaskCell>,
}

impl Index<usize> for Mask {
    type Output = MaskCell;
    fn index(&self, index: usize) -> &MaskCell {
        &self.cells[index]
    }
}

impl Mask {
    /// Classify every cell of `line` against the current board.
    ///
    /// Occupied cells become `Letter`. For each empty cell with filled
    /// perpendicular neighbors, the contiguous span through the cell
    /// is read off the board as a pattern with a single gap and handed
    /// to [`Lexicon::complete_one_blank`]; the cell becomes `Cross`
    /// when letters complete it and `Dead` when none does. Remaining
    /// cells stay `Open`.
    pub fn for_line(board: &Board, lexicon: &Lexicon, line: Line) -> Result<Mask, Error> {
        let mut cells: Vec<MaskCell> = line
            .positions()
            .map(|pos| match board.letter_at(pos) {
                Some(letter) => MaskCell::Letter(letter),
                None => MaskCell::Open,
            })
            .collect();

        let ortho = line.direction.ortho();
        let (dr, dc) = ortho.step();
        let neighbors = board.neighbors_of_line(line);
        for &adjacent in neighbors.lower.iter().chain(neighbors.higher.iter()) {
            let crossing = match line.direction {
                Direction::Across => Position::new(line.index, adjacent.col),
                Direction::Down => Position::new(adjacent.row, line.index),
            };
            let span = span_through(board, adjacent, crossing, dr, dc);
            let pattern: String = span
                .iter()
                .map(|&pos| board.letter_at(pos).map_or(' ', Letter::as_char))
                .collect();
            if !pattern.contains(' ') {
                // a word already lying on the line itself
                continue;
            }
            let completions = lexicon.complete_one_blank(&pattern)?;
            cells[line.offset_of(crossing)] = if completions.is_empty() {
                MaskCell::Dead
            } else {
                MaskCell::Cross(completions)
            };
        }
        Ok(Mask { line, cells })
    }

    pub fn line(&self) -> Line {
        self.line
    }

    pub fn cells(&self) -> &[MaskCell] {
        &self.cells
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}

/// The contiguous filled span around `adjacent`, walking both ways
/// perpendicular to the line and passing through the (possibly empty)
/// crossing cell.
fn span_through(
    board: &Board,
    adjacent: Position,
    crossing: Position,
    dr: usize,
    dc: usize,
) -> Vec<Position> {
    let filled_or_crossing =
        |pos: Position| -> bool { !board.is_empty(pos) || pos == crossing };
    let mut start = adjacent;
    while let Some(prev) = start.offset(-(dr as isize), -(dc as isize)) {
        if !filled_or_crossing(prev) {
            break;
        }
        start = prev;
    }
    let mut end = adjacent;
    while let Some(next) = end.offset(dr as isize, dc as isize) {
        if !filled_or_crossing(next) {
            break;
        }
        end = next;
    }
    match (dr, dc) {
        (0, _) => (start.col..=end.col)
            .map(|col| Position::new(start.row, col))
            .collect(),
        _ => (start.row..=end.row)
            .map(|row| Position::new(row, start.col))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::tileset::Language;
    use crate::word::Word;
    use std::collections::BTreeSet;
    use std::convert::TryFrom;

    fn place(board: &mut Board, text: &str, direction: Direction, row: usize, col: usize) {
        let word = Word::new(text, direction, Position::new(row, col)).unwrap();
        board.place(&word, &BTreeSet::new()).unwrap();
    }

    /// The §8-style fixture: a column crossing several horizontal words.
    fn fixture() -> (Board, Lexicon) {
        let lexicon = Lexicon::from_words(&["CES", "LES", "TES", "ASSIS", "ENT"]).unwrap();
        let mut board = Board::new(Language::Fr);
        place(&mut board, "XXXX", Direction::Across, 1, 4);
        place(&mut board, "ES", Direction::Across, 2, 4);
        place(&mut board, "AS", Direction::Across, 5, 1);
        place(&mut board, "IS", Direction::Across, 5, 4);
        place(&mut board, "ENT", Direction::Down, 8, 3);
        (board, lexicon)
    }

    #[test]
    fn test_mask_for_column() {
        let (board, lexicon) = fixture();
        let mask = Mask::for_line(&board, &lexicon, Line::new(Direction::Down, 3)).unwrap();

        // row 1 is next to XXXX and nothing completes " XXXX"
        assert_eq!(mask[1], MaskCell::Dead);

        // row 2 must take C, L or T to build a word on " ES"
        match &mask[2] {
            MaskCell::Cross(completions) => {
                let letters: String = completions.keys().map(|l| l.as_char()).collect();
                assert_eq!(letters, "CLT");
                let c = &completions[&Letter::try_from('C').unwrap()];
                assert_eq!((c.index, c.text.as_str()), (0, "CES"));
                let l = &completions[&Letter::try_from('L').unwrap()];
                assert_eq!((l.index, l.text.as_str()), (0, "LES"));
            }
            cell => panic!("expected cross checks at row 2, got {:?}", cell),
        }

        // row 5 bridges AS and IS: only S makes ASSIS
        match &mask[5] {
            MaskCell::Cross(completions) => {
                assert_eq!(completions.len(), 1);
                let s = &completions[&Letter::try_from('S').unwrap()];
                assert_eq!((s.index, s.text.as_str()), (2, "ASSIS"));
            }
            cell => panic!("expected cross checks at row 5, got {:?}", cell),
        }

        // rows 8..=10 hold ENT
        assert_eq!(mask[8], MaskCell::Letter(Letter::try_from('E').unwrap()));
        assert_eq!(mask[9], MaskCell::Letter(Letter::try_from('N').unwrap()));
        assert_eq!(mask[10], MaskCell::Letter(Letter::try_from('T').unwrap()));

        // everything else is open
        for i in [0, 3, 4, 6, 7, 11, 12, 13, 14].iter() {
            assert_eq!(mask[*i], MaskCell::Open, "cell {} should be open", i);
        }
    }

    #[test]
    fn test_mask_empty_line() {
        let (board, lexicon) = fixture();
        let mask = Mask::for_line(&board, &lexicon, Line::new(Direction::Down, 14)).unwrap();
        assert!(mask.cells().iter().all(|cell| *cell == MaskCell::Open));
    }

    #[test]
    fn test_mask_occupied_crossing_is_skipped() {
        // the line cell over an existing perpendicular word stays Letter
        let (board, lexicon) = fixture();
        let mask = Mask::for_line(&board, &lexicon, Line::new(Direction::Across, 5)).unwrap();
        assert_eq!(mask[2], MaskCell::Letter(Letter::try_from('S').unwrap()));
        assert_eq!(mask[1], MaskCell::Letter(Letter::try_from('A').unwrap()));
    }
}
