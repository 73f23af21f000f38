use super::Lexicon;
use crate::line::N;
use crate::mask::MaskCell;
use crate::tiles::{Rack, ALPHABET, BLANK_SLOT};
use std::collections::BTreeSet;
use std::mem;
use tinyvec::ArrayVec;

type WordBuf = ArrayVec<[u8; N]>;

/// One partial match of the wavefront: a trie node, the rack tiles
/// still unused on this path, and the letters matched so far.
#[derive(Debug, Clone, Copy)]
struct Step {
    node: u32,
    counts: [u8; ALPHABET + 1],
    word: WordBuf,
}

impl Step {
    fn advanced(&self, child: usize, label: u8, consumed: Option<usize>) -> Step {
        let mut step = *self;
        step.node = child as u32;
        step.word.push(label);
        if let Some(slot) = consumed {
            step.counts[slot] -= 1;
        }
        step
    }
}

impl Lexicon {
    /// Return every word that matches `mask` cell-wise, is at least
    /// `min_length` long, and whose letters on non-occupied cells can
    /// be drawn from `rack` (a blank standing for any one letter).
    ///
    /// This is the hot path of move generation. The wavefront at depth
    /// d holds every partial match of length d with its remaining
    /// rack; one pass per mask cell advances it. A blank is only spent
    /// on a letter the rack does not hold, so the search stays
    /// deterministic and blanks are kept for later needs.
    pub fn masked_rack_search(
        &self,
        mask: &[MaskCell],
        rack: &Rack,
        min_length: usize,
    ) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        if min_length == 0 || mask.is_empty() {
            return found;
        }
        let mut wave = Vec::with_capacity(16);
        wave.push(Step {
            node: 0,
            counts: *rack.counts(),
            word: WordBuf::new(),
        });
        let mut next: Vec<Step> = Vec::with_capacity(16);
        for (depth, cell) in mask.iter().enumerate() {
            if let MaskCell::Dead = cell {
                break;
            }
            next.clear();
            for step in &wave {
                match cell {
                    MaskCell::Letter(letter) => {
                        let label = letter.index() as u8;
                        if let Some(child) = self.get(step.node as usize, label) {
                            next.push(step.advanced(child, label, None));
                        }
                    }
                    MaskCell::Open => self.branch(step, None, &mut next),
                    MaskCell::Cross(completions) => self.branch(step, Some(completions), &mut next),
                    MaskCell::Dead => unreachable!(),
                }
            }
            if depth + 1 >= min_length {
                for step in &next {
                    if self.is_terminal(step.node as usize) {
                        found.insert(decode(&step.word));
                    }
                }
            }
            mem::swap(&mut wave, &mut next);
            if wave.is_empty() {
                break;
            }
        }
        found
    }

    /// Advance one step over an empty cell: each child edge drawable
    /// from the remaining rack continues the match. The actual letter
    /// is preferred; the blank covers only letters the rack lacks.
    fn branch(&self, step: &Step, allowed: Option<&super::Completions>, next: &mut Vec<Step>) {
        for (label, child) in self.children(step.node as usize) {
            if let Some(completions) = allowed {
                let letter = crate::tiles::Letter::from_index(label);
                if !completions.contains_key(&letter) {
                    continue;
                }
            }
            if step.counts[label as usize] > 0 {
                next.push(step.advanced(child, label, Some(label as usize)));
            } else if step.counts[BLANK_SLOT] > 0 {
                next.push(step.advanced(child, label, Some(BLANK_SLOT)));
            }
        }
    }
}

fn decode(word: &WordBuf) -> String {
    word.iter().map(|&b| (b'A' + b) as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{Completion, Completions};
    use crate::tiles::Letter;
    use std::convert::TryFrom;

    fn letter(c: char) -> Letter {
        Letter::try_from(c).unwrap()
    }

    fn cross(entries: &[(char, usize, &str)]) -> MaskCell {
        let mut completions = Completions::new();
        for &(c, index, text) in entries {
            completions.insert(
                letter(c),
                Completion {
                    index,
                    text: String::from(text),
                },
            );
        }
        MaskCell::Cross(completions)
    }

    fn search(words: &[&str], mask: &[MaskCell], rack: &str, min_length: usize) -> Vec<String> {
        let lexicon = Lexicon::from_words(words).unwrap();
        let rack: Rack = rack.parse().unwrap();
        lexicon
            .masked_rack_search(mask, &rack, min_length)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_open_mask() {
        let mask = vec![MaskCell::Open; 7];
        let words = &["LE", "LA", "LES", "SEL"];
        let found = search(words, &mask, "LESA", 2);
        assert_eq!(found, vec!["LA", "LE", "LES", "SEL"]);
    }

    #[test]
    fn test_min_length() {
        let mask = vec![MaskCell::Open; 7];
        let words = &["LE", "LA", "LES", "SEL"];
        let found = search(words, &mask, "LESA", 3);
        assert_eq!(found, vec!["LES", "SEL"]);
    }

    #[test]
    fn test_rack_limits() {
        let mask = vec![MaskCell::Open; 7];
        let words = &["LE", "LA", "LES"];
        // one L, no S: LES needs both
        let found = search(words, &mask, "LEA", 2);
        assert_eq!(found, vec!["LA", "LE"]);
    }

    #[test]
    fn test_blank_expands() {
        let mask = vec![MaskCell::Open; 7];
        let words = &["BA", "BE", "BI"];
        let found = search(words, &mask, "B*", 2);
        assert_eq!(found, vec!["BA", "BE", "BI"]);
    }

    #[test]
    fn test_board_letter_consumes_no_tile() {
        let mask = vec![
            MaskCell::Letter(letter('L')),
            MaskCell::Open,
            MaskCell::Open,
        ];
        let words = &["LES", "LE"];
        let found = search(words, &mask, "ES", 3);
        assert_eq!(found, vec!["LES"]);
    }

    #[test]
    fn test_dead_truncates() {
        let mask = vec![MaskCell::Open, MaskCell::Dead, MaskCell::Open];
        let words = &["LE", "LA"];
        let found = search(words, &mask, "LEA", 1);
        assert!(found.is_empty());
    }

    #[test]
    fn test_masked_search_with_cross_checks() {
        // A five-cell minimum over [open, open, open, constrained, S]:
        // index 3 takes only A or E, index 4 is the board letter S.
        let mask = vec![
            MaskCell::Open,
            MaskCell::Open,
            MaskCell::Open,
            cross(&[('A', 1, "LA"), ('E', 0, "ET")]),
            MaskCell::Letter(letter('S')),
            MaskCell::Open,
            MaskCell::Open,
        ];
        let words = &["LIMASSE", "MINASSE", "SALINE", "ANIMES"];
        let found = search(words, &mask, "AEINMLS", 5);
        assert_eq!(found, vec!["LIMASSE", "MINASSE"]);
    }

    #[test]
    fn test_deterministic() {
        let mask = vec![MaskCell::Open; 7];
        let words = &["LE", "LA", "LES", "SEL", "ET", "TE"];
        let lexicon = Lexicon::from_words(words).unwrap();
        let rack: Rack = "LESAT*".parse().unwrap();
        let first = lexicon.masked_rack_search(&mask, &rack, 2);
        let second = lexicon.masked_rack_search(&mask, &rack, 2);
        assert_eq!(first, second);
    }
}
