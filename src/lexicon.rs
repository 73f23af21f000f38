mod builder;
mod search;

use self::builder::TrieBuilder;
use crate::error::Error;
use crate::letterset::LetterSet;
use crate::line::N;
use crate::tiles::Letter;
use std::collections::{BTreeMap, VecDeque};
use std::convert::TryFrom;
use std::fmt;
use std::fs::read_to_string;
use tinyvec::ArrayVec;

/// Letter indices of a word, at most 15 of them.
pub(crate) type Codes = ArrayVec<[u8; N]>;

/// One way to fill the single gap of a completion pattern: the offset
/// of the gap and the completed word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub index: usize,
    pub text: String,
}

/// Every letter that completes a pattern, with the word it makes.
pub type Completions = BTreeMap<Letter, Completion>;

/// The dictionary, a trie over uppercase letters flattened into an
/// arena.
///
/// Built once from a word list, read-only afterwards; it can be shared
/// by any number of concurrent queries.
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// One entry per node: index of the first child, and the labels of
    /// all children.
    nodes: Vec<(u32, LetterSet)>,
    /// Incoming edge label per node.
    labels: Vec<u8>,
    /// Terminal flag per node.
    terminal: Vec<bool>,
    /// Number of words.
    word_count: usize,
    /// Number of nodes.
    node_count: usize,
    /// Path of the word file, empty when built from memory.
    source: String,
}

impl fmt::Display for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "<Lexicon: {} words, {} nodes from '{}'>",
            self.word_count, self.node_count, self.source
        )
    }
}

impl From<TrieBuilder> for Lexicon {
    fn from(trie: TrieBuilder) -> Self {
        let mut nodes: Vec<(u32, LetterSet)> = Vec::new();
        let mut labels: Vec<u8> = Vec::new();
        let mut terminal: Vec<bool> = Vec::new();
        let mut word_count = 0;

        let mut i: usize = 0;
        let mut queue = VecDeque::new();
        queue.push_back((&trie, 0usize, 0u8));
        while let Some((node, parent, label)) = queue.pop_front() {
            let mut ls = LetterSet::new();
            for (l, child) in node.children() {
                ls.insert(Letter::from_index(*l));
                queue.push_back((child.as_ref(), i, *l));
            }
            if node.terminal() {
                word_count += 1;
            }
            nodes.push((0, ls));
            terminal.push(node.terminal());
            labels.push(label);
            if nodes[parent].0 == 0 {
                nodes[parent].0 = i as u32;
            }
            i += 1;
        }
        let node_count = nodes.len();
        Lexicon {
            nodes,
            labels,
            terminal,
            word_count,
            node_count,
            source: String::new(),
        }
    }
}

pub(crate) fn encode(word: &str) -> Result<Codes, Error> {
    let len = word.len();
    if !(2..=N).contains(&len) {
        return Err(Error::InvalidWordLength {
            word: word.into(),
            len: word.chars().count(),
        });
    }
    let mut codes = Codes::new();
    for c in word.chars() {
        codes.push(Letter::try_from(c)?.index() as u8);
    }
    Ok(codes)
}

impl Lexicon {
    /// Build a lexicon from a list of words. Duplicates are logged and
    /// ignored, words of length 1 or more than 15 are discarded.
    /// ## Errors
    /// If a word contains anything but uppercase letters.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Result<Lexicon, Error> {
        let mut builder = TrieBuilder::new();
        for word in words {
            Lexicon::insert_word(&mut builder, word.as_ref())?;
        }
        Ok(Lexicon::from(builder))
    }

    /// Read the lexicon from a file holding either one word per line
    /// or a JSON array of words. The words must be uppercase 'A'..'Z';
    /// duplicates are logged and ignored, words of length 1 or more
    /// than 15 are discarded.
    /// ## Errors
    /// If the file cannot be read, the JSON cannot be parsed, or a
    /// word contains anything but uppercase letters.
    pub fn load(path: &str) -> Result<Lexicon, Error> {
        let contents = read_to_string(path).map_err(|source| Error::ReadError {
            path: String::from(path),
            source,
        })?;
        let mut builder = TrieBuilder::new();
        if contents.trim_start().starts_with('[') {
            let words: Vec<String> =
                serde_json::from_str(&contents).map_err(|e| Error::WordFileFormat {
                    path: String::from(path),
                    detail: e.to_string(),
                })?;
            for word in &words {
                Lexicon::insert_word(&mut builder, word)?;
            }
        } else {
            for line in contents.lines() {
                let word = line.trim();
                if word.is_empty() {
                    continue;
                }
                Lexicon::insert_word(&mut builder, word)?;
            }
        }
        let mut lexicon = Lexicon::from(builder);
        lexicon.source = String::from(path);
        log::info!("{} words loaded from {:?}", lexicon.word_count, path);
        Ok(lexicon)
    }

    fn insert_word(builder: &mut TrieBuilder, word: &str) -> Result<(), Error> {
        let len = word.chars().count();
        if len < 2 || len > N {
            log::debug!("discarding word {:?} of length {}", word, len);
            return Ok(());
        }
        if !builder.insert(&encode(word)?) {
            log::warn!("duplicate word {:?} ignored", word);
        }
        Ok(())
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Return the start and end index of the child nodes of node `i`,
    /// or None if the node has no children.
    fn range_children(&self, i: usize) -> Option<(usize, usize)> {
        let (start, labels) = &self.nodes[i];
        let s = *start as usize;
        match labels.len() {
            0 => None,
            n => Some((s, s + n - 1)),
        }
    }

    /// Iterate over the children of node `i` as (label, node index).
    pub(crate) fn children(&self, i: usize) -> impl Iterator<Item = (u8, usize)> + '_ {
        let (s, e) = self.range_children(i).unwrap_or((1, 0));
        (s..=e).map(move |j| (self.labels[j], j))
    }

    /// Get the index of the child with `label` for node `i` if present.
    pub(crate) fn get(&self, i: usize, label: u8) -> Option<usize> {
        let (start, labels) = &self.nodes[i];
        labels
            .index_of(Letter::from_index(label))
            .map(|index| *start as usize + index)
    }

    pub(crate) fn is_terminal(&self, i: usize) -> bool {
        self.terminal[i]
    }

    fn walk(&self, codes: &[u8]) -> Option<usize> {
        let mut node = 0;
        for &c in codes {
            node = self.get(node, c)?;
        }
        Some(node)
    }

    /// Exact membership of a word.
    /// ## Errors
    /// If the text is not 2..=15 uppercase letters.
    /// ## Examples
    /// ```
    /// # use scrabble_engine::{Lexicon, Error};
    /// let lexicon = Lexicon::from_words(&["LES", "CES"])?;
    /// assert!(lexicon.contains("LES")?);
    /// assert!(!lexicon.contains("SEL")?);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn contains(&self, word: &str) -> Result<bool, Error> {
        let codes = encode(word)?;
        Ok(self
            .walk(&codes)
            .map_or(false, |node| self.is_terminal(node)))
    }

    /// All ways to fill the single space of `pattern` so that the
    /// whole pattern becomes a word.
    ///
    /// The returned map sends each completing letter to the gap offset
    /// and the completed word; it is empty when nothing completes.
    /// ## Errors
    /// If the pattern is not 1..=15 characters, all uppercase letters
    /// except exactly one space.
    /// ## Examples
    /// ```
    /// # use scrabble_engine::{Lexicon, Error};
    /// let lexicon = Lexicon::from_words(&["LES", "CES", "TES"])?;
    /// let completions = lexicon.complete_one_blank(" ES")?;
    /// let letters: String = completions.keys().map(|l| l.as_char()).collect();
    /// assert_eq!(letters, "CLT");
    /// assert_eq!(completions.values().next().unwrap().text, "CES");
    /// # Ok::<(), Error>(())
    /// ```
    pub fn complete_one_blank(&self, pattern: &str) -> Result<Completions, Error> {
        let len = pattern.chars().count();
        if !(1..=N).contains(&len)
            || pattern.chars().filter(|&c| c == ' ').count() != 1
            || !pattern.chars().all(|c| c == ' ' || c.is_ascii_uppercase())
        {
            return Err(Error::InvalidPattern(String::from(pattern)));
        }
        let gap = pattern
            .bytes()
            .position(|b| b == b' ')
            .ok_or_else(|| Error::InvalidPattern(String::from(pattern)))?;
        let prefix: Vec<u8> = pattern.bytes().take(gap).map(|b| b - b'A').collect();
        let suffix: Vec<u8> = pattern.bytes().skip(gap + 1).map(|b| b - b'A').collect();

        let mut completions = Completions::new();
        let gap_node = match self.walk(&prefix) {
            Some(node) => node,
            None => return Ok(completions),
        };
        for (label, child) in self.children(gap_node) {
            if let Some(node) = self.walk_from(child, &suffix) {
                if self.is_terminal(node) {
                    let letter = Letter::from_index(label);
                    let text = pattern.replacen(' ', &letter.to_string(), 1);
                    completions.insert(
                        letter,
                        Completion {
                            index: gap,
                            text,
                        },
                    );
                }
            }
        }
        Ok(completions)
    }

    fn walk_from(&self, start: usize, codes: &[u8]) -> Option<usize> {
        let mut node = start;
        for &c in codes {
            node = self.get(node, c)?;
        }
        Some(node)
    }
}
