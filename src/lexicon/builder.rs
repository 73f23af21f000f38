/// Naive trie supporting dynamic insertion, used only while building
/// a [`Lexicon`](crate::Lexicon). Children are kept sorted by label.
#[derive(Debug, Default)]
pub(crate) struct TrieBuilder {
    children: Vec<(u8, Box<TrieBuilder>)>,
    terminal: bool,
}

impl TrieBuilder {
    pub fn new() -> TrieBuilder {
        TrieBuilder {
            children: Vec::new(),
            terminal: false,
        }
    }

    /// Insert a key; false if it was already present.
    pub fn insert(&mut self, key: &[u8]) -> bool {
        let mut t = self;
        for &c in key {
            let pos = match t.children.binary_search_by(|(c2, _)| c2.cmp(&c)) {
                Ok(pos) => pos,
                Err(pos) => {
                    t.children.insert(pos, (c, Box::new(TrieBuilder::new())));
                    pos
                }
            };
            t = &mut { t }.children[pos].1;
        }
        let fresh = !t.terminal;
        t.terminal = true;
        fresh
    }

    pub fn children(&self) -> &[(u8, Box<TrieBuilder>)] {
        &self.children
    }

    pub fn terminal(&self) -> bool {
        self.terminal
    }
}
