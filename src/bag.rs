use crate::tiles::Tile;
use crate::tileset::{Language, TileSet};
use multiset::HashMultiSet;
use rand::seq::IteratorRandom;
use rand::Rng;
use std::ops::Deref;

/// The tiles not yet on a rack or on the board.
#[derive(Debug, Clone)]
pub struct Bag(HashMultiSet<Tile>);

impl Deref for Bag {
    type Target = HashMultiSet<Tile>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Bag {
    pub fn empty() -> Bag {
        Bag(HashMultiSet::new())
    }

    /// A full bag for the language: 100 tiles EN, 102 FR.
    pub fn full(language: Language) -> Bag {
        let tileset = TileSet::new(language);
        let mut bag = HashMultiSet::new();
        for (tile, count) in tileset.tiles() {
            if count > 0 {
                bag.insert_times(tile, count as usize);
            }
        }
        Bag(bag)
    }

    /// Remove and return a randomly chosen tile, or None when empty.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<Tile> {
        let tile = self.0.iter().choose(rng).copied()?;
        self.0.remove(&tile);
        Some(tile)
    }

    /// Put a tile back in the bag.
    pub fn put_back(&mut self, tile: Tile) {
        self.0.insert(tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_full_bag() {
        assert_eq!(Bag::full(Language::Fr).len(), 102);
        assert_eq!(Bag::full(Language::En).len(), 100);
        let bag = Bag::full(Language::En);
        assert_eq!(bag.count_of(&Tile::Blank), 2);
    }

    #[test]
    fn test_draw_put_back() {
        let mut rng = StdRng::seed_from_u64(123);
        let mut bag = Bag::full(Language::Fr);
        let tile = bag.draw(&mut rng).unwrap();
        assert_eq!(bag.len(), 101);
        bag.put_back(tile);
        assert_eq!(bag.len(), 102);
    }

    #[test]
    fn test_draw_empty() {
        let mut rng = StdRng::seed_from_u64(123);
        let mut bag = Bag::empty();
        assert_eq!(bag.draw(&mut rng), None);
    }
}
