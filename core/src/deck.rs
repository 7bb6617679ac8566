use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of distinct tile values placed on a board, each appearing twice.
///
/// Overflow cells (an odd board, or a board larger than the tile supply
/// allows) stay permanently empty.
pub fn pair_count(board: Coord2, max_unique_tiles: TileCount) -> TileCount {
    let capacity = mult(board.0, board.1) / 2;
    capacity.min(max_unique_tiles)
}

/// An ordered sequence of tile indices ready to be dealt onto a board.
///
/// Length is `2 * pair_count` and every index in `0..pair_count` appears
/// exactly twice. A deck is consumed by a single board build.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    tiles: Vec<TileIndex>,
}

impl Deck {
    pub fn from_tiles(tiles: Vec<TileIndex>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TileIndex> + '_ {
        self.tiles.iter().copied()
    }

    pub fn into_tiles(self) -> Vec<TileIndex> {
        self.tiles
    }
}

pub trait DeckGenerator {
    fn generate(self, board: Coord2, max_unique_tiles: TileCount) -> Deck;
}

/// Builds the paired deck and shuffles it by repeatedly drawing a uniformly
/// random remaining entry. Every ordering of the deck is equally likely.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShuffledDeckGenerator {
    seed: u64,
}

impl ShuffledDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for ShuffledDeckGenerator {
    fn generate(self, board: Coord2, max_unique_tiles: TileCount) -> Deck {
        use rand::prelude::*;

        let pairs = pair_count(board, max_unique_tiles);
        let capacity = mult(board.0, board.1);
        if capacity > pairs * 2 {
            log::debug!(
                "board holds {} cells but only {} tiles, the rest stay empty",
                capacity,
                pairs * 2
            );
        }

        let mut remaining: Vec<TileIndex> = Vec::with_capacity(usize::from(pairs) * 2);
        for tile in 0..pairs {
            remaining.push(tile);
            remaining.push(tile);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut tiles = Vec::with_capacity(remaining.len());
        while !remaining.is_empty() {
            let pick = rng.random_range(0..remaining.len());
            tiles.push(remaining.remove(pick));
        }

        Deck { tiles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    #[test]
    fn pair_count_is_bounded_by_board_and_tile_supply() {
        assert_eq!(pair_count((3, 3), 40), 4);
        assert_eq!(pair_count((10, 10), 40), 40);
        assert_eq!(pair_count((2, 2), 1), 1);
        assert_eq!(pair_count((1, 1), 40), 0);
    }

    #[test]
    fn deck_holds_every_tile_exactly_twice() {
        let deck = ShuffledDeckGenerator::new(17).generate((3, 3), 40);

        assert_eq!(deck.len(), 8);
        for tile in 0..4 {
            assert_eq!(deck.iter().filter(|&t| t == tile).count(), 2);
        }
    }

    #[test]
    fn shuffle_reaches_every_distinct_ordering() {
        // A two-pair deck has 4!/(2!*2!) = 6 distinguishable orderings; a
        // uniform shuffle must produce all of them across enough seeds.
        let mut seen = BTreeSet::new();
        for seed in 0..512 {
            let deck = ShuffledDeckGenerator::new(seed).generate((2, 2), 40);
            seen.insert(deck.into_tiles());
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn shuffle_shows_no_position_bias() {
        // With two pairs of two tiles, tile 0 should open the deck about
        // half the time.
        let runs = 4000;
        let hits: usize = (0..runs)
            .map(|seed| {
                let deck = ShuffledDeckGenerator::new(seed).generate((2, 2), 40);
                usize::from(deck.iter().next() == Some(0))
            })
            .sum();

        let ratio = hits as f64 / runs as f64;
        assert!((0.45..=0.55).contains(&ratio), "ratio was {}", ratio);
    }

    #[test]
    fn oversized_board_is_capped_by_tile_supply() {
        let deck = ShuffledDeckGenerator::new(3).generate((10, 10), 40);

        assert_eq!(deck.len(), 80);
        let distinct: BTreeSet<_> = deck.iter().collect();
        assert_eq!(distinct.len(), 40);
    }
}
