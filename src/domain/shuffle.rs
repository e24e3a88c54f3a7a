//! Injectable shuffle seam.
//!
//! Shuffling happens at session start, turn start, and round advance. The
//! production path uses the OS rng; tests substitute a seeded or identity
//! shuffler for reproducible permutations.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::domain::cards::Card;

/// Uniform random permutation source for decks.
pub trait Shuffler: Send {
    fn shuffle(&mut self, cards: &mut [Card]);
}

/// OS-entropy shuffler used by default.
#[derive(Debug, Default)]
pub struct OsShuffler;

impl Shuffler for OsShuffler {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut rand::rng());
    }
}

/// Deterministic shuffler seeded once; every call advances the same stream.
#[derive(Debug)]
pub struct SeededShuffler {
    rng: ChaCha12Rng,
}

impl SeededShuffler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }
}

impl Shuffler for SeededShuffler {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.rng);
    }
}

/// Leaves the deck untouched. Test double for order-sensitive assertions.
#[derive(Debug, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn shuffle(&mut self, _cards: &mut [Card]) {}
}
