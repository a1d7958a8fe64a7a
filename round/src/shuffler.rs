use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{rngs::StdRng, seq::SliceRandom, thread_rng, SeedableRng};

use crate::card::Card;

/// Reorders a sequence of cards.
///
/// Implementations must return a permutation of their input: every card that goes
/// in comes out exactly once. Any `Fn(Vec<Card>) -> Vec<Card>` is a shuffler, which
/// makes fixed orderings easy to inject in tests.
pub trait Shuffler {
    fn shuffle(&self, cards: Vec<Card>) -> Vec<Card>;
}

impl<F> Shuffler for F
where
    F: Fn(Vec<Card>) -> Vec<Card>,
{
    fn shuffle(&self, cards: Vec<Card>) -> Vec<Card> {
        self(cards)
    }
}

/// Uniform random permutation from the thread local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardShuffler;

impl Shuffler for StandardShuffler {
    fn shuffle(&self, mut cards: Vec<Card>) -> Vec<Card> {
        let mut rng = thread_rng();
        cards.shuffle(&mut rng);
        cards
    }
}

/// Uniform random permutation driven by a fixed seed.
///
/// The RNG is seeded from the seed mixed with the incoming order, so the same input
/// always comes back in the same order while a different input gets a different
/// permutation. Reshuffling a deck therefore moves its cards again.
#[derive(Clone, Copy, Debug)]
pub struct SeededShuffler {
    seed: u64,
}

impl SeededShuffler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn seed_for(&self, cards: &[Card]) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        cards.hash(&mut hasher);
        hasher.finish()
    }
}

impl Shuffler for SeededShuffler {
    fn shuffle(&self, mut cards: Vec<Card>) -> Vec<Card> {
        let mut rng = StdRng::seed_from_u64(self.seed_for(&cards));
        cards.shuffle(&mut rng);
        cards
    }
}
