use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::OrderHeuristic;
use crate::board::{BoardState, Move};

/// Uniform shuffle
#[derive(Clone, Debug)]
pub struct RandomOrder {
    rng: ChaCha8Rng,
}

impl RandomOrder {
    /// Entropy-seeded shuffler
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Reproducible shuffler
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderHeuristic for RandomOrder {
    fn name(&self) -> &'static str {
        "random"
    }

    fn order(&mut self, _state: &BoardState, mut moves: Vec<Move>) -> Vec<Move> {
        moves.shuffle(&mut self.rng);
        moves
    }
}
