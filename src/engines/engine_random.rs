//! Lowest-tier engine: uniform random choice over the legal moves.
//!
//! Also doubles as the baseline opponent in tests.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;

use crate::engines::engine_trait::Engine;
use crate::game_state::chess_types::ChessMove;
use crate::move_generation::move_generator::GeneratedMove;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, legal: &[GeneratedMove]) -> Option<ChessMove> {
        legal.choose(&mut self.rng).map(|generated| generated.mv)
    }
}
