//! Engine abstraction for the difficulty-tiered artificial opponent.
//!
//! A tier number is configuration, not behavior: it is mapped once to a
//! tagged policy, and the policy to an engine strategy behind a single trait
//! interface. Every strategy draws from its own seedable generator so tests
//! can force deterministic outcomes.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_capture_bias::CaptureBiasEngine;
use crate::engines::engine_greedy::GreedyEngine;
use crate::engines::engine_random::RandomEngine;
use crate::game_state::chess_types::ChessMove;
use crate::move_generation::move_generator::GeneratedMove;

/// Difficulty level 1..=5; out-of-range input is clamped, mirroring the
/// session-setup surface this crate is embedded behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyTier(u8);

impl DifficultyTier {
    pub fn new(tier: u8) -> Self {
        Self(tier.clamp(1, 5))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Beginner",
            2 => "Easy",
            3 => "Medium",
            4 => "Hard",
            _ => "Expert",
        }
    }

    /// The move-selection policy this tier plays with.
    pub fn policy(self) -> DifficultyPolicy {
        match self.0 {
            1 => DifficultyPolicy::Random,
            2 => DifficultyPolicy::CaptureBiased {
                capture_probability: 0.65,
                check_probability: 0.0,
            },
            3 => DifficultyPolicy::CaptureBiased {
                capture_probability: 0.70,
                check_probability: 0.45,
            },
            _ => DifficultyPolicy::StaticEval { jitter: 2.0 },
        }
    }
}

impl Default for DifficultyTier {
    fn default() -> Self {
        Self(3)
    }
}

/// Tagged move-selection policy, parameterized by its weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DifficultyPolicy {
    /// Uniform choice over the legal set.
    Random,
    /// Uniform choice, but with elevated probabilities of picking among
    /// capturing moves and (secondarily) checking moves when any exist.
    CaptureBiased {
        capture_probability: f64,
        check_probability: f64,
    },
    /// Single-ply static scoring with a small random tie-break jitter.
    StaticEval { jitter: f64 },
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    /// Pick exactly one move from `legal`, or `None` when the set is empty
    /// (the caller must treat that as "no move possible").
    fn choose_move(&mut self, legal: &[GeneratedMove]) -> Option<ChessMove>;
}

/// Build the engine for a policy, seeded for determinism when requested.
pub fn engine_for_policy(policy: DifficultyPolicy, seed: Option<u64>) -> Box<dyn Engine> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match policy {
        DifficultyPolicy::Random => Box::new(RandomEngine::new(rng)),
        DifficultyPolicy::CaptureBiased {
            capture_probability,
            check_probability,
        } => Box::new(CaptureBiasEngine::new(
            rng,
            capture_probability,
            check_probability,
        )),
        DifficultyPolicy::StaticEval { jitter } => Box::new(GreedyEngine::new(rng, jitter)),
    }
}

#[inline]
pub fn engine_for_tier(tier: DifficultyTier, seed: Option<u64>) -> Box<dyn Engine> {
    engine_for_policy(tier.policy(), seed)
}
