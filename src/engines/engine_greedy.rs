//! Top-tier engine: static single-ply scoring.
//!
//! Each legal move is scored from material captured, promotion gained,
//! check delivered, and center occupation, plus a small random jitter that
//! breaks ties without ever outranking a capture-value difference.

use rand::rngs::StdRng;
use rand::Rng;

use crate::engines::engine_trait::Engine;
use crate::game_state::chess_rules::{piece_value, CENTER_SQUARES};
use crate::game_state::chess_types::ChessMove;
use crate::move_generation::move_generator::GeneratedMove;

const CAPTURE_WEIGHT: f64 = 10.0;
const PROMOTION_WEIGHT: f64 = 8.0;
const CHECK_WEIGHT: f64 = 5.0;
const CENTER_WEIGHT: f64 = 2.0;

pub struct GreedyEngine {
    rng: StdRng,
    jitter: f64,
}

impl GreedyEngine {
    pub fn new(rng: StdRng, jitter: f64) -> Self {
        Self { rng, jitter }
    }

    fn score(&mut self, generated: &GeneratedMove) -> f64 {
        let mv = &generated.mv;
        let mut score = 0.0;

        if let Some(captured) = mv.captured_piece {
            score += CAPTURE_WEIGHT * f64::from(piece_value(captured));
        }
        if let Some(promotion) = mv.promotion {
            score += PROMOTION_WEIGHT * f64::from(piece_value(promotion));
        }
        if generated.gives_check {
            score += CHECK_WEIGHT;
        }
        if CENTER_SQUARES.contains(&mv.to) {
            score += CENTER_WEIGHT;
        }

        score + self.rng.random_range(0.0..self.jitter)
    }
}

impl Engine for GreedyEngine {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_move(&mut self, legal: &[GeneratedMove]) -> Option<ChessMove> {
        let mut best: Option<(f64, ChessMove)> = None;

        for generated in legal {
            let score = self.score(generated);
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, generated.mv));
            }
        }

        best.map(|(_, mv)| mv)
    }
}
