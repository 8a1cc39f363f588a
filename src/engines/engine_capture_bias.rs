//! Mid-tier engine: uniform random choice with an elevated probability of
//! picking among capturing moves, and a secondary elevated probability of
//! picking among checking moves.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::Rng;

use crate::engines::engine_trait::Engine;
use crate::game_state::chess_types::ChessMove;
use crate::move_generation::move_generator::GeneratedMove;

pub struct CaptureBiasEngine {
    rng: StdRng,
    capture_probability: f64,
    check_probability: f64,
}

impl CaptureBiasEngine {
    pub fn new(rng: StdRng, capture_probability: f64, check_probability: f64) -> Self {
        Self {
            rng,
            capture_probability,
            check_probability,
        }
    }
}

impl Engine for CaptureBiasEngine {
    fn name(&self) -> &str {
        "capture-bias"
    }

    fn choose_move(&mut self, legal: &[GeneratedMove]) -> Option<ChessMove> {
        if legal.is_empty() {
            return None;
        }

        let captures: Vec<&GeneratedMove> =
            legal.iter().filter(|generated| generated.mv.is_capture()).collect();
        if !captures.is_empty() && self.rng.random::<f64>() < self.capture_probability {
            return captures.choose(&mut self.rng).map(|generated| generated.mv);
        }

        // Check delivery is probed on the already-computed successor
        // positions, not re-derived here.
        let checks: Vec<&GeneratedMove> =
            legal.iter().filter(|generated| generated.gives_check).collect();
        if !checks.is_empty() && self.rng.random::<f64>() < self.check_probability {
            return checks.choose(&mut self.rng).map(|generated| generated.mv);
        }

        legal.choose(&mut self.rng).map(|generated| generated.mv)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::CaptureBiasEngine;
    use crate::engines::engine_trait::Engine;
    use crate::game_state::position::Position;
    use crate::move_generation::move_generator::legal_moves;

    #[test]
    fn full_capture_bias_always_takes_when_a_capture_exists() {
        // White can capture the d5 pawn with the e4 pawn.
        let position = Position::from_fen(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
        )
        .expect("FEN should parse");
        let legal = legal_moves(&position);

        let mut engine = CaptureBiasEngine::new(StdRng::seed_from_u64(3), 1.0, 0.0);
        for _ in 0..32 {
            let mv = engine.choose_move(&legal).expect("moves exist");
            assert!(mv.is_capture());
        }
    }

    #[test]
    fn full_check_bias_prefers_checks_when_no_capture_fires() {
        // No captures available; Qh5 style checks exist for White.
        let position =
            Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        let legal = legal_moves(&position);
        assert!(legal.iter().all(|generated| !generated.mv.is_capture()));
        assert!(legal.iter().any(|generated| generated.gives_check));

        let mut engine = CaptureBiasEngine::new(StdRng::seed_from_u64(3), 1.0, 1.0);
        for _ in 0..32 {
            let mv = engine.choose_move(&legal).expect("moves exist");
            let chosen = legal
                .iter()
                .find(|generated| generated.mv == mv)
                .expect("chosen move is in the set");
            assert!(chosen.gives_check);
        }
    }

    #[test]
    fn zero_bias_degenerates_to_uniform_choice() {
        let position = Position::new_game();
        let legal = legal_moves(&position);

        let mut engine = CaptureBiasEngine::new(StdRng::seed_from_u64(11), 0.0, 0.0);
        let mv = engine.choose_move(&legal).expect("moves exist");
        assert!(legal.iter().any(|generated| generated.mv == mv));
    }
}
