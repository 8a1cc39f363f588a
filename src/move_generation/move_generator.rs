//! Full legal move generation pipeline.
//!
//! Orchestrates piece-wise pseudo-legal generation, applies each candidate to
//! a scratch copy of the position, filters the ones that leave the mover's
//! own king attacked, and annotates whether the surviving move gives check.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;

/// A legal move together with the snapshot it leads to.
///
/// `gives_check` records whether the side to move in `position_after` is in
/// check; the tiered engines and the termination classifier both consume it.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub mv: ChessMove,
    pub position_after: Position,
    pub gives_check: bool,
}

/// All legal moves for the side to move. Callers must not depend on order.
pub fn legal_moves(position: &Position) -> Vec<GeneratedMove> {
    let mut pseudo = Vec::<ChessMove>::with_capacity(64);

    generate_pawn_moves(position, &mut pseudo);
    generate_knight_moves(position, &mut pseudo);
    generate_bishop_moves(position, &mut pseudo);
    generate_rook_moves(position, &mut pseudo);
    generate_queen_moves(position, &mut pseudo);
    generate_king_moves(position, &mut pseudo);

    let mut legal = Vec::<GeneratedMove>::with_capacity(pseudo.len());
    for mv in pseudo {
        let next = apply_move(position, &mv);

        // Illegal if the mover's own king is in check after the move.
        if is_king_in_check(&next, position.side_to_move) {
            continue;
        }

        let gives_check = is_king_in_check(&next, next.side_to_move);
        legal.push(GeneratedMove {
            mv,
            position_after: next,
            gives_check,
        });
    }

    legal
}

/// Legal moves starting on `from`. An empty or opponent-owned square yields
/// an empty set, not a failure.
pub fn legal_moves_from(position: &Position, from: Square) -> Vec<GeneratedMove> {
    match position.piece_at(from) {
        Some(piece) if piece.color == position.side_to_move => legal_moves(position)
            .into_iter()
            .filter(|generated| generated.mv.from == from)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{legal_moves, legal_moves_from};
    use crate::game_state::position::Position;
    use crate::move_generation::legal_move_checks::is_king_in_check;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> u8 {
        algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn initial_position_has_exactly_twenty_moves() {
        let position = Position::new_game();
        assert_eq!(legal_moves(&position).len(), 20);
    }

    #[test]
    fn no_generated_move_leaves_own_king_in_check() {
        // Mixed middlegame with pins, checks available, and castling rights.
        let position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");

        for generated in legal_moves(&position) {
            assert!(
                !is_king_in_check(&generated.position_after, position.side_to_move),
                "move {:?} leaves the mover in check",
                generated.mv
            );
        }
    }

    #[test]
    fn pinned_piece_may_not_expose_the_king() {
        // The e-file knight is pinned against the king by a rook.
        let position =
            Position::from_fen("4r1k1/8/8/8/8/4N3/8/4K3 w - - 0 1").expect("FEN should parse");

        assert!(legal_moves_from(&position, sq("e3")).is_empty());
    }

    #[test]
    fn moves_from_empty_or_enemy_squares_are_an_empty_set() {
        let position = Position::new_game();

        assert!(legal_moves_from(&position, sq("e4")).is_empty());
        assert!(legal_moves_from(&position, sq("e7")).is_empty());
    }

    #[test]
    fn check_evasion_restricts_the_move_set() {
        // White king on e1 checked by a rook on e8; only king steps off the
        // e-file (or blocks) are legal, and d2/e2/f2 stay covered.
        let position =
            Position::from_fen("4r2k/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");

        let moves = legal_moves(&position);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|generated| {
            let to = generated.mv.to;
            to != sq("e2")
        }));
    }

    #[test]
    fn gives_check_annotation_matches_probed_position() {
        // Rook lift to the e-file delivers check.
        let position =
            Position::from_fen("4k3/8/8/8/8/8/8/3RK3 w - - 0 1").expect("FEN should parse");

        let checking: Vec<_> = legal_moves(&position)
            .into_iter()
            .filter(|generated| generated.gives_check)
            .collect();

        assert!(checking.iter().any(|g| g.mv.to == sq("d8")));
        assert!(checking
            .iter()
            .all(|g| is_king_in_check(&g.position_after, g.position_after.side_to_move)));
    }
}
