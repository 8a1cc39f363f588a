use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{offset_square, squares_of, KNIGHT_JUMPS};

pub fn generate_knight_moves(position: &Position, out: &mut Vec<ChessMove>) {
    let side = position.side_to_move;

    for from in squares_of(position, side, PieceKind::Knight) {
        for &(file_delta, rank_delta) in &KNIGHT_JUMPS {
            let Some(to) = offset_square(from, file_delta, rank_delta) else {
                continue;
            };

            match position.piece_at(to) {
                None => out.push(ChessMove {
                    from,
                    to,
                    moved_piece: PieceKind::Knight,
                    captured_piece: None,
                    promotion: None,
                    flags: 0,
                }),
                Some(target) if target.color != side => out.push(ChessMove {
                    from,
                    to,
                    moved_piece: PieceKind::Knight,
                    captured_piece: Some(target.kind),
                    promotion: None,
                    flags: FLAG_CAPTURE,
                }),
                Some(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_knight_moves;
    use crate::game_state::position::Position;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn knight_jumps_over_intervening_pieces() {
        // Knight boxed in by its own pawns still has both forward jumps.
        let position = Position::from_fen("4k3/8/8/8/8/8/PPP5/1N2K3 w - - 0 1")
            .expect("FEN should parse");
        let mut moves = Vec::new();
        generate_knight_moves(&position, &mut moves);

        let a3 = algebraic_to_square("a3").expect("a3 should parse");
        let c3 = algebraic_to_square("c3").expect("c3 should parse");
        let d2 = algebraic_to_square("d2").expect("d2 should parse");

        assert_eq!(moves.len(), 3);
        assert!(moves.iter().any(|m| m.to == a3));
        assert!(moves.iter().any(|m| m.to == c3));
        assert!(moves.iter().any(|m| m.to == d2));
    }
}
