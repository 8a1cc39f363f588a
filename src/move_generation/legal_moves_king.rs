use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{offset_square, KING_STEPS};

pub fn generate_king_moves(position: &Position, out: &mut Vec<ChessMove>) {
    let side = position.side_to_move;
    let Some(from) = position.king_square(side) else {
        return;
    };

    for &(file_delta, rank_delta) in &KING_STEPS {
        let Some(to) = offset_square(from, file_delta, rank_delta) else {
            continue;
        };

        match position.piece_at(to) {
            None => out.push(king_move(from, to, None, 0)),
            Some(target) if target.color != side => {
                out.push(king_move(from, to, Some(target.kind), FLAG_CAPTURE));
            }
            Some(_) => {}
        }
    }

    generate_castling_moves(position, out, from);
}

fn generate_castling_moves(position: &Position, out: &mut Vec<ChessMove>, king_from: Square) {
    let side = position.side_to_move;
    let enemy = side.opposite();

    // Cannot castle out of check.
    if is_square_attacked(position, king_from, enemy) {
        return;
    }

    let (home, kingside_right, queenside_right) = match side {
        Color::White => (4u8, CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE),
        Color::Black => (60u8, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE),
    };

    if king_from != home {
        return;
    }

    if (position.castling_rights & kingside_right) != 0 {
        let f_file = home + 1;
        let g_file = home + 2;
        if position.piece_at(f_file).is_none()
            && position.piece_at(g_file).is_none()
            && !is_square_attacked(position, f_file, enemy)
            && !is_square_attacked(position, g_file, enemy)
        {
            out.push(king_move(home, g_file, None, FLAG_CASTLING));
        }
    }

    if (position.castling_rights & queenside_right) != 0 {
        let b_file = home - 3;
        let c_file = home - 2;
        let d_file = home - 1;
        if position.piece_at(b_file).is_none()
            && position.piece_at(c_file).is_none()
            && position.piece_at(d_file).is_none()
            && !is_square_attacked(position, d_file, enemy)
            && !is_square_attacked(position, c_file, enemy)
        {
            out.push(king_move(home, c_file, None, FLAG_CASTLING));
        }
    }
}

#[inline]
fn king_move(from: Square, to: Square, captured_piece: Option<PieceKind>, flags: MoveFlags) -> ChessMove {
    ChessMove {
        from,
        to,
        moved_piece: PieceKind::King,
        captured_piece,
        promotion: None,
        flags,
    }
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::game_state::position::Position;
    use crate::utils::algebraic::algebraic_to_square;

    fn castles(fen: &str) -> Vec<u8> {
        let position = Position::from_fen(fen).expect("FEN should parse");
        let mut moves = Vec::new();
        generate_king_moves(&position, &mut moves);
        moves.iter().filter(|m| m.is_castle()).map(|m| m.to).collect()
    }

    #[test]
    fn both_castles_available_on_an_open_back_rank() {
        let targets = castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let g1 = algebraic_to_square("g1").expect("g1 should parse");
        let c1 = algebraic_to_square("c1").expect("c1 should parse");
        assert!(targets.contains(&g1));
        assert!(targets.contains(&c1));
    }

    #[test]
    fn castling_blocked_while_in_check() {
        assert!(castles("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1").is_empty());
    }

    #[test]
    fn castling_blocked_through_attacked_square() {
        // Black rook on f8 covers f1, forbidding the king-side castle only.
        let targets = castles("5r2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let g1 = algebraic_to_square("g1").expect("g1 should parse");
        let c1 = algebraic_to_square("c1").expect("c1 should parse");
        assert!(!targets.contains(&g1));
        assert!(targets.contains(&c1));
    }

    #[test]
    fn castling_requires_empty_squares_between() {
        let targets = castles("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1");
        assert!(targets.is_empty());
    }

    #[test]
    fn no_castle_without_the_recorded_right() {
        assert!(castles("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").is_empty());
    }
}
