use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{offset_square, squares_of};

const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

pub fn generate_pawn_moves(position: &Position, out: &mut Vec<ChessMove>) {
    let side = position.side_to_move;
    let (rank_delta, start_rank, promotion_rank) = match side {
        Color::White => (1i8, 1u8, 7u8),
        Color::Black => (-1i8, 6u8, 0u8),
    };

    for from in squares_of(position, side, PieceKind::Pawn) {
        // Forward pushes.
        if let Some(to) = offset_square(from, 0, rank_delta) {
            if position.piece_at(to).is_none() {
                if to / 8 == promotion_rank {
                    for promo in PROMOTION_CHOICES {
                        out.push(pawn_move(from, to, None, Some(promo), 0));
                    }
                } else {
                    out.push(pawn_move(from, to, None, None, 0));

                    // Double step, only from the starting rank through an
                    // empty intermediate square.
                    if from / 8 == start_rank {
                        if let Some(two) = offset_square(from, 0, 2 * rank_delta) {
                            if position.piece_at(two).is_none() {
                                out.push(pawn_move(from, two, None, None, FLAG_DOUBLE_PAWN_PUSH));
                            }
                        }
                    }
                }
            }
        }

        // Diagonal captures and en passant.
        for file_delta in [-1i8, 1i8] {
            let Some(to) = offset_square(from, file_delta, rank_delta) else {
                continue;
            };

            match position.piece_at(to) {
                Some(target) if target.color != side => {
                    if to / 8 == promotion_rank {
                        for promo in PROMOTION_CHOICES {
                            out.push(pawn_move(
                                from,
                                to,
                                Some(target.kind),
                                Some(promo),
                                FLAG_CAPTURE,
                            ));
                        }
                    } else {
                        out.push(pawn_move(from, to, Some(target.kind), None, FLAG_CAPTURE));
                    }
                }
                None if position.en_passant_square == Some(to) => {
                    out.push(pawn_move(
                        from,
                        to,
                        Some(PieceKind::Pawn),
                        None,
                        FLAG_CAPTURE | FLAG_EN_PASSANT,
                    ));
                }
                _ => {}
            }
        }
    }
}

#[inline]
fn pawn_move(
    from: Square,
    to: Square,
    captured_piece: Option<PieceKind>,
    promotion: Option<PieceKind>,
    flags: MoveFlags,
) -> ChessMove {
    ChessMove {
        from,
        to,
        moved_piece: PieceKind::Pawn,
        captured_piece,
        promotion,
        flags,
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::position::Position;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> u8 {
        algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn double_step_requires_both_squares_empty() {
        let position =
            Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let mut moves = Vec::new();
        generate_pawn_moves(&position, &mut moves);

        assert!(moves.iter().any(|m| m.to == sq("e3")));
        assert!(!moves.iter().any(|m| m.to == sq("e4")));
    }

    #[test]
    fn en_passant_targets_only_the_recorded_square() {
        let position =
            Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let mut moves = Vec::new();
        generate_pawn_moves(&position, &mut moves);

        let ep = moves
            .iter()
            .find(|m| m.is_en_passant())
            .expect("en-passant capture should be generated");
        assert_eq!(ep.from, sq("e5"));
        assert_eq!(ep.to, sq("d6"));
        assert_eq!(ep.captured_piece, Some(PieceKind::Pawn));
    }

    #[test]
    fn promotion_generates_all_four_piece_kinds() {
        let position =
            Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mut moves = Vec::new();
        generate_pawn_moves(&position, &mut moves);

        let promotions: Vec<_> = moves.iter().filter(|m| m.from == sq("a7")).collect();
        assert_eq!(promotions.len(), 4);
        assert!(promotions.iter().all(|m| m.promotion.is_some()));
        assert!(promotions
            .iter()
            .any(|m| m.promotion == Some(PieceKind::Queen)));
    }
}
