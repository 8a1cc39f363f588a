//! Attack detection and check queries.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{
    offset_square, BISHOP_DIRECTIONS, KING_STEPS, KNIGHT_JUMPS, ROOK_DIRECTIONS,
};

#[inline]
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    let Some(king_sq) = position.king_square(color) else {
        return false;
    };
    is_square_attacked(position, king_sq, color.opposite())
}

/// Whether any piece of `attacker_color` attacks `square`.
pub fn is_square_attacked(position: &Position, square: Square, attacker_color: Color) -> bool {
    // Pawns attack diagonally forward, so look one rank back from the target.
    let pawn_rank_delta = match attacker_color {
        Color::White => -1,
        Color::Black => 1,
    };
    for file_delta in [-1i8, 1i8] {
        if let Some(from) = offset_square(square, file_delta, pawn_rank_delta) {
            if position.piece_at(from)
                == Some(Piece::new(attacker_color, PieceKind::Pawn))
            {
                return true;
            }
        }
    }

    for &(file_delta, rank_delta) in &KNIGHT_JUMPS {
        if let Some(from) = offset_square(square, file_delta, rank_delta) {
            if position.piece_at(from)
                == Some(Piece::new(attacker_color, PieceKind::Knight))
            {
                return true;
            }
        }
    }

    for &(file_delta, rank_delta) in &KING_STEPS {
        if let Some(from) = offset_square(square, file_delta, rank_delta) {
            if position.piece_at(from)
                == Some(Piece::new(attacker_color, PieceKind::King))
            {
                return true;
            }
        }
    }

    slider_attacks(position, square, attacker_color, &ROOK_DIRECTIONS, PieceKind::Rook)
        || slider_attacks(position, square, attacker_color, &BISHOP_DIRECTIONS, PieceKind::Bishop)
}

fn slider_attacks(
    position: &Position,
    square: Square,
    attacker_color: Color,
    directions: &[(i8, i8)],
    slider_kind: PieceKind,
) -> bool {
    for &(file_delta, rank_delta) in directions {
        let mut current = square;

        while let Some(from) = offset_square(current, file_delta, rank_delta) {
            match position.piece_at(from) {
                None => current = from,
                Some(piece) => {
                    if piece.color == attacker_color
                        && (piece.kind == slider_kind || piece.kind == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
            }
        }
    }

    false
}

/// Every piece of `attacker_color` attacking `square`, with its location.
pub fn attackers_to_square(
    position: &Position,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    let mut attackers = Vec::new();

    let pawn_rank_delta = match attacker_color {
        Color::White => -1,
        Color::Black => 1,
    };
    for file_delta in [-1i8, 1i8] {
        if let Some(from) = offset_square(square, file_delta, pawn_rank_delta) {
            if position.piece_at(from)
                == Some(Piece::new(attacker_color, PieceKind::Pawn))
            {
                attackers.push((from, PieceKind::Pawn));
            }
        }
    }

    for &(file_delta, rank_delta) in &KNIGHT_JUMPS {
        if let Some(from) = offset_square(square, file_delta, rank_delta) {
            if position.piece_at(from)
                == Some(Piece::new(attacker_color, PieceKind::Knight))
            {
                attackers.push((from, PieceKind::Knight));
            }
        }
    }

    for &(file_delta, rank_delta) in &KING_STEPS {
        if let Some(from) = offset_square(square, file_delta, rank_delta) {
            if position.piece_at(from)
                == Some(Piece::new(attacker_color, PieceKind::King))
            {
                attackers.push((from, PieceKind::King));
            }
        }
    }

    collect_slider_attackers(position, square, attacker_color, &ROOK_DIRECTIONS, PieceKind::Rook, &mut attackers);
    collect_slider_attackers(position, square, attacker_color, &BISHOP_DIRECTIONS, PieceKind::Bishop, &mut attackers);

    attackers
}

fn collect_slider_attackers(
    position: &Position,
    square: Square,
    attacker_color: Color,
    directions: &[(i8, i8)],
    slider_kind: PieceKind,
    out: &mut Vec<(Square, PieceKind)>,
) {
    for &(file_delta, rank_delta) in directions {
        let mut current = square;

        while let Some(from) = offset_square(current, file_delta, rank_delta) {
            match position.piece_at(from) {
                None => current = from,
                Some(piece) => {
                    if piece.color == attacker_color
                        && (piece.kind == slider_kind || piece.kind == PieceKind::Queen)
                    {
                        out.push((from, piece.kind));
                    }
                    break;
                }
            }
        }
    }
}
