//! Functional move application.
//!
//! `apply_move` never mutates its input: it clones the position, replays the
//! move onto the clone, and returns the successor snapshot. The move must
//! come from this crate's generators (it carries its own bookkeeping), which
//! makes application total.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub fn apply_move(position: &Position, mv: &ChessMove) -> Position {
    let moving_color = position.side_to_move;
    let enemy_color = moving_color.opposite();

    let mut next = position.clone();

    next.board[mv.from as usize] = None;

    // The en-passant-captured pawn sits one rank behind the destination
    // square, not on it.
    if mv.is_en_passant() {
        let capture_sq = match moving_color {
            Color::White => mv.to - 8,
            Color::Black => mv.to + 8,
        };
        next.board[capture_sq as usize] = None;
    }

    let placed_kind = mv.promotion.unwrap_or(mv.moved_piece);
    next.board[mv.to as usize] = Some(Piece::new(moving_color, placed_kind));

    if mv.is_castle() {
        let (rook_from, rook_to) = match (moving_color, mv.to) {
            (Color::White, 6) => (7u8, 5u8),
            (Color::White, 2) => (0, 3),
            (Color::Black, 62) => (63, 61),
            _ => (56, 59),
        };
        next.board[rook_from as usize] = None;
        next.board[rook_to as usize] = Some(Piece::new(moving_color, PieceKind::Rook));
    }

    update_castling_rights(&mut next, moving_color, mv);

    next.en_passant_square = if mv.is_double_step() {
        Some((mv.from + mv.to) / 2)
    } else {
        None
    };

    if mv.moved_piece == PieceKind::Pawn || mv.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = enemy_color;

    next
}

fn update_castling_rights(position: &mut Position, moving_color: Color, mv: &ChessMove) {
    if mv.moved_piece == PieceKind::King {
        position.castling_rights &= match moving_color {
            Color::White => !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE),
            Color::Black => !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE),
        };
    }

    // A rook leaving its corner, or any capture landing on one, permanently
    // clears that corner's right.
    for corner in [mv.from, mv.to] {
        position.castling_rights &= match corner {
            0 => !CASTLE_WHITE_QUEENSIDE,
            7 => !CASTLE_WHITE_KINGSIDE,
            56 => !CASTLE_BLACK_QUEENSIDE,
            63 => !CASTLE_BLACK_KINGSIDE,
            _ => !0,
        };
    }
}
