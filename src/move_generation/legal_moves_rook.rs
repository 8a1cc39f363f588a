use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{push_slider_moves, squares_of, ROOK_DIRECTIONS};

pub fn generate_rook_moves(position: &Position, out: &mut Vec<ChessMove>) {
    for from in squares_of(position, position.side_to_move, PieceKind::Rook) {
        push_slider_moves(position, from, PieceKind::Rook, &ROOK_DIRECTIONS, out);
    }
}
