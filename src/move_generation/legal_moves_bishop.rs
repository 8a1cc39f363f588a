use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{push_slider_moves, squares_of, BISHOP_DIRECTIONS};

pub fn generate_bishop_moves(position: &Position, out: &mut Vec<ChessMove>) {
    for from in squares_of(position, position.side_to_move, PieceKind::Bishop) {
        push_slider_moves(position, from, PieceKind::Bishop, &BISHOP_DIRECTIONS, out);
    }
}
