//! Canonical chess-rule constants.
//!
//! Static rule-related literals: the standard starting position, the move
//! counts backing the fifty-move rule, and the weights the tiered engines
//! score with.

use crate::game_state::chess_types::{PieceKind, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Plies without a capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_RULE_PLIES: u16 = 100;

/// Occurrences of the same position that draw the game by repetition.
pub const REPETITION_DRAW_COUNT: usize = 3;

/// The four center squares (d4, e4, d5, e5) favored by the scoring engine.
pub const CENTER_SQUARES: [Square; 4] = [27, 28, 35, 36];

/// Conventional material value of a piece, in pawns.
#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}
