//! Immutable-per-ply position snapshot.
//!
//! `Position` is the value type the whole engine revolves around: a 64-slot
//! board plus the side to move, castling rights, en-passant target, and the
//! two move counters. It is never mutated in place by callers; applying a
//! move produces a fresh snapshot, which makes "clone, try, inspect" the
//! cheap and safe primitive behind legality filtering.

use crate::errors::ChessError;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::{generate_fen, generate_repetition_fields};
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Position {
    /// A board with no pieces; building block for the FEN parser and tests.
    pub fn empty() -> Self {
        Self {
            board: [None; 64],
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The standard initial arrangement, White to move.
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        parse_fen(fen).map_err(ChessError::InvalidFen)
    }

    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square as usize]
    }

    /// Locate the king of `color`. Legal play keeps exactly one king per
    /// side on the board; `None` only occurs in hand-built test positions.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.board.iter().position(|slot| {
            matches!(slot, Some(piece) if piece.color == color && piece.kind == PieceKind::King)
        }).map(|idx| idx as Square)
    }

    /// Identity of this position for threefold-repetition detection:
    /// board, side to move, castling rights, and en-passant target.
    /// The halfmove clock and fullmove number are excluded.
    pub fn repetition_key(&self) -> String {
        generate_repetition_fields(self)
    }
}
