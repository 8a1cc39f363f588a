//! Crate-wide error type.
//!
//! Every rejection the engine can produce is a recoverable report to the
//! caller; nothing in here is fatal to the process. Variants carry enough
//! context (offending move, side to move) for the caller to re-prompt.

use thiserror::Error;

use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// The submitted move is not in the legal set for the current position.
    #[error("illegal move {notation} for {side}")]
    IllegalMove { notation: String, side: Color },

    /// A move was submitted by the actor whose turn it is not, or while the
    /// artificial opponent's reply was still pending.
    #[error("it is {side_to_move}'s turn")]
    NotYourTurn { side_to_move: Color },

    /// The game has reached a terminal state; no further moves apply.
    #[error("game is already over")]
    GameAlreadyOver,

    /// Undo was requested with an empty game record.
    #[error("no moves to undo")]
    NoHistory,

    /// The artificial opponent was asked to move but no legal move exists.
    /// The state machine classifies such positions as terminal first, so
    /// reaching this is a logic error in the caller, not a game state.
    #[error("no legal moves available for {side}")]
    NoLegalMoves { side: Color },

    /// A position string could not be parsed.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}
