//! Game state machine: owns the current position and the ply record,
//! applies moves through the legality filter, and classifies terminal
//! states after every ply.

use tracing::debug;

use crate::errors::ChessError;
use crate::game_state::chess_rules::{FIFTY_MOVE_RULE_PLIES, REPETITION_DRAW_COUNT};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::legal_moves;
use crate::utils::long_algebraic::{coords_to_long_algebraic, move_to_long_algebraic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Repetition,
    InsufficientMaterial,
    FiftyMoveRule,
    Agreement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// One entry of the game record: the snapshot the move was played from,
/// the move itself, and its long algebraic rendering.
#[derive(Debug, Clone)]
pub struct PlyRecord {
    pub position_before: Position,
    pub mv: ChessMove,
    pub notation: String,
}

/// The authoritative game state for one session.
///
/// The record is append-only except for [`Game::undo`], and is owned
/// exclusively by this machine for the lifetime of the game.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    record: Vec<PlyRecord>,
    status: GameStatus,
    undo_after_game_over: bool,
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::new_game())
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    fn from_position(position: Position) -> Self {
        let mut game = Self {
            position,
            record: Vec::new(),
            status: GameStatus::InProgress,
            undo_after_game_over: false,
        };
        game.status = game.classify();
        game
    }

    /// Permit take-backs from checkmate/stalemate/draw states.
    pub fn with_undo_after_game_over(mut self, allowed: bool) -> Self {
        self.undo_after_game_over = allowed;
        self
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether the side to move is currently in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        is_king_in_check(&self.position, self.position.side_to_move)
    }

    #[inline]
    pub fn record(&self) -> &[PlyRecord] {
        &self.record
    }

    /// Applied moves in long algebraic form, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.record.iter().map(|ply| ply.notation.clone()).collect()
    }

    /// Apply the move identified by `(from, to, promotion)`.
    ///
    /// A missing promotion choice on a promoting move defaults to queen.
    /// The move must be a member of the legal set for the side to move;
    /// anything else is rejected as [`ChessError::IllegalMove`] with the
    /// game state unchanged.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<ChessMove, ChessError> {
        if self.is_over() {
            return Err(ChessError::GameAlreadyOver);
        }

        let side = self.position.side_to_move;
        let legal = legal_moves(&self.position);

        let chosen = legal
            .iter()
            .find(|generated| {
                generated.mv.matches(from, to, promotion)
                    || (promotion.is_none()
                        && generated.mv.matches(from, to, Some(PieceKind::Queen)))
            })
            .ok_or_else(|| ChessError::IllegalMove {
                notation: coords_to_long_algebraic(from, to, promotion),
                side,
            })?;

        let mv = chosen.mv;
        let next = chosen.position_after.clone();

        self.record.push(PlyRecord {
            position_before: std::mem::replace(&mut self.position, next),
            mv,
            notation: move_to_long_algebraic(&mv),
        });
        self.status = self.classify();

        debug!(
            mv = %self.record.last().map(|p| p.notation.as_str()).unwrap_or(""),
            status = ?self.status,
            "move applied"
        );

        Ok(mv)
    }

    /// Take back the last ply, restoring the snapshot it was played from.
    pub fn undo(&mut self) -> Result<(), ChessError> {
        if self.is_over() && !self.undo_after_game_over && !self.record.is_empty() {
            return Err(ChessError::GameAlreadyOver);
        }

        let Some(ply) = self.record.pop() else {
            return Err(ChessError::NoHistory);
        };
        self.position = ply.position_before;
        // Moves are only ever applied from in-progress states.
        self.status = GameStatus::InProgress;

        Ok(())
    }

    /// Both actors agreed to a draw.
    pub fn agree_to_draw(&mut self) -> Result<(), ChessError> {
        if self.is_over() {
            return Err(ChessError::GameAlreadyOver);
        }
        self.status = GameStatus::Draw(DrawReason::Agreement);
        Ok(())
    }

    fn classify(&self) -> GameStatus {
        let side = self.position.side_to_move;

        if legal_moves(&self.position).is_empty() {
            return if is_king_in_check(&self.position, side) {
                GameStatus::Checkmate {
                    winner: side.opposite(),
                }
            } else {
                GameStatus::Stalemate
            };
        }

        if self.repetition_count() >= REPETITION_DRAW_COUNT {
            return GameStatus::Draw(DrawReason::Repetition);
        }

        if self.position.halfmove_clock >= FIFTY_MOVE_RULE_PLIES {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }

        if insufficient_material(&self.position) {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }

        GameStatus::InProgress
    }

    /// How often the current position (board, side, castling, en passant)
    /// has occurred across the game, the current occurrence included.
    fn repetition_count(&self) -> usize {
        let key = self.position.repetition_key();
        1 + self
            .record
            .iter()
            .filter(|ply| ply.position_before.repetition_key() == key)
            .count()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Neither side can force checkmate: only kings remain, or at most one
/// minor piece accompanies each king.
fn insufficient_material(position: &Position) -> bool {
    let mut white_minors = 0usize;
    let mut black_minors = 0usize;

    for slot in position.board.iter().flatten() {
        match slot.kind {
            PieceKind::King => {}
            PieceKind::Bishop | PieceKind::Knight => match slot.color {
                Color::White => white_minors += 1,
                Color::Black => black_minors += 1,
            },
            // Any pawn, rook, or queen is mating material.
            _ => return false,
        }
    }

    white_minors <= 1 && black_minors <= 1
}

#[cfg(test)]
mod tests {
    use super::{DrawReason, Game, GameStatus};
    use crate::errors::ChessError;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::move_generation::move_generator::legal_moves;
    use crate::utils::long_algebraic::parse_long_algebraic;

    fn play(game: &mut Game, moves: &[&str]) {
        for text in moves {
            let (from, to, promotion) =
                parse_long_algebraic(text).expect("test move should parse");
            game.apply_move(from, to, promotion)
                .unwrap_or_else(|err| panic!("move {text} should be legal: {err}"));
        }
    }

    #[test]
    fn every_generated_move_applies_cleanly() {
        let game = Game::new();

        for generated in legal_moves(game.position()) {
            let mut fresh = Game::new();
            let mv = generated.mv;
            fresh
                .apply_move(mv.from, mv.to, mv.promotion)
                .expect("generated moves are legal by construction");
        }
    }

    #[test]
    fn illegal_move_is_rejected_and_state_unchanged() {
        let mut game = Game::new();
        let before = game.position().clone();

        let (from, to, promotion) =
            parse_long_algebraic("e2e5").expect("test move should parse");
        let err = game
            .apply_move(from, to, promotion)
            .expect_err("e2e5 is not legal from the start");

        assert!(matches!(err, ChessError::IllegalMove { .. }));
        assert_eq!(game.position(), &before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn fools_mate_is_checkmate_for_black() {
        let mut game = Game::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        assert!(game.is_over());
        assert!(game.in_check());

        let err = game
            .apply_move(8, 16, None)
            .expect_err("no moves after checkmate");
        assert_eq!(err, ChessError::GameAlreadyOver);
    }

    #[test]
    fn stalemate_is_classified_without_a_winner() {
        // Black to move, king cornered with no legal move and not in check.
        let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")
            .expect("FEN should parse");
        assert_eq!(game.status(), GameStatus::Stalemate);
    }

    #[test]
    fn bare_kings_draw_by_insufficient_material() {
        let game = Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            game.status(),
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        );
    }

    #[test]
    fn king_and_minor_each_draw_but_a_rook_does_not() {
        let minor_each = Game::from_fen("4kb2/8/8/8/8/8/8/2N1K3 w - - 0 1")
            .expect("FEN should parse");
        assert_eq!(
            minor_each.status(),
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        );

        let rook = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").expect("FEN should parse");
        assert_eq!(rook.status(), GameStatus::InProgress);
    }

    #[test]
    fn knight_shuffle_draws_by_threefold_repetition() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                "g1f3", "g8f6", "f3g1", "f6g8", // second occurrence of startpos fields
                "g1f3", "g8f6", "f3g1", "f6g8", // third occurrence
            ],
        );

        assert_eq!(game.status(), GameStatus::Draw(DrawReason::Repetition));
    }

    #[test]
    fn halfmove_clock_at_one_hundred_draws() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 98 70")
            .expect("FEN should parse");
        play(&mut game, &["a1a2", "e8d8"]);

        assert_eq!(game.status(), GameStatus::Draw(DrawReason::FiftyMoveRule));
    }

    #[test]
    fn undo_restores_the_previous_position() {
        let mut game = Game::new();
        let before = game.position().clone();

        play(&mut game, &["e2e4"]);
        assert_ne!(game.position(), &before);

        game.undo().expect("one ply should be undoable");
        assert_eq!(game.position(), &before);
        assert!(game.history().is_empty());
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn undo_on_a_fresh_game_reports_no_history() {
        let mut game = Game::new();
        assert_eq!(game.undo().expect_err("nothing to undo"), ChessError::NoHistory);
    }

    #[test]
    fn undo_after_checkmate_is_gated_by_configuration() {
        let mut game = Game::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(
            game.undo().expect_err("take-back disabled by default"),
            ChessError::GameAlreadyOver
        );

        let mut permissive = Game::new().with_undo_after_game_over(true);
        play(&mut permissive, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        permissive.undo().expect("take-back enabled");
        assert_eq!(permissive.status(), GameStatus::InProgress);
    }

    #[test]
    fn missing_promotion_choice_defaults_to_queen() {
        let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");

        let (from, to, _) = parse_long_algebraic("a7a8").expect("test move should parse");
        let mv = game.apply_move(from, to, None).expect("promotion should apply");

        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        assert_eq!(
            game.position().piece_at(to).map(|p| p.kind),
            Some(PieceKind::Queen)
        );
        assert_eq!(game.history(), vec!["a7a8q".to_owned()]);
    }

    #[test]
    fn agreed_draw_terminates_the_game() {
        let mut game = Game::new();
        game.agree_to_draw().expect("agreement while in progress");
        assert_eq!(game.status(), GameStatus::Draw(DrawReason::Agreement));
        assert!(game.agree_to_draw().is_err());
    }
}
