//! Session facade: sequences the human and artificial actors over one game.
//!
//! A session owns one authoritative [`Game`] plus the tier engine playing the
//! non-human side. All mutation funnels through the session's single mutex,
//! and the AI's "thinking" delay runs as a spawned, abortable task so it
//! never blocks reads or starting a new game. Human input is rejected while
//! the AI's reply is pending; a new game bumps the session epoch so a stale
//! AI result resolving afterwards is discarded instead of applied.
//!
//! Controllers must be created inside a tokio runtime; the handle is
//! captured at construction and used to spawn the AI task.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::engines::engine_trait::{engine_for_tier, DifficultyTier, Engine};
use crate::errors::ChessError;
use crate::game_state::chess_types::{ChessMove, Color, PieceKind, Square};
use crate::game_state::game::{Game, GameStatus};
use crate::game_state::position::Position;
use crate::move_generation::move_generator::{legal_moves, legal_moves_from};

/// Session setup consumed from the surrounding application.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub difficulty: DifficultyTier,
    pub human_color: Color,
    /// Permit take-backs after checkmate/stalemate/draw.
    pub undo_after_game_over: bool,
    /// Seed for the AI's random source; `None` draws from the OS.
    pub ai_seed: Option<u64>,
    /// Simulate a tier-scaled thinking pause before the AI replies.
    pub think_delay: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: DifficultyTier::default(),
            human_color: Color::White,
            undo_after_game_over: false,
            ai_seed: None,
            think_delay: true,
        }
    }
}

struct SessionState {
    game: Game,
    engine: Box<dyn Engine>,
    delay_rng: StdRng,
    ai_pending: bool,
    /// Bumped on every new game; a spawned AI task only applies its result
    /// while its epoch is still current.
    epoch: u64,
}

pub struct SessionController {
    config: SessionConfig,
    state: Arc<Mutex<SessionState>>,
    ai_task: Mutex<Option<JoinHandle<()>>>,
    runtime: tokio::runtime::Handle,
}

impl SessionController {
    pub fn new(config: SessionConfig) -> Self {
        let game = Game::new().with_undo_after_game_over(config.undo_after_game_over);
        Self::with_game(config, game)
    }

    fn with_game(config: SessionConfig, game: Game) -> Self {
        let rng = match config.ai_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let controller = Self {
            state: Arc::new(Mutex::new(SessionState {
                game,
                engine: engine_for_tier(config.difficulty, config.ai_seed),
                delay_rng: rng,
                ai_pending: false,
                epoch: 0,
            })),
            ai_task: Mutex::new(None),
            runtime: tokio::runtime::Handle::current(),
            config,
        };

        info!(
            difficulty = controller.config.difficulty.label(),
            human = %controller.config.human_color,
            "session started"
        );

        let mut state = controller.state.lock();
        controller.schedule_ai_move(&mut state);
        drop(state);

        controller
    }

    /// Route a human-submitted move into the game.
    pub fn submit_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<ChessMove, ChessError> {
        let mut state = self.state.lock();

        if state.game.is_over() {
            return Err(ChessError::GameAlreadyOver);
        }

        let side = state.game.position().side_to_move;
        if state.ai_pending || side != self.config.human_color {
            return Err(ChessError::NotYourTurn { side_to_move: side });
        }

        let mv = state.game.apply_move(from, to, promotion)?;
        info!(
            mv = %state.game.history().last().cloned().unwrap_or_default(),
            status = ?state.game.status(),
            "human move applied"
        );

        self.schedule_ai_move(&mut state);
        Ok(mv)
    }

    /// Discard the current game and start over. A pending AI computation is
    /// cancelled; if its result resolves late it is discarded, never applied
    /// to the new game.
    pub fn new_game(&self) {
        if let Some(handle) = self.ai_task.lock().take() {
            handle.abort();
        }

        let mut state = self.state.lock();
        state.epoch += 1;
        state.ai_pending = false;
        state.game = Game::new().with_undo_after_game_over(self.config.undo_after_game_over);
        info!(epoch = state.epoch, "new game started");

        self.schedule_ai_move(&mut state);
    }

    /// Take back plies until it is the human's turn again (one human move
    /// plus the AI's reply, typically). Rejected while the AI is thinking.
    pub fn undo(&self) -> Result<(), ChessError> {
        let mut state = self.state.lock();

        if state.ai_pending {
            return Err(ChessError::NotYourTurn {
                side_to_move: state.game.position().side_to_move,
            });
        }

        state.game.undo()?;
        while state.game.position().side_to_move != self.config.human_color
            && !state.game.record().is_empty()
        {
            state.game.undo()?;
        }

        // Undoing everything as Black hands the first move back to the AI.
        self.schedule_ai_move(&mut state);
        Ok(())
    }

    /// Both actors agreed to a draw.
    pub fn agree_to_draw(&self) -> Result<(), ChessError> {
        let mut state = self.state.lock();
        if state.ai_pending {
            return Err(ChessError::NotYourTurn {
                side_to_move: state.game.position().side_to_move,
            });
        }
        state.game.agree_to_draw()
    }

    pub fn current_position(&self) -> Position {
        self.state.lock().game.position().clone()
    }

    pub fn current_fen(&self) -> String {
        self.state.lock().game.position().get_fen()
    }

    pub fn status(&self) -> GameStatus {
        self.state.lock().game.status()
    }

    pub fn in_check(&self) -> bool {
        self.state.lock().game.in_check()
    }

    /// Destination squares of the legal moves starting on `from`, for
    /// move-hint highlighting. Empty for empty or opponent-owned squares.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let state = self.state.lock();
        legal_moves_from(state.game.position(), from)
            .iter()
            .map(|generated| generated.mv.to)
            .collect()
    }

    /// Applied moves in long algebraic form, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.state.lock().game.history()
    }

    pub fn is_ai_thinking(&self) -> bool {
        self.state.lock().ai_pending
    }

    /// Await the currently scheduled AI reply, if any. Intended for tests
    /// and headless drivers; the interactive caller polls state instead.
    pub async fn wait_for_ai(&self) {
        let handle = self.ai_task.lock().take();
        if let Some(handle) = handle {
            // An aborted task resolves with a JoinError; that is expected.
            let _ = handle.await;
        }
    }

    /// Spawn the AI reply task when the game goes on and it is the AI's
    /// turn. Called with the state lock held.
    fn schedule_ai_move(&self, state: &mut SessionState) {
        if state.game.is_over()
            || state.game.position().side_to_move == self.config.human_color
            || state.ai_pending
        {
            return;
        }

        state.ai_pending = true;
        let epoch = state.epoch;
        let delay = self.think_delay(&mut state.delay_rng);
        let shared = Arc::clone(&self.state);

        debug!(delay_ms = delay.as_millis() as u64, "AI move scheduled");

        let handle = self.runtime.spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let mut state = shared.lock();
            if state.epoch != epoch {
                debug!("stale AI result discarded");
                return;
            }
            state.ai_pending = false;

            if state.game.is_over() {
                return;
            }

            let side = state.game.position().side_to_move;
            let legal = legal_moves(state.game.position());
            let Some(mv) = state.engine.choose_move(&legal) else {
                // The state machine classifies no-move positions as terminal
                // before the AI is ever asked; reaching this is a logic error.
                error!(%side, "{}", ChessError::NoLegalMoves { side });
                return;
            };

            match state.game.apply_move(mv.from, mv.to, mv.promotion) {
                Ok(_) => info!(
                    mv = %state.game.history().last().cloned().unwrap_or_default(),
                    status = ?state.game.status(),
                    "AI move applied"
                ),
                Err(err) => error!(%err, "AI produced a move the game rejected"),
            }
        });

        *self.ai_task.lock() = Some(handle);
    }

    fn think_delay(&self, rng: &mut StdRng) -> Duration {
        if !self.config.think_delay {
            return Duration::ZERO;
        }

        // Reference pacing: half a second floor, a random spread, and a
        // per-tier surcharge so higher tiers appear to deliberate longer.
        let millis =
            rng.random_range(0..1000) + 500 + 200 * u64::from(self.config.difficulty.get());
        Duration::from_millis(millis)
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        // A session takes its pending AI computation with it.
        if let Some(handle) = self.ai_task.lock().take() {
            handle.abort();
        }
    }
}
