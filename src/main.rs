//! Demo binary: plays two difficulty tiers against each other and prints the
//! final board, status, and PGN.

use tracing::info;

use parlor_chess::engines::engine_trait::{engine_for_tier, DifficultyTier, Engine};
use parlor_chess::game_state::chess_types::Color;
use parlor_chess::game_state::game::Game;
use parlor_chess::move_generation::move_generator::legal_moves;
use parlor_chess::utils::pgn::write_pgn;
use parlor_chess::utils::render_position::render_position;

fn main() {
    tracing_subscriber::fmt::init();

    let mut game = Game::new();
    let mut white = engine_for_tier(DifficultyTier::new(2), None);
    let mut black = engine_for_tier(DifficultyTier::new(5), None);

    info!(
        white = white.name(),
        black = black.name(),
        "demo match started"
    );

    while !game.is_over() {
        let legal = legal_moves(game.position());
        let engine = match game.position().side_to_move {
            Color::White => &mut white,
            Color::Black => &mut black,
        };

        let Some(mv) = engine.choose_move(&legal) else {
            break;
        };
        if let Err(err) = game.apply_move(mv.from, mv.to, mv.promotion) {
            info!(%err, "engine move rejected; stopping");
            break;
        }
    }

    println!("{}", render_position(game.position()));
    println!();
    println!("status after {} plies: {:?}", game.record().len(), game.status());
    println!();
    print!("{}", write_pgn(&game));
}
