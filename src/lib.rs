//! Crate root module declarations for the Parlor Chess engine.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! difficulty-tiered engines, the session facade, and utility helpers) so the
//! demo binary, tests, and embedding applications can import stable module
//! paths.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game;
    pub mod position;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod engines {
    pub mod engine_capture_bias;
    pub mod engine_greedy;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod session {
    pub mod session_controller;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_position;
}
