//! PGN export for game-history interchange.
//!
//! Serializes a game's record and outcome to PGN text: headers, numbered
//! long-algebraic movetext, and a result token.

use std::collections::BTreeMap;

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::game::{Game, GameStatus};
use crate::game_state::chess_types::Color;

pub fn write_pgn(game: &Game) -> String {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Parlor Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert(
        "Date".to_owned(),
        chrono::Local::now().format("%Y.%m.%d").to_string(),
    );
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), result_token(game.status()).to_owned());

    let initial_fen = game
        .record()
        .first()
        .map(|ply| ply.position_before.get_fen())
        .unwrap_or_else(|| game.position().get_fen());
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    write_pgn_with_headers(game, &headers)
}

pub fn write_pgn_with_headers(game: &Game, headers: &BTreeMap<String, String>) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut movetext_parts = Vec::<String>::with_capacity(game.record().len() + 1);
    for (ply, record) in game.record().iter().enumerate() {
        if ply % 2 == 0 {
            movetext_parts.push(format!("{}. {}", (ply / 2) + 1, record.notation));
        } else {
            movetext_parts.push(record.notation.clone());
        }
    }

    let result = headers
        .get("Result")
        .map(String::as_str)
        .unwrap_or_else(|| result_token(game.status()));
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

fn result_token(status: GameStatus) -> &'static str {
    match status {
        GameStatus::InProgress => "*",
        GameStatus::Checkmate {
            winner: Color::White,
        } => "1-0",
        GameStatus::Checkmate {
            winner: Color::Black,
        } => "0-1",
        GameStatus::Stalemate | GameStatus::Draw(_) => "1/2-1/2",
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
