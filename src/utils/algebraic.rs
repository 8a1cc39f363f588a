//! Square conversions for long algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square indices, reused by the FEN, PGN, and session components.

use crate::game_state::chess_types::Square;

/// Convert an algebraic coordinate (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to an algebraic coordinate.
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if square > 63 {
        return Err(format!("Square index out of bounds: {square}"));
    }

    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);

    Ok(format!("{file_char}{rank_char}"))
}

/// Infallible coordinate label for diagnostics; out-of-range indices are
/// rendered as their raw value.
#[inline]
pub fn square_label(square: Square) -> String {
    square_to_algebraic(square).unwrap_or_else(|_| format!("#{square}"))
}
