//! Long algebraic coordinate notation for moves ("e2e4", "a7a8q").
//!
//! This is the notation the game record stores and the session facade
//! reports; it needs no disambiguation logic and round-trips cheaply.

use crate::game_state::chess_types::{ChessMove, PieceKind, Square};
use crate::utils::algebraic::{algebraic_to_square, square_label};

/// Render a source/destination pair (plus optional promotion) as long
/// algebraic text.
pub fn coords_to_long_algebraic(
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_label(from));
    out.push_str(&square_label(to));
    if let Some(promo) = promotion {
        out.push(promotion_to_char(promo));
    }
    out
}

#[inline]
pub fn move_to_long_algebraic(mv: &ChessMove) -> String {
    coords_to_long_algebraic(mv.from, mv.to, mv.promotion)
}

/// Parse long algebraic text into the `(from, to, promotion)` triple the
/// state machine matches moves by.
pub fn parse_long_algebraic(
    text: &str,
) -> Result<(Square, Square, Option<PieceKind>), String> {
    if text.len() != 4 && text.len() != 5 {
        return Err(format!("Invalid long algebraic move: {text}"));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = if text.len() == 5 {
        Some(char_to_promotion(text.as_bytes()[4] as char)?)
    } else {
        None
    };

    Ok((from, to, promotion))
}

fn promotion_to_char(kind: PieceKind) -> char {
    match kind {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        // Pawn/king promotions cannot be generated; queen covers the rest.
        _ => 'q',
    }
}

fn char_to_promotion(ch: char) -> Result<PieceKind, String> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(format!("Invalid promotion piece character: {ch}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{coords_to_long_algebraic, parse_long_algebraic};
    use crate::game_state::chess_types::PieceKind;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn round_trip_plain_and_promotion_moves() {
        let e2 = algebraic_to_square("e2").expect("e2 should parse");
        let e4 = algebraic_to_square("e4").expect("e4 should parse");
        assert_eq!(coords_to_long_algebraic(e2, e4, None), "e2e4");
        assert_eq!(
            parse_long_algebraic("e2e4").expect("move should parse"),
            (e2, e4, None)
        );

        let a7 = algebraic_to_square("a7").expect("a7 should parse");
        let a8 = algebraic_to_square("a8").expect("a8 should parse");
        assert_eq!(
            coords_to_long_algebraic(a7, a8, Some(PieceKind::Queen)),
            "a7a8q"
        );
        assert_eq!(
            parse_long_algebraic("a7a8n").expect("move should parse"),
            (a7, a8, Some(PieceKind::Knight))
        );
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(parse_long_algebraic("e2").is_err());
        assert!(parse_long_algebraic("e2e9").is_err());
        assert!(parse_long_algebraic("a7a8x").is_err());
        assert!(parse_long_algebraic("a7a8qq").is_err());
    }
}
