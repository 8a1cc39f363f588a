//! Position-to-FEN serializer, the inverse of the FEN parser.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(position: &Position) -> String {
    format!(
        "{} {} {} {} {} {}",
        generate_board_field(position),
        match position.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        },
        generate_castling_field(position.castling_rights),
        generate_en_passant_field(position.en_passant_square),
        position.halfmove_clock,
        position.fullmove_number
    )
}

/// The first four FEN fields only: board, side, castling, en passant.
///
/// These are exactly the fields that identify a position for threefold
/// repetition; the two counters are deliberately excluded.
pub fn generate_repetition_fields(position: &Position) -> String {
    format!(
        "{} {} {} {}",
        generate_board_field(position),
        match position.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        },
        generate_castling_field(position.castling_rights),
        generate_en_passant_field(position.en_passant_square),
    )
}

fn generate_board_field(position: &Position) -> String {
    let mut out = String::new();

    for rank in (0..8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8 {
            let sq = (rank * 8 + file) as Square;
            if let Some(piece) = position.piece_at(sq) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece_to_fen_char(piece));
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn piece_to_fen_char(piece: Piece) -> char {
    let base = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match piece.color {
        Color::White => base.to_ascii_uppercase(),
        Color::Black => base,
    }
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    if (rights & CASTLE_WHITE_KINGSIDE) != 0 {
        out.push('K');
    }
    if (rights & CASTLE_WHITE_QUEENSIDE) != 0 {
        out.push('Q');
    }
    if (rights & CASTLE_BLACK_KINGSIDE) != 0 {
        out.push('k');
    }
    if (rights & CASTLE_BLACK_QUEENSIDE) != 0 {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    let Some(square) = square else {
        return "-".to_owned();
    };

    square_to_algebraic(square).unwrap_or_else(|_| "-".to_owned())
}

#[cfg(test)]
mod tests {
    use super::{generate_fen, generate_repetition_fields};
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn round_trip_starting_position_fen() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        let generated = generate_fen(&parsed);

        assert_eq!(generated, STARTING_POSITION_FEN);

        let reparsed = parse_fen(&generated).expect("generated FEN should parse");
        assert_eq!(reparsed, parsed);
    }

    #[test]
    fn round_trip_custom_position_fen() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6";
        let parsed = parse_fen(fen).expect("custom FEN should parse");

        assert_eq!(generate_fen(&parsed), fen);
    }

    #[test]
    fn repetition_fields_exclude_move_counters() {
        let a = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 37 52").expect("FEN should parse");

        assert_ne!(generate_fen(&a), generate_fen(&b));
        assert_eq!(generate_repetition_fields(&a), generate_repetition_fields(&b));
    }
}
