//! Geometry shared across the per-piece move generators.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
pub const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Step `from` by a (file, rank) delta, or `None` when it leaves the board.
#[inline]
pub fn offset_square(from: Square, file_delta: i8, rank_delta: i8) -> Option<Square> {
    let file = (from % 8) as i8 + file_delta;
    let rank = (from / 8) as i8 + rank_delta;

    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((rank * 8 + file) as Square)
    } else {
        None
    }
}

/// Ray-cast a sliding piece along `directions`, pushing quiet moves until a
/// blocker: an enemy blocker is included as a capture, a friendly one never.
pub fn push_slider_moves(
    position: &Position,
    from: Square,
    moved_piece: PieceKind,
    directions: &[(i8, i8)],
    out: &mut Vec<ChessMove>,
) {
    let side = position.side_to_move;

    for &(file_delta, rank_delta) in directions {
        let mut current = from;

        while let Some(to) = offset_square(current, file_delta, rank_delta) {
            match position.piece_at(to) {
                None => {
                    out.push(ChessMove {
                        from,
                        to,
                        moved_piece,
                        captured_piece: None,
                        promotion: None,
                        flags: 0,
                    });
                    current = to;
                }
                Some(blocker) => {
                    if blocker.color != side {
                        out.push(ChessMove {
                            from,
                            to,
                            moved_piece,
                            captured_piece: Some(blocker.kind),
                            promotion: None,
                            flags: FLAG_CAPTURE,
                        });
                    }
                    break;
                }
            }
        }
    }
}

/// Squares currently holding a piece of `color`, in board order.
#[inline]
pub fn squares_of(position: &Position, color: Color, kind: PieceKind) -> Vec<Square> {
    (0..64)
        .filter(|&sq| {
            matches!(
                position.piece_at(sq),
                Some(piece) if piece.color == color && piece.kind == kind
            )
        })
        .collect()
}
