//! Move formatting for protocol output and tree labels.

use crate::board::geometry::square_name;
use crate::board::types::{Color, Move, PieceKind};

/// Compact `a1b2`-style rendering.
pub fn format_move_compact(mv: &Move) -> String {
    format!(
        "{}{}",
        square_name(mv.from_col, mv.from_row).to_lowercase(),
        square_name(mv.to_col, mv.to_row).to_lowercase()
    )
}

/// Long notation: `N A3 B4`, or `NxB A3 B4` when capturing.
pub fn format_move_long(mv: &Move, kind: PieceKind, captured: Option<PieceKind>) -> String {
    let from = square_name(mv.from_col, mv.from_row);
    let to = square_name(mv.to_col, mv.to_row);
    match captured {
        Some(victim) => format!("{}x{} {} {}", kind.letter(), victim.letter(), from, to),
        None => format!("{} {} {}", kind.letter(), from, to),
    }
}

/// En-passant notation: `PeP from to captured-square`. The captured pawn
/// sits one step behind the landing square for the capturing color.
pub fn format_move_ep(mv: &Move, color: Color) -> String {
    let from = square_name(mv.from_col, mv.from_row);
    let to = square_name(mv.to_col, mv.to_row);
    let captured_row = if color == Color::White {
        mv.to_row - 1
    } else {
        mv.to_row + 1
    };
    format!("PeP {} {} {}", from, to, square_name(mv.to_col, captured_row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_format_round_trips_through_the_parser() {
        let mv = Move::quiet(1, 1, 2, 3);
        let text = format_move_compact(&mv);
        assert_eq!(text, "b2c4");
        let parsed = crate::protocol::parse::parse_move(&text).expect("round trip should parse");
        assert!(parsed.same_squares(&mv));
    }

    #[test]
    fn long_format_matches_protocol_shape() {
        let mv = Move::quiet(0, 2, 1, 3);
        assert_eq!(format_move_long(&mv, PieceKind::Knight, None), "N A3 B4");
        assert_eq!(
            format_move_long(&mv, PieceKind::Knight, Some(PieceKind::Bishop)),
            "NxB A3 B4"
        );
    }

    #[test]
    fn en_passant_format_names_the_captured_square() {
        let mv = Move {
            capture: true,
            en_passant: true,
            ..Move::quiet(0, 4, 1, 5)
        };
        assert_eq!(format_move_ep(&mv, Color::White), "PeP A5 B6 B5");
        assert_eq!(format_move_ep(&mv, Color::Black), "PeP A5 B6 B7");
    }
}
