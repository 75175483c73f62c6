//! Parsing for the line-oriented stdin protocol.
//!
//! Accepted move notations, tried in this order:
//! - `PeP a5 b6 b5`: en passant (pawn from, pawn to, captured pawn square).
//! - `N A3 B4` / `NxB A3 B4`: piece letter (optionally `x` victim), from, to.
//! - `a1b2`: compact from-to.
//!
//! A board dump is twelve lines: one per column (uppercase = White piece,
//! lowercase = Black, `.` or space = empty) and a final `white`/`black`.

use crate::board::geometry::NUM_COLS;
use crate::board::state::State;
use crate::board::types::{Color, Move, Piece, PieceKind};
use crate::errors::{ParseError, ParseResult};

/// Number of lines in a board dump: eleven columns plus the side to move.
pub const BOARD_DUMP_LINES: usize = 12;

/// Parse a square token like `a1` or `K11` into `(col, storage_row)`.
pub fn parse_square(token: &str) -> ParseResult<(i32, i32)> {
    let invalid = || ParseError::InvalidSquare(token.to_string());
    let mut chars = token.chars();
    let letter = chars.next().ok_or_else(invalid)?;
    let col = letter.to_ascii_lowercase() as i32 - 'a' as i32;
    if !(0..NUM_COLS).contains(&col) {
        return Err(invalid());
    }

    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let row: i32 = digits.parse().map_err(|_| invalid())?;
    if row < 1 {
        return Err(invalid());
    }
    Ok((col, row - 1))
}

/// Parse one move line in any accepted notation.
pub fn parse_move(line: &str) -> ParseResult<Move> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    // PeP from to captured-square.
    if tokens.len() >= 4 && tokens[0].eq_ignore_ascii_case("pep") {
        let (from_col, from_row) = parse_square(tokens[1])?;
        let (to_col, to_row) = parse_square(tokens[2])?;
        return Ok(Move {
            capture: true,
            en_passant: true,
            ..Move::quiet(from_col, from_row, to_col, to_row)
        });
    }

    // Piece-letter forms: the piece and victim letters are informational,
    // only the squares matter.
    if tokens.len() >= 3 {
        if let (Ok(from), Ok(to)) = (parse_square(tokens[1]), parse_square(tokens[2])) {
            return Ok(Move::quiet(from.0, from.1, to.0, to.1));
        }
    }

    parse_compact_move(line).ok_or_else(|| ParseError::InvalidMove(line.to_string()))
}

fn parse_compact_move(line: &str) -> Option<Move> {
    let bytes = line.as_bytes();
    if bytes.len() < 4 {
        return None;
    }

    let mut pos = 0;
    let (from_col, from_row) = scan_square(bytes, &mut pos)?;
    let (to_col, to_row) = scan_square(bytes, &mut pos)?;
    Some(Move::quiet(from_col, from_row, to_col, to_row))
}

fn scan_square(bytes: &[u8], pos: &mut usize) -> Option<(i32, i32)> {
    let letter = *bytes.get(*pos)? as char;
    let col = letter.to_ascii_lowercase() as i32 - 'a' as i32;
    if !(0..NUM_COLS).contains(&col) {
        return None;
    }
    *pos += 1;

    let mut row = 0i32;
    let mut digits = 0;
    while let Some(b) = bytes.get(*pos) {
        if !b.is_ascii_digit() {
            break;
        }
        row = row * 10 + i32::from(b - b'0');
        digits += 1;
        *pos += 1;
    }
    if digits == 0 || row < 1 {
        return None;
    }
    Some((col, row - 1))
}

/// Parse a twelve-line board dump into a position.
///
/// The dump carries no variant or en-passant information; the board shape is
/// the common hex profile and `prev_move` starts clear.
pub fn parse_board(lines: &[String]) -> ParseResult<State> {
    if lines.len() < BOARD_DUMP_LINES {
        return Err(ParseError::InvalidBoard(format!(
            "expected {BOARD_DUMP_LINES} lines, got {}",
            lines.len()
        )));
    }

    let mut state = State::empty(crate::board::geometry::Variant::Glinski);
    for col in 0..NUM_COLS {
        let line = &lines[col as usize];
        let mut chars = line.chars();
        for row in 0..state.cells[col as usize].len() {
            let ch = chars.next().unwrap_or(' ');
            state.cells[col as usize][row] = match ch {
                ' ' | '.' => None,
                _ => {
                    let kind = PieceKind::from_letter(ch).ok_or_else(|| {
                        ParseError::InvalidBoard(format!("unknown piece letter '{ch}'"))
                    })?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    Some(Piece::new(kind, color))
                }
            };
        }
    }

    state.side_to_move = match lines[11].trim_end_matches('\r') {
        "white" => Color::White,
        "black" => Color::Black,
        other => {
            return Err(ParseError::InvalidBoard(format!(
                "side to move must be 'white' or 'black', got '{other}'"
            )))
        }
    };
    state.prev_move = None;
    Ok(state)
}
