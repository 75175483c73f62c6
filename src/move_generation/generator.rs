//! Pseudo-legal move enumeration for the side to move.
//!
//! Moves are pseudo-legal by design: nothing filters for exposed kings, and
//! the game ends by actual king capture in the search. Captures, en passant,
//! and back-rank promotion are all flagged here so make_move and the move
//! ordering can trust the flags.

use crate::board::geometry::{self, Variant, NUM_COLS};
use crate::board::state::State;
use crate::board::types::{Color, Move, PieceKind};
use crate::move_generation::directions::{
    pawn_captures, Dir, DIAGONAL, KING_STEPS, KNIGHT_JUMPS, ORTHOGONAL,
};

/// Enumerate pseudo-legal moves for `state.side_to_move`.
pub fn generate(state: &State) -> Vec<Move> {
    let mut moves = Vec::new();
    let mover = state.side_to_move;

    for col in 0..NUM_COLS {
        for row in 0..geometry::column_height(state.variant, col) {
            let Some(piece) = state.at(col, row) else {
                continue;
            };
            if piece.color != mover {
                continue;
            }
            match piece.kind {
                PieceKind::Pawn => push_pawn_moves(&mut moves, state, col, row, mover),
                PieceKind::Rook => push_slider_moves(&mut moves, state, col, row, mover, &ORTHOGONAL),
                PieceKind::Knight => {
                    push_leaper_moves(&mut moves, state, col, row, mover, &KNIGHT_JUMPS)
                }
                PieceKind::Bishop => push_slider_moves(&mut moves, state, col, row, mover, &DIAGONAL),
                PieceKind::King => push_leaper_moves(&mut moves, state, col, row, mover, &KING_STEPS),
                PieceKind::Queen => {
                    push_slider_moves(&mut moves, state, col, row, mover, &ORTHOGONAL);
                    push_slider_moves(&mut moves, state, col, row, mover, &DIAGONAL);
                }
            }
        }
    }

    // Flag pawn moves landing on the last rank.
    for mv in &mut moves {
        if let Some(piece) = state.at(mv.from_col, mv.from_row) {
            if piece.kind == PieceKind::Pawn
                && is_promotion_square(mv.to_col, mv.to_row, piece.color)
            {
                mv.promotion = true;
            }
        }
    }

    moves
}

fn push_leaper_moves(
    out: &mut Vec<Move>,
    state: &State,
    col: i32,
    row: i32,
    mover: Color,
    dirs: &[Dir],
) {
    let logical = geometry::logical_row(col, row);
    for d in dirs {
        let to_col = col + d.dc;
        let to_row = geometry::storage_row(to_col, logical + d.dr);
        if !state.on_board(to_col, to_row) {
            continue;
        }
        match state.at(to_col, to_row) {
            None => out.push(Move::quiet(col, row, to_col, to_row)),
            Some(target) if target.color != mover => out.push(Move {
                capture: true,
                ..Move::quiet(col, row, to_col, to_row)
            }),
            Some(_) => {}
        }
    }
}

fn push_slider_moves(
    out: &mut Vec<Move>,
    state: &State,
    col: i32,
    row: i32,
    mover: Color,
    dirs: &[Dir],
) {
    let start_logical = geometry::logical_row(col, row);
    for d in dirs {
        let mut to_col = col;
        let mut logical = start_logical;
        loop {
            to_col += d.dc;
            logical += d.dr;
            let to_row = geometry::storage_row(to_col, logical);
            if !state.on_board(to_col, to_row) {
                break;
            }
            match state.at(to_col, to_row) {
                None => out.push(Move::quiet(col, row, to_col, to_row)),
                Some(target) => {
                    if target.color != mover {
                        out.push(Move {
                            capture: true,
                            ..Move::quiet(col, row, to_col, to_row)
                        });
                    }
                    break;
                }
            }
        }
    }
}

fn push_pawn_moves(out: &mut Vec<Move>, state: &State, col: i32, row: i32, mover: Color) {
    let logical = geometry::logical_row(col, row);
    let ep_target = state.en_passant_target();

    for d in pawn_captures(mover) {
        let to_col = col + d.dc;
        let to_row = geometry::storage_row(to_col, logical + d.dr);
        if !state.on_board(to_col, to_row) {
            continue;
        }
        if ep_target == Some((to_col, to_row)) {
            out.push(Move {
                capture: true,
                en_passant: true,
                ..Move::quiet(col, row, to_col, to_row)
            });
            continue;
        }
        if let Some(target) = state.at(to_col, to_row) {
            if target.color != mover {
                out.push(Move {
                    capture: true,
                    ..Move::quiet(col, row, to_col, to_row)
                });
            }
        }
    }

    let forward = if mover == Color::White {
        logical + 1
    } else {
        logical - 1
    };
    let forward_row = geometry::storage_row(col, forward);
    if !state.on_board(col, forward_row) || state.at(col, forward_row).is_some() {
        return;
    }
    out.push(Move::quiet(col, row, col, forward_row));

    if !is_pawn_start(state.variant, mover, col, row) {
        return;
    }
    let double = if mover == Color::White {
        logical + 2
    } else {
        logical - 2
    };
    let double_row = geometry::storage_row(col, double);
    if state.on_board(col, double_row) && state.at(col, double_row).is_none() {
        out.push(Move::quiet(col, row, col, double_row));
    }
}

const HEXOFEN_WHITE_PAWN_ROWS: [i32; 11] = [0, 0, 1, 1, 2, 2, 2, 1, 1, 0, 0];
const HEXOFEN_BLACK_PAWN_ROWS: [i32; 11] = [5, 6, 6, 7, 7, 8, 7, 7, 6, 6, 5];

/// Is `(col, storage_row)` a double-step-eligible pawn square for this
/// variant and color?
pub fn is_pawn_start(variant: Variant, color: Color, col: i32, storage_row: i32) -> bool {
    match (variant, color) {
        (Variant::Glinski, Color::White) => {
            if col < 6 {
                col - 1 == storage_row
            } else {
                storage_row + col == 9
            }
        }
        (Variant::Glinski, Color::Black) => storage_row == 6,
        (Variant::McCooey, Color::White) => {
            if col < 6 {
                col - 2 == storage_row
            } else {
                storage_row + col == 8
            }
        }
        (Variant::McCooey, Color::Black) => storage_row == 7,
        (Variant::Hexofen, Color::White) => {
            (0..NUM_COLS).contains(&col) && HEXOFEN_WHITE_PAWN_ROWS[col as usize] == storage_row
        }
        (Variant::Hexofen, Color::Black) => {
            (0..NUM_COLS).contains(&col) && HEXOFEN_BLACK_PAWN_ROWS[col as usize] == storage_row
        }
    }
}

/// Last-rank test for pawn promotion. White's back rank slants with the
/// hexagon; Black's is storage row zero everywhere.
fn is_promotion_square(to_col: i32, to_row: i32, color: Color) -> bool {
    match color {
        Color::White => {
            if to_col <= 5 {
                to_row - to_col == 5
            } else {
                to_col + to_row == 15
            }
        }
        Color::Black => to_row == 0,
    }
}
