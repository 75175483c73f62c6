//! Zobrist hashing for transposition-table lookups.
//!
//! Key tables are generated once per process from a fixed seed, so hashes
//! are stable within a run and across test runs. The hash is a pure function
//! of the cells, the side to move, and the en-passant target square.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::geometry::NUM_COLS;
use crate::board::state::State;
use crate::board::types::{Color, Piece};

const KEY_COLS: usize = NUM_COLS as usize;
// Tallest column has 11 cells.
const KEY_ROWS: usize = 11;
// 6 piece kinds, 2 colors.
const KEY_PIECES: usize = 12;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

struct ZobristTables {
    piece: [[[u64; KEY_PIECES]; KEY_ROWS]; KEY_COLS],
    side_to_move: u64,
    en_passant: [[u64; KEY_ROWS]; KEY_COLS],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece = [[[0u64; KEY_PIECES]; KEY_ROWS]; KEY_COLS];
    for col in &mut piece {
        for row in col {
            for key in row {
                *key = rng.gen();
            }
        }
    }

    let side_to_move = rng.gen();

    let mut en_passant = [[0u64; KEY_ROWS]; KEY_COLS];
    for col in &mut en_passant {
        for key in col {
            *key = rng.gen();
        }
    }

    ZobristTables {
        piece,
        side_to_move,
        en_passant,
    }
}

#[inline]
fn piece_index(piece: Piece) -> usize {
    piece.kind.index() * 2 + piece.color.index()
}

/// Key for a `(col, row, piece)` occupancy term.
#[inline]
pub fn piece_key(col: i32, row: i32, piece: Piece) -> u64 {
    tables().piece[col as usize][row as usize][piece_index(piece)]
}

/// Toggle key applied when White is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Key for the en-passant target square.
#[inline]
pub fn en_passant_key(col: i32, row: i32) -> u64 {
    tables().en_passant[col as usize][row as usize]
}

/// Full position hash. History-free: two states with the same cells, side
/// to move, and en-passant target always hash alike.
pub fn position_hash(state: &State) -> u64 {
    let mut hash = 0u64;
    for (col, column) in state.cells.iter().enumerate() {
        for (row, square) in column.iter().enumerate() {
            if let Some(piece) = square {
                hash ^= piece_key(col as i32, row as i32, *piece);
            }
        }
    }
    if state.side_to_move == Color::White {
        hash ^= side_to_move_key();
    }
    if let Some((col, row)) = state.en_passant_target() {
        hash ^= en_passant_key(col, row);
    }
    hash
}
