pub mod geometry;
pub mod state;
pub mod types;
pub mod zobrist;

pub use geometry::{Variant, NUM_COLS};
pub use state::{State, UndoInfo};
pub use types::{Color, Move, Piece, PieceKind, Square};
