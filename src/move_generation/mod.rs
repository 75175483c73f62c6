pub mod directions;
pub mod generator;
pub mod ordering;

pub use generator::{generate, is_pawn_start};
pub use ordering::order_moves;
