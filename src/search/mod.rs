pub mod alpha_beta;
pub mod board_scoring;
pub mod node;
pub mod transposition_table;

pub use alpha_beta::{iterative_deepen, minimax, minimax_node, SearchContext, BLACK_WINS, WHITE_WINS};
pub use board_scoring::{piece_value, BoardScorer, MaterialScorer};
pub use node::Node;
pub use transposition_table::{TableEntry, TranspositionTable};
