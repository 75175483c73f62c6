//! Error types for the stdin protocol front-end.
//!
//! Every error here is locally recovered by the session loop; none of them
//! terminates the program once a game has been set up.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Square token did not name an on-range column/row (e.g. `l1`, `a0`).
    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    /// Line matched none of the accepted move notations.
    #[error("invalid move '{0}'")]
    InvalidMove(String),

    /// Twelve-line board dump could not be interpreted.
    #[error("invalid board dump: {0}")]
    InvalidBoard(String),
}

pub type ParseResult<T> = Result<T, ParseError>;
