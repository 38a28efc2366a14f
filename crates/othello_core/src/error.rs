use thiserror::Error;

use crate::types::StoneColor;

/// Construction-time configuration errors. Nothing that happens during normal
/// play produces an error; illegal input is dropped as a regular no-op.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("board size {size} is unsupported: the center seed needs an even size of at least 4")]
    InvalidBoardSize { size: usize },

    #[error("player seated as {expected:?} was constructed for {got:?}")]
    PlayerColorMismatch {
        expected: StoneColor,
        got: StoneColor,
    },

    #[error("active color must be Black or White")]
    InvalidActiveColor,
}
