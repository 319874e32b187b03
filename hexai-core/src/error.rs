//! Error types for the core engine

use thiserror::Error;

/// Errors raised by board operations and configuration parsing
#[derive(Debug, Error)]
pub enum HexError {
    #[error("board size must be at least 2, got {0}")]
    InvalidSize(usize),

    #[error("cell ({row}, {col}) is outside the {size}x{size} board")]
    OutOfRange { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("the game is already over")]
    GameOver,

    #[error("no move to undo")]
    EmptyHistory,

    #[error("unknown {kind}: {name}")]
    Unknown { kind: &'static str, name: String },

    #[error("search depth must be at least 1 (use no depth to search to the end)")]
    ZeroDepth,

    #[error("invalid move '{0}', expected \"row,col\"")]
    InvalidMove(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
