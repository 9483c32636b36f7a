use std::path::PathBuf;

use crate::types::MIN_PIECE_TYPES;

/// Errors that can occur inside the grid engine.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("board needs at least {MIN_PIECE_TYPES} piece types for a match-free fill, got {0}")]
    TooFewPieceTypes(usize),

    #[error("row {row} out of bounds for board height {height}")]
    RowOutOfBounds { row: usize, height: usize },
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}
