//! Error types for MAS document inspection.

use thiserror::Error;

/// Errors that can occur while loading or inspecting a MAS document.
#[derive(Error, Debug)]
pub enum MasError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON or a required field with the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A section needed by the report is absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A turn has fewer than two coordinates.
    #[error("turn {index} has {len} coordinates, expected at least 2")]
    InvalidTurn {
        /// Position of the turn in `turnsDescription`.
        index: usize,
        /// Number of coordinates found.
        len: usize,
    },
}

/// Result type for MAS operations.
pub type Result<T> = std::result::Result<T, MasError>;
