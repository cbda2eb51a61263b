//! Error types for corpus loading, rendering and selection.

use std::path::PathBuf;

use thiserror::Error;

/// A single CSV row could not be turned into a puzzle record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not an integer: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("puzzle {0} has no moves")]
    EmptyMoves(String),
}

/// Failure while reading or writing corpus files. Always fatal for the
/// engine being built.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {source_name}: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("{source_name}, row {row}: {source}")]
    Row {
        source_name: String,
        row: usize,
        #[source]
        source: RecordError,
    },

    #[error("{source_name}: {source}")]
    Render {
        source_name: String,
        #[source]
        source: RenderError,
    },
}

/// A record could not be rendered into a board position. Source data is
/// curated offline, so this points at a corrupt record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("puzzle {puzzle_id}: illegal move {uci} ({reason})")]
    IllegalMove {
        puzzle_id: String,
        uci: String,
        reason: String,
    },
}

/// Request-time failure of a pack selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Unknown puzzle pack: {0}")]
    UnknownPack(String),

    #[error(transparent)]
    Render(#[from] RenderError),
}
