use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which lookup table an id was expected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Question,
    Answer,
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdKind::Question => f.write_str("question"),
            IdKind::Answer => f.write_str("answer"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing required column '{column}' in {table}")]
    Schema { table: String, column: String },

    #[error("Unresolved {kind} id '{id}' at row {row_index}")]
    UnresolvedId { kind: IdKind, id: String, row_index: usize },

    #[error("Invalid value '{value}' for column '{column}' at row {row_index} in {table}")]
    InvalidValue { table: String, column: String, row_index: usize, value: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },

    #[error("Failed to read {}: {source}", .path.display())]
    Csv { path: PathBuf, #[source] source: csv::Error },

    #[error("Failed to serialize {}: {source}", .path.display())]
    Json { path: PathBuf, #[source] source: serde_json::Error },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
