//! CLI error types.

use std::path::PathBuf;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("content unit not found: {0}")]
    EntryNotFound(String),

    #[error("no markdown files found under {}", .0.display())]
    IndexEmpty(PathBuf),
}
