//! Report error types.

use std::path::PathBuf;

/// Errors that can occur when rendering or writing the report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Template rendering failed
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Report file could not be written
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
