//! Feed error types.

use std::path::PathBuf;

/// Errors that can occur when loading the event or station feeds.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed server returned an error status
    #[error("feed error {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body is not well-formed XML
    #[error("XML error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// Local feed file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
