//! Error types for Versefeed.
//!
//! Library crates use [`VersefeedError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Per-facet fetch failures are not represented here: they are expected,
//! frequent events carried as values (`FacetFailure` in `versefeed-sources`)
//! and contained at the aggregation boundary. Only caller mistakes and fatal
//! configuration conditions surface as errors.

use std::path::PathBuf;

/// Top-level error type for all Versefeed operations.
#[derive(Debug, thiserror::Error)]
pub enum VersefeedError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Malformed caller input (zero universe, oversized batch, bad selector).
    /// Surfaced before any network activity occurs.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Fatal upstream condition that prevents issuing any fetch at all,
    /// e.g. an unusable base URL or HTTP client build failure. Not retried.
    #[error("upstream unavailable: {0}")]
    Upstream(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, VersefeedError>;

impl VersefeedError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an invalid-argument error from any displayable message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
