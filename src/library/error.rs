//! Errors raised while reading content.
//!
//! None of these reach page-layer callers: the reader logs them and degrades
//! to an absent or empty result.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or parsing a single document, or the store as a whole
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("No document for key: {key}")]
    NotFound { key: String },

    #[error("Malformed metadata in {key}: {reason}")]
    MalformedMetadata { key: String, reason: String },

    #[error("Content store unavailable at {}: {source}", .path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    pub(crate) fn malformed(key: &str, reason: impl Into<String>) -> Self {
        Self::MalformedMetadata {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the whole store, not just one document, is affected
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }
}
