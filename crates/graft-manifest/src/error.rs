//! Error types for manifest handling.

use thiserror::Error;

/// Errors raised while reading, merging, or rendering a manifest.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ManifestError {
    /// The manifest text is not valid JSON.
    #[error("failed to parse manifest: {source}")]
    Parse {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The manifest is valid JSON but does not have the expected shape.
    #[error("malformed manifest: {message}")]
    Malformed {
        /// Description of the offending structure.
        message: String,
    },

    /// The manifest could not be serialised back to text.
    #[error("failed to render manifest: {source}")]
    Render {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl ManifestError {
    /// Creates a malformed-manifest error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}
