//! Errors that abort a patch session.

use std::io;

use camino::Utf8PathBuf;
use graft_manifest::ManifestError;
use graft_syntax::SyntaxError;
use thiserror::Error;

/// Fatal session failures.
///
/// Documents committed before the failure stay written.
#[derive(Debug, Error)]
pub(crate) enum SessionError {
    /// The workspace layout or a required document is missing or invalid.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Reading or writing a document failed.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    /// Parsing, planning, or applying edits failed.
    #[error("{step} failed on {path}: {source}")]
    Syntax {
        path: Utf8PathBuf,
        step: String,
        #[source]
        source: SyntaxError,
    },

    /// The package manifest could not be merged.
    #[error("failed to update manifest {path}: {source}")]
    Manifest {
        path: Utf8PathBuf,
        #[source]
        source: ManifestError,
    },
}

impl SessionError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) const fn io(operation: &'static str, path: Utf8PathBuf, source: io::Error) -> Self {
        Self::Io {
            operation,
            path,
            source,
        }
    }

    pub(crate) fn syntax(path: Utf8PathBuf, step: impl Into<String>, source: SyntaxError) -> Self {
        Self::Syntax {
            path,
            step: step.into(),
            source,
        }
    }

    pub(crate) const fn manifest(path: Utf8PathBuf, source: ManifestError) -> Self {
        Self::Manifest { path, source }
    }
}
