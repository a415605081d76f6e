//! Error types for parsing, anchor resolution, and patching.
//!
//! Every fallible operation in the `graft-syntax` crate reports a
//! [`SyntaxError`]. Contract violations by the caller (overlapping edits,
//! offsets outside the buffer) share the enum with parser failures so the
//! orchestrator can attach document context in one place.

use std::path::PathBuf;

use thiserror::Error;

use crate::language::SupportedLanguage;

/// Errors from syntactic analysis and patch operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser for a language.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInitError {
        /// The language that failed to initialise.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// The file extension is not supported for syntactic analysis.
    #[error("unsupported file extension: {extension}")]
    UnsupportedExtension {
        /// The extension that was not recognised.
        extension: String,
    },

    /// Failed to determine language from file path.
    #[error("could not determine language for path: {}", path.display())]
    UnknownLanguage {
        /// The path that could not be mapped to a language.
        path: PathBuf,
    },

    /// Failed to parse source code.
    #[error("failed to parse {language}: {message}")]
    ParseError {
        /// The language that failed to parse.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// A target that requires an existing node did not match anything.
    #[error("no anchor found for target {target}")]
    AnchorNotFound {
        /// Human-readable description of the target.
        target: String,
    },

    /// Two planned edits touch the same region of the buffer.
    #[error(
        "edits overlap: [{first_start}, {first_end}) conflicts with \
         [{second_start}, {second_end})"
    )]
    OverlappingEdits {
        /// Start of the earlier-declared edit.
        first_start: usize,
        /// End of the earlier-declared edit.
        first_end: usize,
        /// Start of the later-declared edit.
        second_start: usize,
        /// End of the later-declared edit.
        second_end: usize,
    },

    /// An edit points past the end of the buffer it is applied to.
    #[error("edit range [{start}, {end}) exceeds buffer length {len}")]
    EditOutOfBounds {
        /// Start offset of the edit.
        start: usize,
        /// End offset of the edit.
        end: usize,
        /// Length of the buffer.
        len: usize,
    },

    /// An edit boundary splits a UTF-8 character.
    #[error("edit offset {offset} is not on a UTF-8 character boundary")]
    NotCharBoundary {
        /// The misaligned offset.
        offset: usize,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParserInitError {
            language,
            message: message.into(),
        }
    }

    /// Creates an unsupported extension error.
    #[must_use]
    pub fn unsupported_extension(extension: impl Into<String>) -> Self {
        Self::UnsupportedExtension {
            extension: extension.into(),
        }
    }

    /// Creates an unknown language error.
    #[must_use]
    pub const fn unknown_language(path: PathBuf) -> Self {
        Self::UnknownLanguage { path }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParseError {
            language,
            message: message.into(),
        }
    }

    /// Creates an anchor-not-found error.
    #[must_use]
    pub fn anchor_not_found(target: impl Into<String>) -> Self {
        Self::AnchorNotFound {
            target: target.into(),
        }
    }

    /// Creates an overlapping-edits error from two half-open ranges.
    #[must_use]
    pub const fn overlapping(first: (usize, usize), second: (usize, usize)) -> Self {
        Self::OverlappingEdits {
            first_start: first.0,
            first_end: first.1,
            second_start: second.0,
            second_end: second.1,
        }
    }
}
