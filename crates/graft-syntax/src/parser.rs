//! Tree-sitter parsing wrapper.
//!
//! This module wraps the raw Tree-sitter parser and lowers its concrete
//! syntax tree into the language-neutral [`SyntaxTree`] consumed by the
//! anchor resolver. Tree-sitter is error-tolerant, so a parse with syntax
//! errors still yields a tree; [`SyntaxTree::has_errors`] reports them.

use std::path::Path;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::lower::lower;
use crate::tree::SyntaxTree;

/// Tree-sitter parser wrapper for a specific language.
///
/// Each parser instance is configured for a single language. Create multiple
/// parsers if you need to parse multiple languages.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl Parser {
    /// Creates a new parser for the given language.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tree-sitter parser cannot be initialised
    /// with the language grammar.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.tree_sitter_language())
            .map_err(|e| SyntaxError::parser_init(language, e.to_string()))?;

        Ok(Self { inner, language })
    }

    /// Creates a parser for the language implied by `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnknownLanguage`] when the path has no
    /// extension and [`SyntaxError::UnsupportedExtension`] when the
    /// extension maps to no grammar.
    pub fn for_path(path: &Path) -> Result<Self, SyntaxError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| SyntaxError::unknown_language(path.to_path_buf()))?;
        let language = SupportedLanguage::from_extension(extension)
            .ok_or_else(|| SyntaxError::unsupported_extension(extension))?;
        Self::new(language)
    }

    /// Returns the language this parser is configured for.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Parses source code and lowers it into a [`SyntaxTree`].
    ///
    /// # Errors
    ///
    /// Returns an error if the parser fails to produce a syntax tree. This
    /// is rare and typically indicates a parser configuration issue.
    pub fn parse(&mut self, source: &str) -> Result<SyntaxTree, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse(self.language, "parsing failed"))?;

        Ok(lower(self.language, &tree, source))
    }
}
