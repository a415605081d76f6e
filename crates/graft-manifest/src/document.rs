//! Whole-document `package.json` handling.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::ManifestError;
use crate::merge::{ManifestEntry, merge};

/// Top-level key holding runtime dependencies.
pub const DEPENDENCIES_KEY: &str = "dependencies";

/// A parsed JSON manifest.
///
/// Top-level keys keep their original order across a parse and render
/// cycle; only the dependency section is rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    root: Map<String, Value>,
    trailing_newline: bool,
}

impl ManifestDocument {
    /// Parses manifest text.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Parse`] for invalid JSON and
    /// [`ManifestError::Malformed`] when the top level is not an object.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let value: Value =
            serde_json::from_str(text).map_err(|source| ManifestError::Parse { source })?;
        let Value::Object(root) = value else {
            return Err(ManifestError::malformed("top level is not an object"));
        };
        Ok(Self {
            root,
            trailing_newline: text.ends_with('\n'),
        })
    }

    /// Returns the package name, when declared.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.root.get("name").and_then(Value::as_str)
    }

    /// Returns the dependency section as a sorted map.
    ///
    /// A missing section is an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Malformed`] when the section is not an
    /// object or a version is not a string.
    pub fn dependencies(&self) -> Result<BTreeMap<String, String>, ManifestError> {
        let Some(section) = self.root.get(DEPENDENCIES_KEY) else {
            return Ok(BTreeMap::new());
        };
        let Value::Object(entries) = section else {
            return Err(ManifestError::malformed(format!(
                "`{DEPENDENCIES_KEY}` is not an object"
            )));
        };
        entries
            .iter()
            .map(|(name, version)| match version {
                Value::String(version) => Ok((name.clone(), version.clone())),
                _ => Err(ManifestError::malformed(format!(
                    "version of `{name}` is not a string"
                ))),
            })
            .collect()
    }

    /// Merges `entries` into the dependency section.
    ///
    /// The section is replaced by the merged map, sorted by key, and is
    /// created at the end of the document when absent. Returns the names
    /// that were added; an empty result means the section only changed
    /// order, if at all.
    ///
    /// # Errors
    ///
    /// Propagates [`ManifestDocument::dependencies`] failures.
    pub fn merge_dependencies(
        &mut self,
        entries: &[ManifestEntry],
    ) -> Result<Vec<String>, ManifestError> {
        let existing = self.dependencies()?;
        let merged = merge(&existing, entries);
        let added = merged
            .keys()
            .filter(|name| !existing.contains_key(*name))
            .cloned()
            .collect();

        let section: Map<String, Value> = merged
            .into_iter()
            .map(|(name, version)| (name, Value::String(version)))
            .collect();
        self.root
            .insert(DEPENDENCIES_KEY.to_owned(), Value::Object(section));
        Ok(added)
    }

    /// Renders the document as two-space indented JSON.
    ///
    /// A trailing newline is written when the parsed text had one.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Render`] when serialisation fails.
    pub fn render(&self) -> Result<String, ManifestError> {
        let mut text = serde_json::to_string_pretty(&self.root)
            .map_err(|source| ManifestError::Render { source })?;
        if self.trailing_newline {
            text.push('\n');
        }
        Ok(text)
    }
}
