//! Existing-wins merge of dependency entries.

use std::collections::BTreeMap;

/// A dependency to add to a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestEntry {
    name: String,
    version: String,
}

impl ManifestEntry {
    /// Creates an entry for package `name` at `version`.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Package name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version requirement.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Merges `entries` into `existing`.
///
/// Names already present keep their version, even when it is empty. New
/// names are inserted; when `entries` names a package twice, the first
/// occurrence wins. The result is ordered by key code point, so a
/// rendered map is fully re-sorted on every call.
#[must_use]
pub fn merge(
    existing: &BTreeMap<String, String>,
    entries: &[ManifestEntry],
) -> BTreeMap<String, String> {
    let mut merged = existing.clone();
    for entry in entries {
        merged
            .entry(entry.name.clone())
            .or_insert_with(|| entry.version.clone());
    }
    merged
}
