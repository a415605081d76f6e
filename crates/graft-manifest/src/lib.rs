//! Dependency manifest merging for graft.
//!
//! Two layers live here:
//!
//! - [`merge`], a pure function over sorted dependency maps with
//!   existing-wins semantics
//! - [`ManifestDocument`], a `package.json` wrapper that reads and renders
//!   the whole document while keeping every unrelated key where it was
//!
//! Merging the same entries twice yields the same map as merging them once,
//! so repeated runs never churn the manifest.

mod document;
mod error;
mod merge;

pub use document::{DEPENDENCIES_KEY, ManifestDocument};
pub use error::ManifestError;
pub use merge::{ManifestEntry, merge};

#[cfg(test)]
mod tests;
