//! Document storage behind the patch session.

use std::fs;
use std::io::{self, Write};

use camino::Utf8Path;
use tempfile::NamedTempFile;

/// Reads and writes whole documents.
pub(crate) trait SourceProvider {
    /// Returns the full text at `path`.
    ///
    /// A missing document fails with [`io::ErrorKind::NotFound`].
    fn read(&self, path: &Utf8Path) -> io::Result<String>;

    /// Replaces the document at `path` with `text`.
    fn write(&self, path: &Utf8Path, text: &str) -> io::Result<()>;
}

/// Local filesystem provider.
///
/// Writes go to a temporary file in the destination directory which is then
/// renamed over the target, so readers never observe a partial document.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct FsSourceProvider;

impl SourceProvider for FsSourceProvider {
    fn read(&self, path: &Utf8Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Utf8Path, text: &str) -> io::Result<()> {
        let directory = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(directory)?;
        staged.write_all(text.as_bytes())?;
        if let Ok(metadata) = fs::metadata(path) {
            staged.as_file().set_permissions(metadata.permissions())?;
        }
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|error| error.error)?;
        Ok(())
    }
}
