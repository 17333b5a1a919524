use std::io;
use std::path::{Path, PathBuf};

/// Error produced when stat or extended-attribute retrieval fails for a path.
///
/// The underlying OS error is carried unchanged; the path and the failing
/// operation are attached so callers can report which lookup went wrong.
#[derive(Debug, thiserror::Error)]
#[error("failed to {context} '{}': {source}", path.display())]
pub struct MetadataError {
    context: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl MetadataError {
    /// Creates a new [`MetadataError`] from the supplied context, path, and source error.
    pub(crate) fn new(context: &'static str, path: &Path, source: io::Error) -> Self {
        Self {
            context,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Builds an [`io::ErrorKind::InvalidData`] error for a value that does not fit its field.
    pub(crate) fn out_of_range(field: &'static str, path: &Path) -> Self {
        Self::new(
            "convert stat attributes",
            path,
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{field} does not fit the record field"),
            ),
        )
    }

    /// Returns the operation being performed when the error occurred.
    #[must_use]
    pub const fn context(&self) -> &'static str {
        self.context
    }

    /// Returns the path involved in the failing operation.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the underlying [`io::Error`] that triggered this failure.
    #[must_use]
    pub fn source_error(&self) -> &io::Error {
        &self.source
    }

    /// Shorthand for `self.source_error().kind()`.
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }

    /// Consumes the error and returns its constituent parts.
    #[must_use]
    pub fn into_parts(self) -> (&'static str, PathBuf, io::Error) {
        (self.context, self.path, self.source)
    }
}
