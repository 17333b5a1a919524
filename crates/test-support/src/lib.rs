//! Shared fixtures for the xstat workspace tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory populated with named files.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Creates an empty fixture directory.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create fixture directory"),
        }
    }

    /// Returns the fixture root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `name` under the fixture root and returns its path.
    pub fn file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    /// Like [`Fixture::file`] but also sets the given extended attributes when
    /// the filesystem supports them. Returns `None` when it does not.
    pub fn file_with_xattrs(
        &self,
        name: &str,
        contents: &[u8],
        attrs: &[(&str, &str)],
    ) -> Option<PathBuf> {
        let path = self.file(name, contents);
        if !xattrs_supported(&path) {
            return None;
        }
        for (key, value) in attrs {
            set_xattr(&path, key, value.as_bytes());
        }
        Some(path)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
const SUPPORT_MARKER: &str = "user.xstat_support";

/// Checks whether user extended attributes can be set on and removed from `path`.
///
/// The marker attribute is removed again; a filesystem that accepts it but
/// refuses the removal is reported as unsupported.
#[cfg(unix)]
pub fn xattrs_supported(path: &Path) -> bool {
    xattr::set(path, SUPPORT_MARKER, b"1").is_ok() && xattr::remove(path, SUPPORT_MARKER).is_ok()
}

/// Extended attributes are never available off Unix.
#[cfg(not(unix))]
pub fn xattrs_supported(_path: &Path) -> bool {
    false
}

#[cfg(unix)]
fn set_xattr(path: &Path, name: &str, value: &[u8]) {
    xattr::set(path, name, value).expect("set fixture xattr");
}

#[cfg(not(unix))]
fn set_xattr(_path: &Path, _name: &str, _value: &[u8]) {}
