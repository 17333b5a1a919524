//! Populating records from the filesystem.
//!
//! Stat data comes from `std::fs` (`lstat(2)` by default), extended attributes
//! from the platform's xattr interface. Failures are reported as
//! [`MetadataError`] with the offending path attached and are never retried.

use std::fs;
use std::path::Path;

use filetime::FileTime;

use crate::debug_collect::trace_stat;
use crate::error::MetadataError;
use crate::options::CollectOptions;
use crate::record::{Xattrs, Xstat};
use crate::xattr::read_xattrs;

impl Xstat {
    /// Collects the record for `path` without following a trailing symlink.
    ///
    /// When `include_xattrs` is set the entry's extended attributes are read as
    /// well.
    pub fn from_path(path: impl AsRef<Path>, include_xattrs: bool) -> Result<Self, MetadataError> {
        Self::from_path_with(path, &CollectOptions::new().xattrs(include_xattrs))
    }

    /// Collects the record for `path` as configured by `options`.
    pub fn from_path_with(
        path: impl AsRef<Path>,
        options: &CollectOptions,
    ) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let metadata = if options.follows_symlinks() {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        }
        .map_err(|error| MetadataError::new("stat", path, error))?;

        let xattr = if options.reads_xattrs() {
            Some(read_xattrs(path, options.follows_symlinks())?)
        } else {
            None
        };

        let record = Self::from_metadata(path, &metadata, xattr)?;
        trace_stat(path, record.mode, record.size, options.follows_symlinks());
        Ok(record)
    }

    /// Builds a record from metadata the caller already holds.
    ///
    /// The record is named after `path`. A missing attribute map leaves the
    /// record without extended attributes.
    pub fn from_metadata(
        path: impl AsRef<Path>,
        metadata: &fs::Metadata,
        xattr: Option<Xattrs>,
    ) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let mut record = Self::new(path.to_string_lossy().into_owned());
        fill_stat(&mut record, path, metadata)?;
        record.xattr = xattr.unwrap_or_default();
        Ok(record)
    }
}

#[cfg(unix)]
fn fill_stat(record: &mut Xstat, path: &Path, metadata: &fs::Metadata) -> Result<(), MetadataError> {
    use std::os::unix::fs::MetadataExt;

    record.size =
        i64::try_from(metadata.size()).map_err(|_| MetadataError::out_of_range("size", path))?;
    record.uid = metadata.uid();
    record.gid = metadata.gid();
    record.mode = metadata.mode();
    record.nlink = metadata.nlink();
    record.ino = metadata.ino();
    record.mtime = timespec(metadata.mtime(), metadata.mtime_nsec(), "mtime", path)?;
    record.atime = timespec(metadata.atime(), metadata.atime_nsec(), "atime", path)?;
    record.ctime = timespec(metadata.ctime(), metadata.ctime_nsec(), "ctime", path)?;
    Ok(())
}

#[cfg(unix)]
fn timespec(
    seconds: i64,
    nanos: i64,
    field: &'static str,
    path: &Path,
) -> Result<FileTime, MetadataError> {
    let nanos = u32::try_from(nanos).map_err(|_| MetadataError::out_of_range(field, path))?;
    Ok(FileTime::from_unix_time(seconds, nanos))
}

#[cfg(not(unix))]
fn fill_stat(record: &mut Xstat, path: &Path, metadata: &fs::Metadata) -> Result<(), MetadataError> {
    use crate::mode::{S_IFDIR, S_IFLNK, S_IFREG};

    record.size =
        i64::try_from(metadata.len()).map_err(|_| MetadataError::out_of_range("size", path))?;

    let file_type = metadata.file_type();
    let type_bits = if file_type.is_dir() {
        S_IFDIR
    } else if file_type.is_symlink() {
        S_IFLNK
    } else {
        S_IFREG
    };
    let mut perm = if metadata.permissions().readonly() { 0o444 } else { 0o666 };
    if file_type.is_dir() {
        perm |= 0o111;
    }
    record.mode = type_bits | perm;
    record.nlink = 1;
    record.mtime = FileTime::from_last_modification_time(metadata);
    record.atime = FileTime::from_last_access_time(metadata);
    record.ctime = FileTime::from_creation_time(metadata).unwrap_or_else(FileTime::zero);
    Ok(())
}
