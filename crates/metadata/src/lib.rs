#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Extended stat records.
//!
//! An [`Xstat`] captures the stat(2) attributes of a filesystem entry that are
//! worth transmitting (size, ownership, mode, link count, inode and the access
//! and modification times) together with the entry's extended attributes and
//! its name. The crate knows nothing about encodings; the `protocol` crate
//! frames records for the wire.
//!
//! # Examples
//!
//! Build a record by hand and query it:
//!
//! ```
//! use metadata::{FileTime, Xstat};
//!
//! let mut hosts = Xstat::new("/etc/hosts");
//! hosts.size = 158;
//! hosts.mode = 0o100644;
//! hosts.mtime = FileTime::from_unix_time(1_700_000_000, 0);
//! hosts.xattr.insert("user.test".into(), "v".into());
//!
//! assert!(hosts.is_regular());
//! assert_eq!(hosts.perm(), 0o644);
//! assert_eq!(hosts.clone(), hosts);
//! ```
//!
//! Or collect one from the filesystem:
//!
//! ```no_run
//! use metadata::{CollectOptions, Xstat};
//!
//! let record = Xstat::from_path("/etc/profile", true)?;
//! let target = Xstat::from_path_with("/etc/localtime", &CollectOptions::new().follow_symlinks(true))?;
//! println!("{record}\n{target}");
//! # Ok::<(), metadata::MetadataError>(())
//! ```

mod collect;
mod debug_collect;
mod error;
mod mode;
mod options;
mod record;

#[cfg(all(unix, feature = "xattr"))]
mod xattr;

#[cfg(not(all(unix, feature = "xattr")))]
#[path = "xattr_stub.rs"]
mod xattr;

pub use error::MetadataError;
pub use mode::{
    FileType, PERMISSION_MASK, S_IFBLK, S_IFCHR, S_IFDIR, S_IFIFO, S_IFLNK, S_IFMT, S_IFREG,
    S_IFSOCK,
};
pub use options::CollectOptions;
pub use record::{Xattrs, Xstat};
pub use self::xattr::read_xattrs;

/// Re-exported so downstream crates can build timestamps without a direct dependency.
pub use filetime::FileTime;
