//! No-op xattr collection for platforms without extended attribute support.
//!
//! On non-Unix platforms or when the `xattr` feature is disabled, records are
//! collected without extended attributes so callers can use the same API
//! unconditionally.

use crate::debug_collect::trace_xattr_unsupported;
use crate::error::MetadataError;
use crate::record::Xattrs;
use std::path::Path;
use std::sync::Once;

fn warn_xattr_unsupported() {
    static WARN_ONCE: Once = Once::new();
    WARN_ONCE.call_once(trace_xattr_unsupported);
}

/// Reads the extended attributes of `path`.
///
/// On platforms without xattr support, emits a one-time warning and returns
/// an empty map.
pub fn read_xattrs(_path: &Path, _follow_symlinks: bool) -> Result<Xattrs, MetadataError> {
    warn_xattr_unsupported();
    Ok(Xattrs::new())
}
