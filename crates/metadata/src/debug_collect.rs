//! Tracing for record collection.
//!
//! All tracing is conditionally compiled behind the `tracing` feature flag and
//! produces no-op inline functions when disabled.

/// Target name for tracing events emitted while collecting records.
#[cfg(feature = "tracing")]
const COLLECT_TARGET: &str = "xstat::collect";

/// Traces a completed stat of `path`.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_stat(path: &std::path::Path, mode: u32, size: i64, follow_symlinks: bool) {
    tracing::debug!(
        target: COLLECT_TARGET,
        path = %path.display(),
        mode = mode,
        size = size,
        follow_symlinks = follow_symlinks,
        "stat"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_stat(_path: &std::path::Path, _mode: u32, _size: i64, _follow_symlinks: bool) {}

/// Traces the number of extended attributes read from `path`.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_xattrs_read(path: &std::path::Path, count: usize) {
    tracing::trace!(
        target: COLLECT_TARGET,
        path = %path.display(),
        count = count,
        "xattrs_read"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_xattrs_read(_path: &std::path::Path, _count: usize) {}

/// Traces an attribute that vanished between listing and reading it.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_xattr_vanished(path: &std::path::Path, name: &str) {
    tracing::trace!(
        target: COLLECT_TARGET,
        path = %path.display(),
        name = %name,
        "xattr_vanished"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_xattr_vanished(_path: &std::path::Path, _name: &str) {}

/// Warns that extended attributes cannot be collected on this build.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_xattr_unsupported() {
    tracing::warn!(
        target: COLLECT_TARGET,
        "extended attributes are not supported on this platform; records carry none"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_xattr_unsupported() {}
