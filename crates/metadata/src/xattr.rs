use std::ffi::OsStr;
use std::io;
use std::path::Path;

use crate::debug_collect::{trace_xattr_vanished, trace_xattrs_read};
use crate::error::MetadataError;
use crate::record::Xattrs;

fn read_attribute(
    path: &Path,
    name: &OsStr,
    follow_symlinks: bool,
) -> Result<Option<Vec<u8>>, MetadataError> {
    let result = if follow_symlinks {
        ::xattr::get_deref(path, name)
    } else {
        ::xattr::get(path, name)
    };
    result.map_err(|error| MetadataError::new("read extended attribute", path, error))
}

/// Reads every extended attribute of `path` into a map.
///
/// Names and values that are not valid UTF-8 are converted lossily. An
/// attribute removed between listing and reading is skipped, and a filesystem
/// without xattr support yields an empty map.
pub fn read_xattrs(path: &Path, follow_symlinks: bool) -> Result<Xattrs, MetadataError> {
    let listed = if follow_symlinks {
        ::xattr::list_deref(path)
    } else {
        ::xattr::list(path)
    };
    let names = match listed {
        Ok(names) => names,
        Err(error) if error.kind() == io::ErrorKind::Unsupported => return Ok(Xattrs::new()),
        Err(error) => return Err(MetadataError::new("list extended attributes", path, error)),
    };

    let mut attrs = Xattrs::new();
    for name in names {
        let key = name.to_string_lossy().into_owned();
        match read_attribute(path, &name, follow_symlinks)? {
            Some(value) => {
                attrs.insert(key, String::from_utf8_lossy(&value).into_owned());
            }
            None => trace_xattr_vanished(path, &key),
        }
    }

    trace_xattrs_read(path, attrs.len());
    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use test_support::xattrs_supported;

    #[test]
    fn reads_user_attributes() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("file.txt");
        fs::write(&file, b"data").expect("write file");

        if !xattrs_supported(&file) {
            return;
        }

        ::xattr::set(&file, "user.xstat0", b"foobar").expect("set xattr");
        ::xattr::set(&file, "user.xstat1", b"barfoo").expect("set xattr");

        let attrs = read_xattrs(&file, false).expect("read xattrs");
        assert_eq!(attrs.get("user.xstat0").map(String::as_str), Some("foobar"));
        assert_eq!(attrs.get("user.xstat1").map(String::as_str), Some("barfoo"));
    }

    #[test]
    fn non_utf8_values_are_converted_lossily() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("bin.txt");
        fs::write(&file, b"data").expect("write file");

        if !xattrs_supported(&file) {
            return;
        }

        ::xattr::set(&file, "user.blob", &[0x66, 0xff, 0x6f]).expect("set xattr");
        let attrs = read_xattrs(&file, false).expect("read xattrs");
        assert_eq!(
            attrs.get("user.blob").map(String::as_str),
            Some("f\u{fffd}o")
        );
    }

    #[test]
    fn missing_path_reports_list_failure() {
        let dir = tempdir().expect("tempdir");
        let missing = dir.path().join("missing");

        let err = read_xattrs(&missing, false).expect_err("missing path must fail");
        assert_eq!(err.context(), "list extended attributes");
        assert_eq!(err.path(), missing.as_path());
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
