use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use filetime::FileTime;

use crate::mode::{FileType, PERMISSION_MASK};

/// Extended attributes keyed by attribute name.
///
/// A sorted map keeps iteration, and therefore any encoding derived from it,
/// deterministic.
pub type Xattrs = BTreeMap<String, String>;

/// Extended stat record for a single filesystem entry.
///
/// Holds the stat(2) fields that survive transmission together with the
/// entry's extended attributes and its name. `ctime` is retained for local
/// inspection only: it is not part of the wire form and takes no part in
/// equality.
#[derive(Clone, Debug)]
pub struct Xstat {
    /// Path (or caller-chosen label) of the entry.
    pub name: String,
    /// Size in bytes.
    pub size: i64,
    /// Owning user id.
    pub uid: u32,
    /// Owning group id.
    pub gid: u32,
    /// File type and permission bits.
    pub mode: u32,
    /// Last modification time.
    pub mtime: FileTime,
    /// Last access time.
    pub atime: FileTime,
    /// Last status change time.
    pub ctime: FileTime,
    /// Hard link count.
    pub nlink: u64,
    /// Inode number.
    pub ino: u64,
    /// Extended attributes.
    pub xattr: Xattrs,
}

impl Xstat {
    /// Creates a record named `name` with every other field zeroed.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            uid: 0,
            gid: 0,
            mode: 0,
            mtime: FileTime::zero(),
            atime: FileTime::zero(),
            ctime: FileTime::zero(),
            nlink: 0,
            ino: 0,
            xattr: Xattrs::new(),
        }
    }

    /// Classifies the file type bits of `mode`.
    #[must_use]
    pub const fn file_type(&self) -> FileType {
        FileType::from_mode(self.mode)
    }

    /// Returns `true` when the record describes a directory.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.file_type(), FileType::Directory)
    }

    /// Returns `true` when the record describes a regular file.
    #[must_use]
    pub const fn is_regular(&self) -> bool {
        matches!(self.file_type(), FileType::Regular)
    }

    /// Returns `true` when the record describes a symbolic link.
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        matches!(self.file_type(), FileType::Symlink)
    }

    /// Returns the owner/group/other permission bits (`mode & 0o777`).
    #[must_use]
    pub const fn perm(&self) -> u32 {
        self.mode & PERMISSION_MASK
    }

    /// Modification time as a [`SystemTime`].
    #[must_use]
    pub fn modified(&self) -> Option<SystemTime> {
        to_system_time(self.mtime)
    }

    /// Access time as a [`SystemTime`].
    #[must_use]
    pub fn accessed(&self) -> Option<SystemTime> {
        to_system_time(self.atime)
    }

    /// Status change time as a [`SystemTime`].
    #[must_use]
    pub fn changed(&self) -> Option<SystemTime> {
        to_system_time(self.ctime)
    }

    /// Returns `true` if every transmitted field of `self` matches `other`.
    ///
    /// Extended attributes compare as sets of (name, value) pairs. `ctime` is
    /// ignored.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        self.name == other.name
            && self.size == other.size
            && self.uid == other.uid
            && self.gid == other.gid
            && self.mode == other.mode
            && self.nlink == other.nlink
            && self.ino == other.ino
            && self.mtime == other.mtime
            && self.atime == other.atime
            && self.xattr == other.xattr
    }
}

impl Default for Xstat {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl PartialEq for Xstat {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for Xstat {}

impl fmt::Display for Xstat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: size={}, uid={}, gid={}, mode={:#x}, mtime={}.{:09}",
            self.name,
            self.size,
            self.uid,
            self.gid,
            self.mode,
            self.mtime.unix_seconds(),
            self.mtime.nanoseconds()
        )
    }
}

fn to_system_time(time: FileTime) -> Option<SystemTime> {
    let seconds = Duration::from_secs(time.unix_seconds().unsigned_abs());
    let base = if time.unix_seconds() >= 0 {
        UNIX_EPOCH.checked_add(seconds)
    } else {
        UNIX_EPOCH.checked_sub(seconds)
    }?;
    base.checked_add(Duration::from_nanos(u64::from(time.nanoseconds())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts() -> Xstat {
        let mut x = Xstat::new("/etc/hosts");
        x.size = 158;
        x.mode = 0o100644;
        x.nlink = 1;
        x.ino = 1234;
        x.mtime = FileTime::from_unix_time(1_700_000_000, 0);
        x.atime = FileTime::from_unix_time(1_700_000_000, 0);
        x.xattr.insert("user.test".into(), "v".into());
        x
    }

    #[test]
    fn predicates_follow_type_bits() {
        let mut x = hosts();
        assert!(x.is_regular());
        assert!(!x.is_dir());
        assert!(!x.is_symlink());
        assert_eq!(x.perm(), 0o644);

        x.mode = 0o040755;
        assert!(x.is_dir());
        assert_eq!(x.perm(), 0o755);

        x.mode = 0o120777;
        assert!(x.is_symlink());
        assert_eq!(x.file_type(), FileType::Symlink);
    }

    #[test]
    fn equality_ignores_ctime() {
        let a = hosts();
        let mut b = hosts();
        b.ctime = FileTime::from_unix_time(42, 7);
        assert_eq!(a, b);
        assert!(a.equal(&b));
    }

    #[test]
    fn equality_checks_each_transmitted_field() {
        let base = hosts();
        let mutations: [fn(&mut Xstat); 10] = [
            |x| x.name.push('x'),
            |x| x.size += 1,
            |x| x.uid = 1,
            |x| x.gid = 1,
            |x| x.mode = 0o100600,
            |x| x.nlink = 2,
            |x| x.ino = 99,
            |x| x.mtime = FileTime::from_unix_time(1_700_000_000, 1),
            |x| x.atime = FileTime::from_unix_time(1_700_000_001, 0),
            |x| {
                x.xattr.insert("user.other".into(), String::new());
            },
        ];
        for (i, mutate) in mutations.iter().enumerate() {
            let mut changed = base.clone();
            mutate(&mut changed);
            assert_ne!(base, changed, "mutation {i} went unnoticed");
        }
    }

    #[test]
    fn xattr_equality_is_order_independent() {
        let mut a = Xstat::new("f");
        let mut b = Xstat::new("f");
        a.xattr.insert("user.a".into(), "1".into());
        a.xattr.insert("user.b".into(), "2".into());
        b.xattr.insert("user.b".into(), "2".into());
        b.xattr.insert("user.a".into(), "1".into());
        assert_eq!(a, b);

        b.xattr.insert("user.a".into(), "changed".into());
        assert_ne!(a, b);
    }

    #[test]
    fn display_renders_summary() {
        let x = hosts();
        assert_eq!(
            x.to_string(),
            "/etc/hosts: size=158, uid=0, gid=0, mode=0x81a4, mtime=1700000000.000000000"
        );
    }

    #[test]
    fn timestamps_convert_to_system_time() {
        let mut x = hosts();
        x.atime = FileTime::from_unix_time(-10, 500);
        assert_eq!(
            x.modified(),
            Some(UNIX_EPOCH + Duration::from_secs(1_700_000_000))
        );
        assert_eq!(
            x.accessed(),
            Some(UNIX_EPOCH - Duration::from_secs(10) + Duration::from_nanos(500))
        );
        assert_eq!(x.changed(), Some(UNIX_EPOCH));
    }

    #[test]
    fn default_is_empty() {
        let x = Xstat::default();
        assert!(x.name.is_empty());
        assert!(x.xattr.is_empty());
        assert_eq!(x.file_type(), FileType::Unknown);
    }
}
