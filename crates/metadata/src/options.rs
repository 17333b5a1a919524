/// Options that control how a record is collected from the filesystem.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CollectOptions {
    follow_symlinks: bool,
    xattrs: bool,
}

impl CollectOptions {
    /// Creates a new [`CollectOptions`] value with defaults applied.
    ///
    /// By default symlinks are not followed (the link itself is described, as
    /// with `lstat(2)`) and extended attributes are read.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            follow_symlinks: false,
            xattrs: true,
        }
    }

    /// Requests that symlinks be resolved before stat and xattr lookups.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Requests that extended attributes be read into the record.
    #[must_use]
    pub const fn xattrs(mut self, read: bool) -> Self {
        self.xattrs = read;
        self
    }

    /// Reports whether symlinks are resolved.
    #[must_use]
    pub const fn follows_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    /// Reports whether extended attributes are read.
    #[must_use]
    pub const fn reads_xattrs(&self) -> bool {
        self.xattrs
    }
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self::new()
    }
}
