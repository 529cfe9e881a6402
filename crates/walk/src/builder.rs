use crate::walker::Walk;
use std::path::PathBuf;

/// Configures a filesystem traversal rooted at a specific path.
///
/// Defaults: symlinks are leaves, entries come in the order the filesystem
/// lists them, and the root is the first path yielded.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    root: PathBuf,
    follow_symlinks: bool,
    sort_entries: bool,
    include_root: bool,
}

impl WalkBuilder {
    /// Creates a new builder that will traverse the provided root path.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
            sort_entries: false,
            include_root: true,
        }
    }

    /// Configures whether symlinks below the root are descended into.
    ///
    /// The root is always resolved, so walking a link to a directory lists the
    /// directory regardless of this setting. The symlink itself is always
    /// yielded. When enabled, its target's
    /// entries are yielded beneath the symlink's own path. There is no cycle
    /// detection: a link to an ancestor makes the walk unbounded.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sorts each directory's entries by path before they are visited.
    ///
    /// Makes the yielded order deterministic across filesystems.
    #[must_use]
    pub const fn sort_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    /// Controls whether the root path should be included in the output.
    ///
    /// When disabled, traversal starts directly with the root's children.
    #[must_use]
    pub const fn include_root(mut self, include: bool) -> Self {
        self.include_root = include;
        self
    }

    /// Builds a [`Walk`] using the configured options.
    ///
    /// Nothing touches the filesystem until the walk is iterated.
    #[must_use]
    pub fn build(self) -> Walk {
        Walk::new(
            self.root,
            self.follow_symlinks,
            self.sort_entries,
            self.include_root,
        )
    }
}
