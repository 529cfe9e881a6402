use crate::expand::{ExpandDeep, expand_deep};
use logging::{debug_log, info_log, trace_walk};
use std::fmt;
use std::fs;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

type ListChildren = Box<dyn FnMut(&PathBuf) -> Vec<PathBuf> + Send>;

/// Depth-first, pre-order iterator over the paths beneath a root.
///
/// Built by [`crate::WalkBuilder`] or [`crate::walk`]. The root is yielded
/// exactly as it was given; every other path is its parent joined with an
/// entry name. A path whose children cannot be listed (a file, a missing path,
/// an unreadable directory) is a leaf. A root that is a symlink to a directory
/// is listed through the link; symlinks below the root follow the builder's
/// setting.
pub struct Walk {
    root: PathBuf,
    entries: ExpandDeep<PathBuf, ListChildren, Vec<PathBuf>>,
    skip_root: bool,
    yielded: usize,
    finished: bool,
}

impl Walk {
    pub(crate) fn new(
        root: PathBuf,
        follow_symlinks: bool,
        sort_entries: bool,
        include_root: bool,
    ) -> Self {
        debug_log!(Walk, 1, "walking {}", root.display());
        let lister = Lister {
            follow_symlinks,
            sort_entries,
        };
        let top = root.clone();
        let list: ListChildren =
            Box::new(move |path: &PathBuf| lister.children(path, *path == top));
        Self {
            entries: expand_deep(root.clone(), list),
            root,
            skip_root: !include_root,
            yielded: 0,
            finished: false,
        }
    }
}

impl Iterator for Walk {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        if self.finished {
            return None;
        }
        if self.skip_root {
            self.skip_root = false;
            self.entries.next();
        }

        let next = self.entries.next();
        match &next {
            Some(_) => self.yielded += 1,
            None => {
                self.finished = true;
                info_log!(Walk, 1, "walked {} paths under {}", self.yielded, self.root.display());
            }
        }
        next
    }
}

impl FusedIterator for Walk {}

impl fmt::Debug for Walk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walk")
            .field("root", &self.root)
            .field("entries", &self.entries)
            .field("yielded", &self.yielded)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug)]
struct Lister {
    follow_symlinks: bool,
    sort_entries: bool,
}

impl Lister {
    /// Immediate entries of `path`, or nothing when it is not a listable
    /// directory. Failures are indistinguishable from leaves to the caller and
    /// are only visible in the debug log.
    fn children(self, path: &Path, is_root: bool) -> Vec<PathBuf> {
        let expandable = if is_root {
            Self::root_is_expandable(path)
        } else {
            self.is_expandable(path)
        };
        if !expandable {
            return Vec::new();
        }

        let read_dir = match fs::read_dir(path) {
            Ok(read_dir) => read_dir,
            Err(error) => {
                debug_log!(Walk, 1, "cannot list {}: {}", path.display(), error);
                return Vec::new();
            }
        };

        let mut children = Vec::new();
        for entry in read_dir {
            match entry {
                Ok(entry) => children.push(entry.path()),
                Err(error) => {
                    debug_log!(Walk, 1, "skipping unreadable entry in {}: {}", path.display(), error);
                }
            }
        }
        if self.sort_entries {
            children.sort();
        }

        debug_log!(Walk, 3, "found {} entries in {}", children.len(), path.display());
        children
    }

    /// The root is always resolved through symlinks.
    fn root_is_expandable(path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(metadata) => metadata.is_dir(),
            Err(error) => {
                debug_log!(Walk, 2, "cannot inspect root {}: {}", path.display(), error);
                false
            }
        }
    }

    fn is_expandable(self, path: &Path) -> bool {
        match fs::symlink_metadata(path) {
            Ok(metadata) if metadata.is_dir() => true,
            Ok(metadata) if metadata.file_type().is_symlink() => {
                if !self.follow_symlinks {
                    trace_walk!("not following symlink {}", path.display());
                    return false;
                }
                fs::metadata(path).is_ok_and(|target| target.is_dir())
            }
            Ok(_) => false,
            Err(error) => {
                debug_log!(Walk, 2, "cannot inspect {}: {}", path.display(), error);
                false
            }
        }
    }
}
