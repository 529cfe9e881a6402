//! Best-effort removal of a directory tree, children before parents.

use crate::builder::WalkBuilder;
use logging::{debug_log, info_log};
use std::fmt;
use std::fs;
use std::io;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::vec;

/// Configures a [`DeleteDirectory`] pipeline.
#[derive(Clone, Debug)]
pub struct DeleteBuilder {
    root: PathBuf,
    keep_root: bool,
    follow_symlinks: bool,
}

impl DeleteBuilder {
    /// Creates a builder that deletes `root` and everything beneath it.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            keep_root: false,
            follow_symlinks: false,
        }
    }

    /// Leaves the root itself in place, deleting only its contents.
    #[must_use]
    pub const fn keep_root(mut self, keep: bool) -> Self {
        self.keep_root = keep;
        self
    }

    /// Also deletes the contents of directories reached through symlinks
    /// below the root.
    ///
    /// Off by default, in which case such a symlink is removed without
    /// touching its target. A root that is itself a link to a directory is
    /// always emptied through the link, and the link (not the target) is
    /// what gets removed when the root is not kept.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Builds the pipeline. Nothing is listed or deleted until it is iterated.
    #[must_use]
    pub fn build(self) -> DeleteDirectory {
        DeleteDirectory {
            root: self.root,
            keep_root: self.keep_root,
            follow_symlinks: self.follow_symlinks,
            pending: None,
            summary: DeleteSummary::default(),
        }
    }
}

/// Result of one deletion attempt.
#[derive(Debug)]
pub struct DeleteOutcome {
    path: PathBuf,
    error: Option<io::Error>,
}

impl DeleteOutcome {
    /// The path that was deleted or failed to delete.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reports whether the path was removed.
    #[must_use]
    pub const fn deleted(&self) -> bool {
        self.error.is_none()
    }

    /// The failure, when the path could not be removed.
    #[must_use]
    pub const fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    /// Consumes the outcome, returning the path.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Running totals for a [`DeleteDirectory`] pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    attempted: usize,
    deleted: usize,
    failed: usize,
}

impl DeleteSummary {
    /// Paths for which a deletion was attempted.
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.attempted
    }

    /// Paths that were removed.
    #[must_use]
    pub const fn deleted(&self) -> usize {
        self.deleted
    }

    /// Paths that could not be removed.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }

    fn record(&mut self, outcome: &DeleteOutcome) {
        self.attempted += 1;
        if outcome.deleted() {
            self.deleted += 1;
        } else {
            self.failed += 1;
        }
    }
}

impl fmt::Display for DeleteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} attempted, {} deleted, {} failed",
            self.attempted, self.deleted, self.failed
        )
    }
}

/// Lazy sequence of deletions beneath a root.
///
/// On first demand the whole tree is walked and sorted into descending path
/// order, which places every descendant ahead of its ancestors. Each call to
/// `next` then attempts exactly one deletion. A failure is reported on the
/// outcome and never stops the sequence.
pub struct DeleteDirectory {
    root: PathBuf,
    keep_root: bool,
    follow_symlinks: bool,
    pending: Option<vec::IntoIter<PathBuf>>,
    summary: DeleteSummary,
}

impl DeleteDirectory {
    /// The root passed to the builder.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Totals for the deletions attempted so far.
    #[must_use]
    pub const fn summary(&self) -> DeleteSummary {
        self.summary
    }

    /// Runs the remaining deletions and returns the final totals.
    #[must_use]
    pub fn finish(mut self) -> DeleteSummary {
        self.by_ref().for_each(drop);
        self.summary
    }

    fn plan(&self) -> vec::IntoIter<PathBuf> {
        let mut paths: Vec<PathBuf> = WalkBuilder::new(&self.root)
            .follow_symlinks(self.follow_symlinks)
            .build()
            .collect();
        paths.sort_unstable_by(|a, b| b.cmp(a));
        if self.keep_root {
            paths.retain(|path| path != &self.root);
        }
        debug_log!(
            Del,
            1,
            "planned {} deletions under {}",
            paths.len(),
            self.root.display()
        );
        paths.into_iter()
    }
}

impl Iterator for DeleteDirectory {
    type Item = DeleteOutcome;

    fn next(&mut self) -> Option<DeleteOutcome> {
        if self.pending.is_none() {
            self.pending = Some(self.plan());
        }
        let path = self.pending.as_mut()?.next()?;

        let error = remove(&path).err();
        match &error {
            None => info_log!(Del, 1, "deleted {}", path.display()),
            Some(error) => info_log!(Del, 1, "failed to delete {}: {}", path.display(), error),
        }

        let outcome = DeleteOutcome { path, error };
        self.summary.record(&outcome);
        Some(outcome)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.pending {
            Some(pending) => pending.size_hint(),
            None => (0, None),
        }
    }
}

impl FusedIterator for DeleteDirectory {}

impl fmt::Debug for DeleteDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeleteDirectory")
            .field("root", &self.root)
            .field("keep_root", &self.keep_root)
            .field("follow_symlinks", &self.follow_symlinks)
            .field("planned", &self.pending.is_some())
            .field("summary", &self.summary)
            .finish()
    }
}

/// Removes one path without following symlinks.
fn remove(path: &Path) -> io::Result<()> {
    let file_type = fs::symlink_metadata(path)?.file_type();
    if file_type.is_dir() || is_directory_link(&file_type) {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(windows)]
fn is_directory_link(file_type: &fs::FileType) -> bool {
    use std::os::windows::fs::FileTypeExt;
    file_type.is_symlink_dir()
}

#[cfg(not(windows))]
const fn is_directory_link(_file_type: &fs::FileType) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::TreeFixture;

    #[test]
    fn summary_counts_successes_and_failures() {
        let mut summary = DeleteSummary::default();
        summary.record(&DeleteOutcome {
            path: PathBuf::from("gone"),
            error: None,
        });
        summary.record(&DeleteOutcome {
            path: PathBuf::from("stuck"),
            error: Some(io::Error::from(io::ErrorKind::PermissionDenied)),
        });
        assert_eq!(summary.attempted(), 2);
        assert_eq!(summary.deleted(), 1);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.to_string(), "2 attempted, 1 deleted, 1 failed");
    }

    #[test]
    fn nothing_happens_before_first_demand() {
        let tree = TreeFixture::with_entries("a", &["x.txt"]).expect("fixture");
        let pipeline = DeleteBuilder::new(tree.root()).build();
        assert_eq!(pipeline.size_hint(), (0, None));
        drop(pipeline);
        assert!(tree.path("x.txt").exists());
    }

    #[test]
    fn remove_reports_missing_path() {
        let tree = TreeFixture::new("a").expect("fixture");
        let error = remove(&tree.path("ghost")).expect_err("missing path");
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }
}
