#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Filesystem fixtures shared by the lazyfs test suites.
//!
//! [`TreeFixture`] builds a small directory tree inside a temporary directory
//! from a list of relative entries, where a trailing `/` marks a directory:
//!
//! ```
//! use test_support::TreeFixture;
//!
//! let tree = TreeFixture::with_entries("a", &["b/", "x.txt", "b/y.txt"]).unwrap();
//! assert!(tree.path("b").is_dir());
//! assert_eq!(tree.snapshot().unwrap().len(), 4);
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A directory tree rooted inside a private temporary directory.
///
/// The whole tree, including anything created next to the root, is removed
/// when the fixture is dropped.
#[derive(Debug)]
pub struct TreeFixture {
    temp: TempDir,
    root: PathBuf,
}

impl TreeFixture {
    /// Creates an empty root directory called `root_name`.
    pub fn new(root_name: &str) -> io::Result<Self> {
        let temp = tempfile::tempdir()?;
        let root = temp.path().join(root_name);
        fs::create_dir(&root)?;
        Ok(Self { temp, root })
    }

    /// Creates the root and every listed entry beneath it.
    ///
    /// Entries ending in `/` become directories; all others become files
    /// containing their own relative path. Missing parents are created.
    pub fn with_entries(root_name: &str, entries: &[&str]) -> io::Result<Self> {
        let fixture = Self::new(root_name)?;
        for entry in entries {
            if let Some(dir) = entry.strip_suffix('/') {
                fixture.dir(dir)?;
            } else {
                fixture.file(entry, entry.as_bytes())?;
            }
        }
        Ok(fixture)
    }

    /// The root directory of the tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The temporary directory holding the root, for entries that must live
    /// outside the tree (symlink targets, for example).
    #[must_use]
    pub fn outside(&self) -> &Path {
        self.temp.path()
    }

    /// Joins `relative` onto the root.
    #[must_use]
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Creates a directory (and parents) beneath the root.
    pub fn dir(&self, relative: &str) -> io::Result<PathBuf> {
        let path = self.path(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Writes a file beneath the root, creating parents as needed.
    pub fn file(&self, relative: &str, contents: impl AsRef<[u8]>) -> io::Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Every path that currently exists in the tree, root included.
    ///
    /// Symbolic links are recorded but never followed.
    pub fn snapshot(&self) -> io::Result<BTreeSet<PathBuf>> {
        let mut seen = BTreeSet::new();
        if fs::symlink_metadata(&self.root).is_ok() {
            collect(&self.root, &mut seen)?;
        }
        Ok(seen)
    }
}

fn collect(path: &Path, seen: &mut BTreeSet<PathBuf>) -> io::Result<()> {
    seen.insert(path.to_path_buf());
    if fs::symlink_metadata(path)?.is_dir() {
        for entry in fs::read_dir(path)? {
            collect(&entry?.path(), seen)?;
        }
    }
    Ok(())
}

/// Writes `lines` joined by `terminator` to `dir/name` and returns the path.
///
/// No terminator follows the last line unless `trailing` is set.
pub fn write_lines(
    dir: &Path,
    name: &str,
    lines: &[&str],
    terminator: &str,
    trailing: bool,
) -> io::Result<PathBuf> {
    let mut text = lines.join(terminator);
    if trailing {
        text.push_str(terminator);
    }
    let path = dir.join(name);
    fs::write(&path, text)?;
    Ok(path)
}
