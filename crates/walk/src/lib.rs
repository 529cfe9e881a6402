#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` turns a root and an "immediate children" function into a lazy,
//! flattened sequence, and applies that to the filesystem twice: [`walk`]
//! enumerates every path beneath a root, and [`delete_directory`] removes
//! them with children strictly before their parents.
//!
//! # Design
//!
//! - [`expand_deep`] and [`expand_breadth`] are generic over the item type
//!   and the children function. They keep explicit frames rather than
//!   recursing, and only ask for an item's children when the item is yielded.
//! - [`Walk`] specializes [`expand_deep`] with directory listing. Files,
//!   missing paths, and directories that cannot be read all have no children.
//! - [`DeleteDirectory`] materializes a [`Walk`] on first demand, sorts it in
//!   descending path order, and attempts one deletion per item pulled.
//!
//! # Invariants
//!
//! - Every reachable item is yielded exactly once, its children are listed
//!   exactly once, and an item always precedes its descendants in
//!   [`expand_deep`] output.
//! - A descendant always sorts after its ancestor under [`std::path::Path`]'s
//!   component-wise ordering, so descending order deletes it first.
//! - The root is resolved through a symlink. Below the root, unless symlink
//!   following is enabled, a symlink is a leaf: deleting a tree removes the
//!   link and never the target's contents.
//!
//! # Errors
//!
//! Nothing here returns an error. Listing failures make a path a leaf and are
//! visible in the `Walk` debug log; deletion failures are reported on each
//! [`DeleteOutcome`] and never stop the sequence.
//!
//! # Examples
//!
//! ```
//! use walk::{delete_directory, walk};
//!
//! # fn demo() -> std::io::Result<()> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("a");
//! std::fs::create_dir_all(root.join("b"))?;
//! std::fs::write(root.join("b/y.txt"), b"data")?;
//!
//! let paths: Vec<_> = walk(&root).collect();
//! assert_eq!(paths.len(), 3);
//! assert_eq!(paths[0], root);
//!
//! let removed: Vec<_> = delete_directory(&root, true)
//!     .map(|outcome| outcome.into_path())
//!     .collect();
//! assert_eq!(removed, [root.join("b/y.txt"), root.join("b")]);
//! assert!(root.exists());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod delete;
mod expand;
mod walker;

use std::path::PathBuf;

pub use crate::builder::WalkBuilder;
pub use crate::delete::{DeleteBuilder, DeleteDirectory, DeleteOutcome, DeleteSummary};
pub use crate::expand::{ExpandBreadth, ExpandDeep, expand_breadth, expand_deep};
pub use crate::walker::Walk;

/// Walks `root` depth-first in pre-order, yielding `root` first.
///
/// A `root` that does not exist or is not a directory yields only itself.
#[must_use]
pub fn walk<P: Into<PathBuf>>(root: P) -> Walk {
    WalkBuilder::new(root).build()
}

/// Deletes everything beneath `root`, and `root` itself unless `keep_root`.
///
/// The returned sequence is lazy: each item is one deletion attempt.
#[must_use]
pub fn delete_directory<P: Into<PathBuf>>(root: P, keep_root: bool) -> DeleteDirectory {
    DeleteBuilder::new(root).keep_root(keep_root).build()
}
