#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Lazy, demand-driven filesystem primitives.
//!
//! Three operations are provided, each producing work only as fast as the
//! caller consumes it:
//!
//! - [`lines`] opens a text file and yields its lines one unit of demand at a
//!   time, releasing the file exactly once however the sequence ends.
//! - [`walk`] yields a root and every path beneath it, depth-first and
//!   pre-order, built on the generic [`expand_deep`] combinator.
//! - [`delete_directory`] removes a tree with every child deleted before its
//!   parent, reporting each attempt as it happens.
//!
//! Diagnostics flow through the [`logging`] crate: set verbosity with
//! [`logging::init`] and, optionally, bridge `tracing` events with
//! [`logging::init_tracing`].
//!
//! ```
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("a");
//! std::fs::create_dir(&root)?;
//! std::fs::write(root.join("notes.txt"), "first\nsecond\n")?;
//!
//! let first = lazyfs::lines(root.join("notes.txt"))?.next().transpose()?;
//! assert_eq!(first.as_deref(), Some("first"));
//!
//! assert_eq!(lazyfs::walk(&root).count(), 2);
//! let summary = lazyfs::delete_directory(&root, false).finish();
//! assert_eq!(summary.deleted(), 2);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

pub use lines::{
    Charset, DecodingLineReader, FileLineReader, LineBuffer, LineProducer, LineReader,
    LineSubscriber, LinesBuilder, LinesError, Signal, Termination, UNBOUNDED, lines,
    lines_with_charset,
};
pub use logging;
pub use walk::{
    DeleteBuilder, DeleteDirectory, DeleteOutcome, DeleteSummary, ExpandBreadth, ExpandDeep,
    Walk, WalkBuilder, delete_directory, expand_breadth, expand_deep, walk,
};
