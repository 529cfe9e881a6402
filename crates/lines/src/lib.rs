#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `lines` exposes the contents of a text file as a demand-driven sequence of
//! lines. Nothing is read until a consumer asks for it, and each unit of
//! demand reads at most one line, so a caller can consume a very large file a
//! few lines at a time and stop whenever it likes.
//!
//! # Design
//!
//! - [`LineProducer`] owns one [`LineReader`] and satisfies cumulative demand
//!   registered through [`LineProducer::request`], delivering lines, errors,
//!   and completion to a [`LineSubscriber`]. It is also an [`Iterator`].
//! - [`FileLineReader`] is the filesystem [`LineReader`]: it decodes bytes
//!   incrementally with a [`Charset`] and splits on `\n`, `\r\n`, or `\r`.
//! - [`LinesBuilder`] configures the charset and whether the file is opened
//!   immediately or on first demand.
//!
//! # Invariants
//!
//! - The reader is closed exactly once, whichever terminal path fires first:
//!   end of input, a read failure, cancellation, disposal, or drop.
//! - No read happens after the sequence terminates, and no line is emitted
//!   without outstanding demand.
//!
//! # Errors
//!
//! [`LinesError`] distinguishes open, read, decode, and close failures, each
//! carrying the path of the resource.
//!
//! # Examples
//!
//! ```
//! use lines::{lines, LineBuffer};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("input.txt");
//! std::fs::write(&path, "one\ntwo\r\nthree")?;
//!
//! let mut producer = lines(&path)?;
//! let mut buffer = LineBuffer::new();
//! producer.request(2, &mut buffer);
//! assert_eq!(buffer.lines(), ["one", "two"]);
//! producer.request(5, &mut buffer);
//! assert_eq!(buffer.lines(), ["one", "two", "three"]);
//! assert!(buffer.is_completed());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod charset;
mod cursor;
mod error;
mod producer;
mod reader;

use std::path::Path;

pub use crate::builder::LinesBuilder;
pub use crate::charset::Charset;
pub use crate::cursor::Termination;
pub use crate::error::LinesError;
pub use crate::producer::{LineBuffer, LineProducer, LineSubscriber, Signal, UNBOUNDED};
pub use crate::reader::{DecodingLineReader, FileLineReader, LineReader};

/// Opens `path` as a UTF-8 line sequence.
///
/// The file is opened before this returns, so a missing or unreadable file is
/// reported here rather than through the sequence.
pub fn lines<P: AsRef<Path>>(path: P) -> Result<LineProducer<FileLineReader>, LinesError> {
    LinesBuilder::new(path.as_ref()).open()
}

/// Opens `path` as a line sequence decoded with `charset`.
pub fn lines_with_charset<P: AsRef<Path>>(
    path: P,
    charset: Charset,
) -> Result<LineProducer<FileLineReader>, LinesError> {
    LinesBuilder::new(path.as_ref()).charset(charset).open()
}
