//! Producer-internal cursor: owns the reader and funnels every terminal path
//! through a single idempotent release.

use std::fmt;
use std::mem;
use std::path::{Path, PathBuf};

use logging::{debug_log, trace_close, trace_warn};

use crate::error::LinesError;
use crate::reader::LineReader;

pub(crate) type Opener<R> = Box<dyn FnOnce() -> Result<R, LinesError> + Send>;

/// Which path drove the cursor to its terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The resource reported end of input.
    Completed,
    /// Opening or reading the resource failed.
    Failed,
    /// The consumer cancelled the sequence.
    Cancelled,
    /// The sequence was torn down externally (or dropped).
    Disposed,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Completed => "end of input",
            Self::Failed => "read failure",
            Self::Cancelled => "cancellation",
            Self::Disposed => "disposal",
        })
    }
}

enum CursorState<R> {
    Unopened(Opener<R>),
    Open(R),
    Released,
}

pub(crate) struct LineCursor<R> {
    path: PathBuf,
    state: CursorState<R>,
    termination: Option<Termination>,
}

impl<R: LineReader> LineCursor<R> {
    pub(crate) fn open(path: PathBuf, reader: R) -> Self {
        Self {
            path,
            state: CursorState::Open(reader),
            termination: None,
        }
    }

    pub(crate) fn deferred(path: PathBuf, opener: Opener<R>) -> Self {
        Self {
            path,
            state: CursorState::Unopened(opener),
            termination: None,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) const fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub(crate) const fn is_terminal(&self) -> bool {
        self.termination.is_some()
    }

    pub(crate) const fn is_open(&self) -> bool {
        matches!(self.state, CursorState::Open(_))
    }

    /// Reads one line, opening a deferred resource first if needed.
    ///
    /// Must not be called once the cursor is terminal.
    pub(crate) fn read_line(&mut self) -> Result<Option<String>, LinesError> {
        if matches!(self.state, CursorState::Unopened(_)) {
            if let CursorState::Unopened(opener) =
                mem::replace(&mut self.state, CursorState::Released)
            {
                self.state = CursorState::Open(opener()?);
                trace_close!("opened {} on first demand", self.path.display());
            }
        }

        match &mut self.state {
            CursorState::Open(reader) => reader
                .read_line()
                .map_err(|error| LinesError::read(self.path.clone(), error)),
            CursorState::Unopened(_) | CursorState::Released => Ok(None),
        }
    }

    /// Marks the cursor terminal and releases the reader.
    ///
    /// Only the first call records `reason` and closes the reader; later calls
    /// return `Ok(())` without touching it.
    pub(crate) fn release(&mut self, reason: Termination) -> Result<(), LinesError> {
        if self.termination.is_some() {
            return Ok(());
        }
        self.termination = Some(reason);

        match mem::replace(&mut self.state, CursorState::Released) {
            CursorState::Open(mut reader) => {
                let result = reader.close();
                debug_log!(Close, 1, "released {} after {}", self.path.display(), reason);
                result.map_err(|error| LinesError::close(self.path.clone(), error))
            }
            CursorState::Unopened(_) | CursorState::Released => Ok(()),
        }
    }

    /// Releases without a caller to report to; close failures are logged at
    /// warn level.
    pub(crate) fn release_quietly(&mut self, reason: Termination) {
        if let Err(error) = self.release(reason) {
            trace_warn!("{error}");
        }
    }
}

impl<R> fmt::Debug for LineCursor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            CursorState::Unopened(_) => "unopened",
            CursorState::Open(_) => "open",
            CursorState::Released => "released",
        };
        f.debug_struct("LineCursor")
            .field("path", &self.path)
            .field("state", &state)
            .field("termination", &self.termination)
            .finish()
    }
}
