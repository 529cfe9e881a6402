//! Demand-driven producer that turns a [`LineReader`] into a pull sequence.

use std::fmt;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use logging::{debug_log, trace_io};

use crate::cursor::{LineCursor, Termination};
use crate::error::LinesError;
use crate::reader::LineReader;

/// Demand value that never runs out.
///
/// Requests are accumulated with saturating addition, so once outstanding
/// demand reaches `UNBOUNDED` it stays there until the sequence terminates.
pub const UNBOUNDED: u64 = u64::MAX;

/// What a subscriber wants after receiving a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Keep going with the demand already outstanding.
    Continue,
    /// Add this many units to the outstanding demand.
    Request(u64),
    /// Stop: release the resource and emit nothing further.
    Cancel,
}

/// Receiver of the signals produced by [`LineProducer::request`].
///
/// Exactly one of [`on_error`](Self::on_error) or
/// [`on_complete`](Self::on_complete) is delivered per sequence, unless the
/// sequence is cancelled or disposed first, in which case neither is.
pub trait LineSubscriber {
    /// Receives the next line.
    fn on_next(&mut self, line: String) -> Signal;

    /// Receives the failure that terminated the sequence.
    fn on_error(&mut self, error: LinesError);

    /// Signals that the resource was exhausted and released.
    fn on_complete(&mut self);
}

/// A demand-driven sequence of lines read from one resource.
///
/// Each unit of demand registered through [`request`](Self::request) reads at
/// most one line. Demand is cumulative and is satisfied synchronously on the
/// calling thread; with no outstanding demand the producer does nothing.
///
/// The resource is released exactly once, by whichever of these happens
/// first: end of input, a read failure, [`cancel`](Self::cancel),
/// [`dispose`](Self::dispose), or dropping the producer. A producer that is
/// never consumed still releases its resource when dropped.
///
/// The producer is also an [`Iterator`]; each call to `next` is a request for
/// one line.
pub struct LineProducer<R: LineReader> {
    cursor: LineCursor<R>,
    outstanding: u64,
    emitted: u64,
}

impl<R: LineReader> LineProducer<R> {
    /// Creates a producer over an already-open reader.
    ///
    /// `path` identifies the resource in errors and diagnostics.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self::with_cursor(LineCursor::open(path.into(), reader))
    }

    /// Creates a producer that calls `opener` on the first unit of demand.
    ///
    /// An open failure is delivered through [`LineSubscriber::on_error`]. If
    /// no demand ever arrives, nothing is opened.
    pub fn deferred<F>(path: impl Into<PathBuf>, opener: F) -> Self
    where
        F: FnOnce() -> Result<R, LinesError> + Send + 'static,
    {
        Self::with_cursor(LineCursor::deferred(path.into(), Box::new(opener)))
    }

    const fn with_cursor(cursor: LineCursor<R>) -> Self {
        Self {
            cursor,
            outstanding: 0,
            emitted: 0,
        }
    }

    /// Registers `n` more units of demand and satisfies as much of it as the
    /// resource allows, delivering signals to `subscriber`.
    ///
    /// Requests made after the sequence has terminated are ignored.
    pub fn request<S>(&mut self, n: u64, subscriber: &mut S)
    where
        S: LineSubscriber + ?Sized,
    {
        if let Some(termination) = self.cursor.termination() {
            debug_log!(
                Io,
                2,
                "ignoring request({n}) on {}: terminated by {termination}",
                self.cursor.path().display()
            );
            return;
        }
        self.add_demand(n);
        self.drain(subscriber);
    }

    /// Cancels the sequence and releases the resource.
    ///
    /// Calling this again, or after the sequence already terminated, is a
    /// no-op returning `Ok(())`. A close failure is returned only from the
    /// call that actually released the resource.
    pub fn cancel(&mut self) -> Result<(), LinesError> {
        self.outstanding = 0;
        self.cursor.release(Termination::Cancelled)
    }

    /// Tears the sequence down on behalf of the hosting runtime.
    ///
    /// Idempotent. Close failures are logged rather than returned.
    pub fn dispose(&mut self) {
        self.outstanding = 0;
        self.cursor.release_quietly(Termination::Disposed);
    }

    /// The path identifying the resource.
    pub fn path(&self) -> &Path {
        self.cursor.path()
    }

    /// Which terminal path fired, if any has.
    pub const fn termination(&self) -> Option<Termination> {
        self.cursor.termination()
    }

    /// Reports whether the sequence has terminated.
    pub const fn is_terminal(&self) -> bool {
        self.cursor.is_terminal()
    }

    /// Reports whether the resource is currently held open.
    pub const fn is_open(&self) -> bool {
        self.cursor.is_open()
    }

    /// Demand registered but not yet satisfied.
    pub const fn outstanding(&self) -> u64 {
        self.outstanding
    }

    /// Number of lines delivered so far.
    pub const fn emitted(&self) -> u64 {
        self.emitted
    }

    fn add_demand(&mut self, n: u64) {
        self.outstanding = self.outstanding.saturating_add(n);
    }

    fn drain<S>(&mut self, subscriber: &mut S)
    where
        S: LineSubscriber + ?Sized,
    {
        // Exhaustion is checked on every iteration, even under UNBOUNDED demand.
        while self.outstanding > 0 {
            match self.cursor.read_line() {
                Ok(Some(line)) => {
                    if self.outstanding != UNBOUNDED {
                        self.outstanding -= 1;
                    }
                    self.emitted += 1;
                    trace_io!("line {} of {}", self.emitted, self.cursor.path().display());

                    match subscriber.on_next(line) {
                        Signal::Continue => {}
                        Signal::Request(more) => self.add_demand(more),
                        Signal::Cancel => {
                            self.outstanding = 0;
                            self.cursor.release_quietly(Termination::Cancelled);
                            return;
                        }
                    }
                }
                Ok(None) => {
                    self.outstanding = 0;
                    debug_log!(
                        Io,
                        1,
                        "{} exhausted after {} lines",
                        self.cursor.path().display(),
                        self.emitted
                    );
                    match self.cursor.release(Termination::Completed) {
                        Ok(()) => subscriber.on_complete(),
                        Err(error) => subscriber.on_error(error),
                    }
                    return;
                }
                Err(error) => {
                    self.outstanding = 0;
                    self.cursor.release_quietly(Termination::Failed);
                    subscriber.on_error(error);
                    return;
                }
            }
        }
    }
}

impl<R: LineReader> Drop for LineProducer<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<R: LineReader> fmt::Debug for LineProducer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineProducer")
            .field("cursor", &self.cursor)
            .field("outstanding", &self.outstanding)
            .field("emitted", &self.emitted)
            .finish()
    }
}

impl<R: LineReader> Iterator for LineProducer<R> {
    type Item = Result<String, LinesError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut slot = NextLine::default();
        self.request(1, &mut slot);
        slot.item
    }
}

impl<R: LineReader> FusedIterator for LineProducer<R> {}

#[derive(Default)]
struct NextLine {
    item: Option<Result<String, LinesError>>,
}

impl LineSubscriber for NextLine {
    fn on_next(&mut self, line: String) -> Signal {
        self.item = Some(Ok(line));
        Signal::Continue
    }

    fn on_error(&mut self, error: LinesError) {
        self.item = Some(Err(error));
    }

    fn on_complete(&mut self) {}
}

/// Subscriber that buffers everything it receives.
#[derive(Debug, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
    completed: bool,
    error: Option<LinesError>,
}

impl LineBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines received so far, in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Reports whether normal completion was signalled.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// The terminating failure, if one was signalled.
    #[must_use]
    pub const fn error(&self) -> Option<&LinesError> {
        self.error.as_ref()
    }

    /// Consumes the buffer, returning the received lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl LineSubscriber for LineBuffer {
    fn on_next(&mut self, line: String) -> Signal {
        self.lines.push(line);
        Signal::Continue
    }

    fn on_error(&mut self, error: LinesError) {
        self.error = Some(error);
    }

    fn on_complete(&mut self) {
        self.completed = true;
    }
}
