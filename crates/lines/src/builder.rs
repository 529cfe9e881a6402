use std::path::PathBuf;

use logging::debug_log;

use crate::charset::Charset;
use crate::error::LinesError;
use crate::producer::LineProducer;
use crate::reader::FileLineReader;

/// Configures a line sequence over a file.
///
/// ```no_run
/// use lines::{Charset, LinesBuilder};
///
/// # fn demo() -> Result<(), lines::LinesError> {
/// let producer = LinesBuilder::new("notes.txt")
///     .charset(Charset::for_label("latin1")?)
///     .open()?;
/// for line in producer {
///     println!("{}", line?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LinesBuilder {
    path: PathBuf,
    charset: Charset,
    deferred: bool,
}

impl LinesBuilder {
    /// Creates a builder for the file at `path`, decoded as UTF-8.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            charset: Charset::utf8(),
            deferred: false,
        }
    }

    /// Sets the charset used to decode the file.
    #[must_use]
    pub const fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Postpones opening the file until the first unit of demand.
    ///
    /// When enabled, [`open`](Self::open) never fails; an open failure is
    /// delivered as the sequence's error instead.
    #[must_use]
    pub const fn deferred(mut self, deferred: bool) -> Self {
        self.deferred = deferred;
        self
    }

    /// Builds the producer, opening the file now unless deferred.
    pub fn open(self) -> Result<LineProducer<FileLineReader>, LinesError> {
        let Self {
            path,
            charset,
            deferred,
        } = self;

        if deferred {
            debug_log!(Io, 2, "deferring open of {}", path.display());
            let target = path.clone();
            return Ok(LineProducer::deferred(path, move || {
                FileLineReader::open(&target, charset)
                    .map_err(|error| LinesError::open(target.clone(), error))
            }));
        }

        let reader = FileLineReader::open(&path, charset)
            .map_err(|error| LinesError::open(path.clone(), error))?;
        debug_log!(Io, 1, "opened {}", path.display());
        Ok(LineProducer::new(reader, path))
    }
}
