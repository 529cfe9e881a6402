//! The read-line/close capability consumed by [`LineProducer`](crate::LineProducer).

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use encoding_rs::{Decoder, DecoderResult};
use logging::{debug_log, trace_iconv};

use crate::charset::Charset;

const CHUNK_SIZE: usize = 8 * 1024;

/// A stateful, line-oriented input.
///
/// Implementations yield lines without their terminators and report the end
/// of input as `Ok(None)`. [`close`](Self::close) releases the underlying
/// resource; the producer guarantees it is called at most once, and never
/// calls [`read_line`](Self::read_line) afterwards.
pub trait LineReader {
    /// Reads the next line, or `None` once the input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Releases the underlying resource.
    fn close(&mut self) -> io::Result<()>;
}

impl<R: LineReader + ?Sized> LineReader for Box<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Line reader over any byte source, decoding with a [`Charset`].
///
/// `\n`, `\r\n`, and a lone `\r` all terminate a line. A terminator at the
/// very end of the input does not produce a trailing empty line. Bytes that
/// are malformed in the configured charset surface as an
/// [`io::ErrorKind::InvalidData`] error rather than being replaced.
pub struct DecodingLineReader<R> {
    inner: Option<R>,
    charset: Charset,
    decoder: Decoder,
    raw: Box<[u8]>,
    pending: String,
    scan_from: usize,
    eof: bool,
    malformed: Option<String>,
}

/// [`DecodingLineReader`] over an open file.
pub type FileLineReader = DecodingLineReader<File>;

impl FileLineReader {
    /// Opens `path` for reading with the given charset.
    pub fn open(path: &Path, charset: Charset) -> io::Result<Self> {
        let file = File::open(path)?;
        debug_log!(Iconv, 1, "decoding {} as {}", path.display(), charset);
        Ok(Self::new(file, charset))
    }
}

impl<R: Read> DecodingLineReader<R> {
    /// Wraps `inner`, decoding its bytes with `charset`.
    pub fn new(inner: R, charset: Charset) -> Self {
        Self {
            inner: Some(inner),
            charset,
            decoder: charset.encoding().new_decoder_without_bom_handling(),
            raw: vec![0; CHUNK_SIZE].into_boxed_slice(),
            pending: String::new(),
            scan_from: 0,
            eof: false,
            malformed: None,
        }
    }

    /// The charset used for decoding.
    pub const fn charset(&self) -> Charset {
        self.charset
    }

    /// Reports whether [`close`](LineReader::close) has released the source.
    pub const fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    fn fill(&mut self) -> io::Result<()> {
        let inner = self
            .inner
            .as_mut()
            .ok_or_else(|| io::Error::other("line reader already closed"))?;
        let read = loop {
            match inner.read(&mut self.raw) {
                Ok(read) => break read,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(error),
            }
        };

        let last = read == 0;
        // Text decoded before a malformed sequence is still handed out; the
        // failure surfaces once it has been consumed.
        if let Err(message) = decode_into(
            &mut self.decoder,
            &mut self.pending,
            &self.raw[..read],
            last,
            self.charset,
        ) {
            trace_iconv!("{message}; pending text will be drained first");
            self.malformed = Some(message);
        }
        self.eof = last;
        Ok(())
    }
}

impl<R: Read> LineReader for DecodingLineReader<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        loop {
            let found = self.pending[self.scan_from..]
                .find(|c: char| c == '\n' || c == '\r')
                .map(|offset| self.scan_from + offset);

            if let Some(end) = found {
                let bytes = self.pending.as_bytes();
                let mut consumed = end + 1;
                if bytes[end] == b'\r' {
                    if consumed == bytes.len() && !self.eof && self.malformed.is_none() {
                        // A '\n' may follow in the next chunk.
                        self.scan_from = end;
                        self.fill()?;
                        continue;
                    }
                    if bytes.get(consumed) == Some(&b'\n') {
                        consumed += 1;
                    }
                }
                let line = self.pending[..end].to_owned();
                self.pending.drain(..consumed);
                self.scan_from = 0;
                return Ok(Some(line));
            }

            if let Some(message) = &self.malformed {
                return Err(io::Error::new(io::ErrorKind::InvalidData, message.clone()));
            }
            self.scan_from = self.pending.len();
            if self.eof {
                self.scan_from = 0;
                if self.pending.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(std::mem::take(&mut self.pending)));
            }
            self.fill()?;
        }
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner = None;
        self.pending = String::new();
        self.scan_from = 0;
        Ok(())
    }
}

fn decode_into(
    decoder: &mut Decoder,
    pending: &mut String,
    mut input: &[u8],
    last: bool,
    charset: Charset,
) -> Result<(), String> {
    loop {
        let needed = decoder
            .max_utf8_buffer_length_without_replacement(input.len())
            .unwrap_or(input.len().saturating_mul(3).saturating_add(16));
        pending.reserve(needed);

        let (result, read) = decoder.decode_to_string_without_replacement(input, pending, last);
        input = &input[read..];
        match result {
            DecoderResult::InputEmpty => return Ok(()),
            DecoderResult::OutputFull => {}
            DecoderResult::Malformed(_, _) => return Err(format!("malformed {charset} input")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all<R: Read>(mut reader: DecodingLineReader<R>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = reader.read_line().expect("read line") {
            lines.push(line);
        }
        lines
    }

    fn utf8(bytes: &[u8]) -> DecodingLineReader<Cursor<Vec<u8>>> {
        DecodingLineReader::new(Cursor::new(bytes.to_vec()), Charset::utf8())
    }

    /// Feeds its bytes one at a time to exercise chunk boundaries.
    struct Trickle(Cursor<Vec<u8>>);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let len = buf.len().min(1);
            self.0.read(&mut buf[..len])
        }
    }

    #[test]
    fn splits_on_every_terminator_style() {
        let lines = read_all(utf8(b"unix\nwindows\r\nmac\rlast"));
        assert_eq!(lines, ["unix", "windows", "mac", "last"]);
    }

    #[test]
    fn trailing_terminator_does_not_add_empty_line() {
        assert_eq!(read_all(utf8(b"one\ntwo\n")), ["one", "two"]);
        assert_eq!(read_all(utf8(b"one\r\n")), ["one"]);
    }

    #[test]
    fn blank_lines_are_preserved() {
        assert_eq!(read_all(utf8(b"\n\nx\n\n")), ["", "", "x", ""]);
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(read_all(utf8(b"")).is_empty());
    }

    #[test]
    fn crlf_split_across_reads_is_one_terminator() {
        let reader = DecodingLineReader::new(
            Trickle(Cursor::new(b"a\r\nb\r\n\rc".to_vec())),
            Charset::utf8(),
        );
        assert_eq!(read_all(reader), ["a", "b", "", "c"]);
    }

    #[test]
    fn multibyte_sequences_survive_chunk_boundaries() {
        let text = "héllo wörld\n日本語\n";
        let reader = DecodingLineReader::new(
            Trickle(Cursor::new(text.as_bytes().to_vec())),
            Charset::utf8(),
        );
        assert_eq!(read_all(reader), ["héllo wörld", "日本語"]);
    }

    #[test]
    fn decodes_with_supplied_charset() {
        let latin = Charset::for_label("latin1").unwrap();
        let reader = DecodingLineReader::new(Cursor::new(b"caf\xe9\nna\xefve".to_vec()), latin);
        assert_eq!(read_all(reader), ["café", "naïve"]);

        let utf16 = Charset::for_label("utf-16le").unwrap();
        let bytes: Vec<u8> = "a\nb".encode_utf16().flat_map(u16::to_le_bytes).collect();
        let reader = DecodingLineReader::new(Cursor::new(bytes), utf16);
        assert_eq!(read_all(reader), ["a", "b"]);
    }

    #[test]
    fn utf8_bom_is_kept_as_content() {
        let lines = read_all(utf8(b"\xef\xbb\xbfhead\n"));
        assert_eq!(lines, ["\u{feff}head"]);
    }

    #[test]
    fn malformed_input_is_invalid_data() {
        let mut reader = utf8(b"ok\n\xff\xfe bad\n");
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("ok"));
        let error = reader.read_line().expect_err("malformed input");
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
        assert!(error.to_string().contains("UTF-8"));

        let again = reader.read_line().expect_err("failure is sticky");
        assert_eq!(again.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn long_lines_span_many_chunks() {
        let long = "x".repeat(CHUNK_SIZE * 3 + 7);
        let input = format!("{long}\nshort");
        assert_eq!(read_all(utf8(input.as_bytes())), [long.as_str(), "short"]);
    }

    #[test]
    fn close_releases_source_and_blocks_reads() {
        let mut reader = utf8(b"one\ntwo\n");
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("one"));
        reader.close().unwrap();
        assert!(reader.is_closed());
        reader.close().unwrap();
        assert!(reader.read_line().is_err());
    }
}
