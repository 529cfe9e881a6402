//! Character set selection for decoding line sources.

use std::fmt;
use std::str::FromStr;

use encoding_rs::Encoding;

use crate::error::LinesError;

/// Character set used to decode a text resource.
///
/// Labels are resolved through the WHATWG Encoding Standard as implemented by
/// `encoding_rs`, so `"latin1"` and `"iso-8859-1"` resolve to `windows-1252`
/// and `"utf-16"` resolves to little-endian UTF-16. The charset is used
/// opaquely: no detection or byte-order-mark sniffing takes place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Charset {
    encoding: &'static Encoding,
}

impl Charset {
    /// Returns the UTF-8 charset, the default for every line source.
    #[must_use]
    pub fn utf8() -> Self {
        Self {
            encoding: encoding_rs::UTF_8,
        }
    }

    /// Resolves a charset label such as `"utf-8"`, `"latin1"`, or `"shift_jis"`.
    ///
    /// Empty labels and `"."` select UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use lines::Charset;
    ///
    /// assert_eq!(Charset::for_label("UTF8").unwrap(), Charset::utf8());
    /// assert_eq!(Charset::for_label("utf-16le").unwrap().name(), "UTF-16LE");
    /// assert!(Charset::for_label("klingon").is_err());
    /// ```
    pub fn for_label(label: &str) -> Result<Self, LinesError> {
        let normalized = normalize_label(label);
        Encoding::for_label(normalized.as_bytes())
            .map(Self::from_encoding)
            .ok_or_else(|| LinesError::UnsupportedCharset(label.to_owned()))
    }

    /// Wraps an `encoding_rs` encoding.
    #[must_use]
    pub const fn from_encoding(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// Canonical name of the charset.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// The underlying `encoding_rs` encoding.
    #[must_use]
    pub const fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = LinesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::for_label(s)
    }
}

fn normalize_label(label: &str) -> &str {
    let trimmed = label.trim();
    if trimmed.is_empty() || trimmed == "." {
        return "utf-8";
    }
    trimmed
}
