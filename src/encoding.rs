//! The encoding context carried by every string value.
//!
//! Every [`Strand`](crate::Strand) is tagged with exactly one [`Encoding`]
//! resolved at construction time. Derived values copy the tag; only an
//! explicit re-encode replaces it. The process-wide default is UTF-8 and may
//! be overridden once, at startup, via [`set_default_encoding`].
//!
//! # Example
//!
//! ```
//! use strand::Encoding;
//!
//! assert_eq!(Encoding::Utf8.label(), "UTF-8");
//! assert_eq!("iso-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
//!
//! // Byte validation reports the first invalid offset.
//! assert!(Encoding::Utf8.validate(b"hello").is_ok());
//! assert_eq!(Encoding::Ascii.validate(b"a\xffb"), Err(1));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{Error, Result};

static DEFAULT_ENCODING: OnceLock<Encoding> = OnceLock::new();

/// A named character encoding governing how byte payloads become text.
///
/// Internally every [`Strand`](crate::Strand) stores valid UTF-8; the
/// encoding context determines how bytes are interpreted at construction,
/// how [`to_bytes`](crate::Strand::to_bytes) serializes the value back out,
/// and which tag derived values inherit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum Encoding {
    /// UTF-8, the default.
    #[default]
    Utf8,
    /// 7-bit US-ASCII.
    Ascii,
    /// ISO-8859-1 (Latin-1), a single-byte superset of ASCII.
    Latin1,
    /// "HTML-ENTITIES", a pseudo-encoding for entity-encoded ASCII text.
    HtmlEntities,
}

impl Encoding {
    /// Returns the canonical label for this encoding.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "ASCII",
            Self::Latin1 => "ISO-8859-1",
            Self::HtmlEntities => "HTML-ENTITIES",
        }
    }

    /// Resolves an optional explicit encoding against the process default.
    ///
    /// Returns `explicit` when provided, otherwise [`default_encoding`].
    #[inline]
    pub fn resolve(explicit: Option<Encoding>) -> Encoding {
        explicit.unwrap_or_else(default_encoding)
    }

    /// Validates that `bytes` form a well-encoded sequence.
    ///
    /// Returns `Err(offset)` with the first invalid byte offset.
    pub fn validate(self, bytes: &[u8]) -> std::result::Result<(), usize> {
        match self {
            Self::Utf8 | Self::HtmlEntities => match std::str::from_utf8(bytes) {
                Ok(_) => Ok(()),
                Err(e) => Err(e.valid_up_to()),
            },
            Self::Ascii => match bytes.iter().position(|&b| b >= 0x80) {
                None => Ok(()),
                Some(offset) => Err(offset),
            },
            // Every byte is a valid Latin-1 character.
            Self::Latin1 => Ok(()),
        }
    }

    /// Decodes `bytes` into text under this encoding.
    ///
    /// Fails with [`Error::InvalidInput`] naming the first invalid offset.
    /// For `HtmlEntities`, named and numeric character references in the
    /// payload are resolved as part of decoding.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        if let Err(offset) = self.validate(bytes) {
            return Err(Error::invalid_input(format!(
                "byte at offset {} is not valid {}",
                offset,
                self.label()
            )));
        }
        Ok(self.decode_valid(bytes))
    }

    /// Decodes `bytes`, replacing invalid sequences with U+FFFD.
    ///
    /// This is the "make it valid" repair used by lossy construction; it
    /// never fails.
    pub fn decode_lossy(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Ascii => bytes
                .iter()
                .map(|&b| if b < 0x80 { b as char } else { '\u{FFFD}' })
                .collect(),
            Self::Latin1 => self.decode_valid(bytes),
            Self::HtmlEntities => {
                let text = String::from_utf8_lossy(bytes);
                html_escape::decode_html_entities(text.as_ref()).into_owned()
            }
        }
    }

    /// Encodes `text` into bytes under this encoding.
    ///
    /// Codepoints the encoding cannot represent become `b'?'` in the
    /// single-byte encodings and numeric character references under
    /// `HtmlEntities`. Encoding never fails; construction is where invalid
    /// data is rejected.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Ascii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
            Self::Latin1 => text
                .chars()
                .map(|c| if (c as u32) <= 0xFF { c as u8 } else { b'?' })
                .collect(),
            Self::HtmlEntities => {
                let mut out = Vec::with_capacity(text.len());
                for c in text.chars() {
                    if c.is_ascii() {
                        out.push(c as u8);
                    } else {
                        out.extend_from_slice(format!("&#{};", c as u32).as_bytes());
                    }
                }
                out
            }
        }
    }

    /// Returns `true` if this encoding can represent `c` without loss.
    #[inline]
    pub fn can_encode(self, c: char) -> bool {
        match self {
            Self::Utf8 | Self::HtmlEntities => true,
            Self::Ascii => c.is_ascii(),
            Self::Latin1 => (c as u32) <= 0xFF,
        }
    }

    // Decode bytes already known to satisfy `validate`.
    fn decode_valid(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 | Self::Ascii => {
                debug_assert!(std::str::from_utf8(bytes).is_ok());
                String::from_utf8_lossy(bytes).into_owned()
            }
            Self::Latin1 => bytes.iter().map(|&b| b as char).collect(),
            Self::HtmlEntities => {
                let text = String::from_utf8_lossy(bytes);
                html_escape::decode_html_entities(text.as_ref()).into_owned()
            }
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    /// Parses a canonical label or common alias, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            "iso-8859-1" | "iso8859-1" | "latin-1" | "latin1" => Ok(Self::Latin1),
            "html-entities" => Ok(Self::HtmlEntities),
            _ => Err(Error::invalid_argument(format!(
                "unknown encoding label {s:?}"
            ))),
        }
    }
}

/// Returns the process-wide default encoding.
///
/// UTF-8 unless [`set_default_encoding`] was called before any read.
#[inline]
pub fn default_encoding() -> Encoding {
    *DEFAULT_ENCODING.get_or_init(|| Encoding::Utf8)
}

/// Sets the process-wide default encoding.
///
/// This is a set-once configuration value: the first write (or first read,
/// which pins UTF-8) wins and later calls have no effect. Returns `true` if
/// this call established the default.
pub fn set_default_encoding(encoding: Encoding) -> bool {
    DEFAULT_ENCODING.set(encoding).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for enc in [
            Encoding::Utf8,
            Encoding::Ascii,
            Encoding::Latin1,
            Encoding::HtmlEntities,
        ] {
            assert_eq!(enc.label().parse::<Encoding>().unwrap(), enc);
        }
    }

    #[test]
    fn aliases_parse() {
        assert_eq!("latin1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!("US-ASCII".parse::<Encoding>().unwrap(), Encoding::Ascii);
        assert_eq!("utf8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert!("koi8-r".parse::<Encoding>().is_err());
    }

    #[test]
    fn latin1_decodes_every_byte() {
        let all: Vec<u8> = (0u8..=255).collect();
        let text = Encoding::Latin1.decode(&all).unwrap();
        assert_eq!(text.chars().count(), 256);
        assert_eq!(text.chars().last(), Some('\u{FF}'));
    }

    #[test]
    fn ascii_rejects_high_bytes_with_offset() {
        assert_eq!(Encoding::Ascii.validate(b"ab\x80"), Err(2));
        let err = Encoding::Ascii.decode(b"ab\x80").unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn html_entities_decode_resolves_references() {
        let text = Encoding::HtmlEntities.decode(b"f&ograve;&#xF4;").unwrap();
        assert_eq!(text, "f\u{F2}\u{F4}");
    }

    #[test]
    fn encode_substitutes_unmappable() {
        assert_eq!(Encoding::Ascii.encode("fòô"), b"f??".to_vec());
        assert_eq!(Encoding::Latin1.encode("fò\u{4E16}"), b"f\xF2?".to_vec());
        assert_eq!(
            Encoding::HtmlEntities.encode("aò"),
            b"a&#242;".to_vec()
        );
    }

    #[test]
    fn lossy_repair_never_fails() {
        assert_eq!(Encoding::Utf8.decode_lossy(b"a\xff"), "a\u{FFFD}");
        assert_eq!(Encoding::Ascii.decode_lossy(b"a\xff"), "a\u{FFFD}");
    }
}
