//! Percent-encoding and the bounded multi-pass decoder.
//!
//! Two encode flavors: form style (space becomes `+`, the historical
//! `application/x-www-form-urlencoded` rule) and raw RFC 3986 style (space
//! becomes `%20`). Decoding is permissive: malformed percent sequences pass
//! through and broken UTF-8 is repaired, never an error.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::strand::Strand;

// Form style keeps `-`, `_`, `.` and defers space to the `+` rule.
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b' ');

// RFC 3986 unreserved set: `-`, `_`, `.`, `~`.
const RAW: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Upper bound on decode passes for the `*_multi` loop; malformed input
/// that keeps producing new escapes stops here instead of spinning.
pub const MAX_DECODE_PASSES: usize = 8;

impl Strand {
    /// Form-style percent-encoding: space becomes `+`.
    ///
    /// ```
    /// use strand::Strand;
    /// assert_eq!(Strand::from("fòô bàř").url_encode(), "f%C3%B2%C3%B4+b%C3%A0%C5%99");
    /// ```
    pub fn url_encode(&self) -> Self {
        let encoded = utf8_percent_encode(self.as_str(), FORM).to_string();
        self.derive(encoded.replace(' ', "+"))
    }

    /// Raw RFC 3986 percent-encoding: space becomes `%20`.
    pub fn url_encode_raw(&self) -> Self {
        self.derive(utf8_percent_encode(self.as_str(), RAW).to_string())
    }

    /// Decodes form-style percent-encoding (`+` is a space).
    pub fn url_decode(&self) -> Self {
        let plus_restored = self.as_str().replace('+', " ");
        self.derive(
            percent_decode_str(&plus_restored)
                .decode_utf8_lossy()
                .into_owned(),
        )
    }

    /// Decodes raw percent-encoding (`+` is literal).
    pub fn url_decode_raw(&self) -> Self {
        self.derive(
            percent_decode_str(self.as_str())
                .decode_utf8_lossy()
                .into_owned(),
        )
    }

    /// Repeatedly decodes until the text is stable: each pass resolves
    /// HTML entities, percent-escapes (form style) and JavaScript `\uXXXX`
    /// escapes. Bounded by [`MAX_DECODE_PASSES`] so adversarial input
    /// cannot loop forever.
    ///
    /// ```
    /// use strand::Strand;
    /// // Double-encoded: %25 is '%', so one layer hides another.
    /// assert_eq!(Strand::from("a%2520b").url_decode_multi(), "a b");
    /// assert_eq!(Strand::from("\\u0066oo&amp;lt;").url_decode_multi(), "foo<");
    /// ```
    pub fn url_decode_multi(&self) -> Self {
        self.decode_until_stable(true)
    }

    /// Like [`url_decode_multi`](Self::url_decode_multi) but `+` stays
    /// literal.
    pub fn url_decode_raw_multi(&self) -> Self {
        self.decode_until_stable(false)
    }

    // The two-state decode loop: another pass while a pass changed the
    // text, stable (or the pass cap) otherwise.
    fn decode_until_stable(&self, plus_is_space: bool) -> Self {
        let mut current = self.as_str().to_owned();
        for _ in 0..MAX_DECODE_PASSES {
            let mut next = html_escape::decode_html_entities(&current).into_owned();
            if plus_is_space {
                next = next.replace('+', " ");
            }
            next = percent_decode_str(&next).decode_utf8_lossy().into_owned();
            next = decode_js_escapes(&next);
            if next == current {
                break;
            }
            current = next;
        }
        self.derive(current)
    }
}

// Resolve JavaScript-style `\uXXXX` escapes, pairing surrogates when both
// halves are present. Malformed escapes pass through verbatim.
fn decode_js_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("\\u") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match parse_unit(&rest[2..]) {
            Some(unit) => {
                rest = &rest[6..];
                if (0xD800..0xDC00).contains(&unit) {
                    // High surrogate: consume the low half if it follows.
                    if let Some(low) = rest.strip_prefix("\\u").and_then(parse_unit) {
                        if (0xDC00..0xE000).contains(&low) {
                            let combined =
                                0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                            if let Some(c) = char::from_u32(combined) {
                                out.push(c);
                                rest = &rest[6..];
                                continue;
                            }
                        }
                    }
                    out.push('\u{FFFD}');
                } else {
                    match char::from_u32(unit) {
                        Some(c) => out.push(c),
                        None => out.push('\u{FFFD}'),
                    }
                }
            }
            None => {
                out.push_str("\\u");
                rest = &rest[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn parse_unit(text: &str) -> Option<u32> {
    let hex = text.get(..4)?;
    if hex.chars().all(|c| c.is_ascii_hexdigit()) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        None
    }
}
