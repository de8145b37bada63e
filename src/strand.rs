//! The immutable, encoding-tagged string value.
//!
//! [`Strand`] wraps a raw character sequence plus its [`Encoding`] context.
//! Every transformation returns a new `Strand`; the receiver is never
//! altered, so a held value still reports its original content after any
//! amount of chaining.
//!
//! # Example
//!
//! ```
//! use strand::Strand;
//!
//! let s = Strand::from("fòô bàř");
//! assert_eq!(s.length(), 7);
//! assert_eq!(s.first(3), "fòô");
//! assert_eq!(s.reverse(), "řàb ôòf");
//! // The original is untouched.
//! assert_eq!(s, "fòô bàř");
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use rand::seq::SliceRandom;
use unicode_segmentation::UnicodeSegmentation;

use crate::collection::Strands;
use crate::encoding::Encoding;
use crate::error::{Error, Result};

/// The closed set of value shapes a [`Strand`] can be constructed from.
///
/// Scalar shapes convert by canonical textual rules: `Null` and `false`
/// become the empty string, `true` becomes `"1"`, numbers become their
/// decimal text. The one fallible arm is `Bytes`, which must decode under
/// the target encoding.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Source {
    /// Already-textual input.
    Text(String),
    /// A signed integer, rendered as decimal text.
    Integer(i64),
    /// A float, rendered as decimal text.
    Float(f64),
    /// `true` renders as `"1"`, `false` as `""`.
    Boolean(bool),
    /// Renders as the empty string.
    Null,
    /// A raw byte payload, decoded under the strand's encoding.
    Bytes(Vec<u8>),
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<char> for Source {
    fn from(value: char) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for Source {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Source {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for Source {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Source {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Source {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<()> for Source {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<Vec<u8>> for Source {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for Source {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

/// An immutable string value carrying its encoding context.
///
/// Equality, ordering and hashing consider raw content only; the encoding
/// tag is informational and travels with derived values.
#[derive(Debug, Clone, Default)]
pub struct Strand {
    raw: String,
    encoding: Encoding,
}

impl Strand {
    // === Construction ===

    /// Creates a strand from any [`Source`]-convertible value under the
    /// process default encoding.
    ///
    /// Fails with [`Error::InvalidInput`] only for byte payloads that are
    /// not valid in that encoding.
    ///
    /// # Example
    ///
    /// ```
    /// use strand::Strand;
    ///
    /// assert_eq!(Strand::new("foo").unwrap(), "foo");
    /// assert_eq!(Strand::new(42).unwrap(), "42");
    /// assert_eq!(Strand::new(true).unwrap(), "1");
    /// assert_eq!(Strand::new(false).unwrap(), "");
    /// assert_eq!(Strand::new(()).unwrap(), "");
    /// ```
    pub fn new(value: impl Into<Source>) -> Result<Self> {
        Self::with_encoding(value, Encoding::resolve(None))
    }

    /// Creates a strand under an explicit encoding.
    pub fn with_encoding(value: impl Into<Source>, encoding: Encoding) -> Result<Self> {
        let raw = match value.into() {
            Source::Text(s) => s,
            Source::Integer(n) => n.to_string(),
            Source::Float(x) => x.to_string(),
            Source::Boolean(true) => "1".to_owned(),
            Source::Boolean(false) | Source::Null => String::new(),
            Source::Bytes(bytes) => encoding.decode(&bytes)?,
        };
        Ok(Self { raw, encoding })
    }

    /// Creates a strand by decoding `bytes` under `encoding`.
    ///
    /// Fails with [`Error::InvalidInput`] naming the first invalid offset.
    pub fn from_bytes(bytes: Vec<u8>, encoding: Encoding) -> Result<Self> {
        Ok(Self {
            raw: encoding.decode(&bytes)?,
            encoding,
        })
    }

    /// Creates a strand by decoding `bytes`, repairing invalid sequences
    /// with U+FFFD instead of failing.
    pub fn from_bytes_lossy(bytes: &[u8], encoding: Encoding) -> Self {
        Self {
            raw: encoding.decode_lossy(bytes),
            encoding,
        }
    }

    /// Creates a strand from any value with a textual representation.
    pub fn from_display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Self {
            raw: value.to_string(),
            encoding: Encoding::resolve(None),
        }
    }

    // A derived value: new content, same encoding context.
    #[inline]
    pub(crate) fn derive(&self, raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            encoding: self.encoding,
        }
    }

    // === Encoding context ===

    /// Returns the encoding context of this strand.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Returns a strand with the same content re-tagged under a different
    /// encoding context.
    ///
    /// This is the one operation that replaces an encoding rather than
    /// propagating it; it affects [`to_bytes`](Self::to_bytes) and the tag
    /// inherited by derived values.
    pub fn re_encode(&self, encoding: Encoding) -> Self {
        Self {
            raw: self.raw.clone(),
            encoding,
        }
    }

    // === Extraction ===

    /// Returns the underlying text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consumes the strand, returning the underlying text.
    #[inline]
    pub fn into_string(self) -> String {
        self.raw
    }

    /// Serializes the content as bytes under the strand's encoding.
    ///
    /// Codepoints the encoding cannot represent are substituted, never
    /// dropped silently mid-sequence; see [`Encoding::encode`].
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encoding.encode(&self.raw)
    }

    // === Length ===

    /// Returns the number of codepoints (not bytes).
    ///
    /// ```
    /// use strand::Strand;
    /// assert_eq!(Strand::from("fòô").length(), 3);
    /// ```
    #[inline]
    pub fn length(&self) -> usize {
        self.raw.chars().count()
    }

    /// Returns the length of the underlying text in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the strand contains no codepoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    // === Indexed access ===

    /// Returns the codepoint at `index` as a one-character strand.
    ///
    /// Permissive: a negative or out-of-range index yields an empty strand
    /// rather than an error, so fluent chains treat it as a normal
    /// "no match" outcome.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("fòô bàř");
    /// assert_eq!(s.at(1), "ò");
    /// assert_eq!(s.at(7), "");
    /// assert_eq!(s.at(-1), "");
    /// ```
    pub fn at(&self, index: isize) -> Self {
        if index < 0 {
            return self.derive("");
        }
        match self.raw.chars().nth(index as usize) {
            Some(c) => self.derive(c.to_string()),
            None => self.derive(""),
        }
    }

    /// Strict indexed read: returns the codepoint at `index`.
    ///
    /// A negative index counts from the end. Reading at or beyond the
    /// length fails with [`Error::OutOfBounds`], the strict counterpart to
    /// the permissive [`at`](Self::at).
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("fòô bàř");
    /// assert_eq!(s.char_at(0).unwrap(), 'f');
    /// assert_eq!(s.char_at(-1).unwrap(), 'ř');
    /// assert!(s.char_at(7).is_err());
    /// ```
    pub fn char_at(&self, index: isize) -> Result<char> {
        let length = self.length();
        let resolved = if index < 0 {
            let back = index.unsigned_abs();
            if back > length {
                return Err(Error::out_of_bounds(index, length));
            }
            length - back
        } else {
            index as usize
        };
        self.raw
            .chars()
            .nth(resolved)
            .ok_or_else(|| Error::out_of_bounds(index, length))
    }

    /// Indexed assignment is unconditionally rejected.
    ///
    /// The value is immutable; this exists so that an attempted write has a
    /// defined error instead of a mutated value. Use
    /// [`insert`](Self::insert) or the replacement family to build a new
    /// strand instead.
    pub fn set_at(&self, _index: isize, _c: char) -> Result<Self> {
        Err(Error::ImmutableViolation)
    }

    /// Indexed deletion is unconditionally rejected, like
    /// [`set_at`](Self::set_at).
    pub fn delete_at(&self, _index: isize) -> Result<Self> {
        Err(Error::ImmutableViolation)
    }

    // === Slicing ===

    /// Extracts `length` codepoints starting at `start`.
    ///
    /// A negative `start` counts from the end; `None` length takes the
    /// rest. Out-of-range values clamp, producing an empty result rather
    /// than erroring.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("fòô bàř");
    /// assert_eq!(s.substr(4, None), "bàř");
    /// assert_eq!(s.substr(-3, Some(2)), "bà");
    /// assert_eq!(s.substr(99, None), "");
    /// ```
    pub fn substr(&self, start: isize, length: Option<usize>) -> Self {
        let total = self.length();
        let begin = resolve_offset(start, total);
        let taken: String = match length {
            Some(n) => self.raw.chars().skip(begin).take(n).collect(),
            None => self.raw.chars().skip(begin).collect(),
        };
        self.derive(taken)
    }

    /// Extracts the codepoints in `[start, end)`, array-slice style.
    ///
    /// Negative offsets count from the end; `None` end means the length.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("fòô bàř");
    /// assert_eq!(s.slice(0, Some(3)), "fòô");
    /// assert_eq!(s.slice(1, Some(-1)), "òô bà");
    /// ```
    pub fn slice(&self, start: isize, end: Option<isize>) -> Self {
        let total = self.length();
        let begin = resolve_offset(start, total);
        let finish = match end {
            Some(e) => resolve_offset(e, total),
            None => total,
        };
        if begin >= finish {
            return self.derive("");
        }
        let taken: String = self
            .raw
            .chars()
            .skip(begin)
            .take(finish - begin)
            .collect();
        self.derive(taken)
    }

    /// Returns the first `n` codepoints.
    ///
    /// `n <= 0` yields empty; `n >= length` yields the whole value.
    pub fn first(&self, n: isize) -> Self {
        if n <= 0 {
            return self.derive("");
        }
        self.derive(self.raw.chars().take(n as usize).collect::<String>())
    }

    /// Returns the last `n` codepoints.
    ///
    /// `n <= 0` yields empty; `n >= length` yields the whole value.
    pub fn last(&self, n: isize) -> Self {
        if n <= 0 {
            return self.derive("");
        }
        let total = self.length();
        let skip = total.saturating_sub(n as usize);
        self.derive(self.raw.chars().skip(skip).collect::<String>())
    }

    // === Splicing ===

    /// Splices `substring` in at codepoint position `index`.
    ///
    /// An index at or beyond the length appends; nothing is padded.
    ///
    /// ```
    /// use strand::Strand;
    /// assert_eq!(Strand::from("fòř").insert("bà", 2), "fòbàř");
    /// assert_eq!(Strand::from("ab").insert("c", 99), "abc");
    /// ```
    pub fn insert(&self, substring: &str, index: usize) -> Self {
        let byte_at = self.byte_offset_of(index);
        let mut out = String::with_capacity(self.raw.len() + substring.len());
        out.push_str(&self.raw[..byte_at]);
        out.push_str(substring);
        out.push_str(&self.raw[byte_at..]);
        self.derive(out)
    }

    /// Returns `n` concatenated copies; `n <= 0` yields empty.
    pub fn repeat(&self, n: isize) -> Self {
        if n <= 0 {
            return self.derive("");
        }
        self.derive(self.raw.repeat(n as usize))
    }

    /// Reverses codepoint order (never splits a multi-byte sequence).
    ///
    /// ```
    /// use strand::Strand;
    /// assert_eq!(Strand::from("fòô").reverse(), "ôòf");
    /// ```
    pub fn reverse(&self) -> Self {
        self.derive(self.raw.chars().rev().collect::<String>())
    }

    /// Returns a random permutation of the codepoints.
    ///
    /// The multiset of codepoints is preserved; the ordering is not
    /// reproducible.
    pub fn shuffle(&self) -> Self {
        let mut chars: Vec<char> = self.raw.chars().collect();
        chars.shuffle(&mut rand::rng());
        self.derive(chars.into_iter().collect::<String>())
    }

    // === Iteration ===

    /// Returns a restartable iterator over the codepoints.
    ///
    /// Each call starts from the beginning; iterating never consumes the
    /// strand.
    #[inline]
    pub fn chars(&self) -> std::str::Chars<'_> {
        self.raw.chars()
    }

    /// Splits on line terminators (`\n`, `\r\n`), yielding one strand per
    /// line.
    pub fn lines(&self) -> Strands {
        self.raw.lines().map(|line| self.derive(line)).collect()
    }

    /// Splits into extended grapheme clusters, one strand per cluster.
    ///
    /// Unlike [`chars`](Self::chars) this keeps combining sequences
    /// together, so user-perceived characters survive intact.
    pub fn graphemes(&self) -> Strands {
        self.raw
            .graphemes(true)
            .map(|g| self.derive(g))
            .collect()
    }

    /// Number of extended grapheme clusters.
    ///
    /// At most [`length`](Self::length); combining marks do not count on
    /// their own.
    pub fn grapheme_length(&self) -> usize {
        self.raw.graphemes(true).count()
    }

    // === Comparison ===

    /// Strict content equality, the named form of `==`.
    #[inline]
    pub fn is_equals(&self, other: &Strand) -> bool {
        self.raw == other.raw
    }

    /// Returns the percentage similarity (0.0–100.0) between the two
    /// values, computed by recursive longest-common-substring matching
    /// over codepoints.
    ///
    /// ```
    /// use strand::Strand;
    /// let a = Strand::from("World");
    /// assert_eq!(a.similarity(&Strand::from("World")), 100.0);
    /// // "or" matches 2 of 7 total codepoints: 2 * 200 / 7 ≈ 57.1%.
    /// assert!((a.similarity(&Strand::from("or")) - 400.0 / 7.0).abs() < 1e-9);
    /// ```
    pub fn similarity(&self, other: &Strand) -> f64 {
        let a: Vec<char> = self.raw.chars().collect();
        let b: Vec<char> = other.raw.chars().collect();
        if a.is_empty() && b.is_empty() {
            return 100.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let matched = common_chars(&a, &b);
        (matched * 200) as f64 / (a.len() + b.len()) as f64
    }

    /// Returns `true` if [`similarity`](Self::similarity) is at least
    /// `min_percent`.
    pub fn is_similar(&self, other: &Strand, min_percent: f64) -> bool {
        self.similarity(other) >= min_percent
    }

    /// Counts non-overlapping occurrences of `needle`.
    ///
    /// An empty needle matches nowhere.
    pub fn count_substring(&self, needle: &str) -> usize {
        if needle.is_empty() {
            return 0;
        }
        self.raw.matches(needle).count()
    }

    // Byte offset of the codepoint at `index`, or the total byte length
    // when `index` is at or beyond the end.
    pub(crate) fn byte_offset_of(&self, index: usize) -> usize {
        self.raw
            .char_indices()
            .nth(index)
            .map(|(i, _)| i)
            .unwrap_or(self.raw.len())
    }
}

// Resolve a possibly-negative offset against `total`, clamping into
// [0, total].
fn resolve_offset(offset: isize, total: usize) -> usize {
    if offset < 0 {
        total.saturating_sub(offset.unsigned_abs())
    } else {
        (offset as usize).min(total)
    }
}

// The similar_text matching count: longest common substring, then recurse
// on both flanks.
fn common_chars(a: &[char], b: &[char]) -> usize {
    let (mut best, mut at_a, mut at_b) = (0usize, 0usize, 0usize);
    for i in 0..a.len() {
        for j in 0..b.len() {
            let mut k = 0;
            while i + k < a.len() && j + k < b.len() && a[i + k] == b[j + k] {
                k += 1;
            }
            if k > best {
                best = k;
                at_a = i;
                at_b = j;
            }
        }
    }
    if best == 0 {
        return 0;
    }
    best + common_chars(&a[..at_a], &b[..at_b])
        + common_chars(&a[at_a + best..], &b[at_b + best..])
}

// === Trait plumbing ===

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for Strand {
    /// Equality is by raw content only; the encoding tag does not
    /// participate.
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Strand {}

impl PartialEq<str> for Strand {
    fn eq(&self, other: &str) -> bool {
        self.raw == other
    }
}

impl PartialEq<&str> for Strand {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}

impl PartialEq<String> for Strand {
    fn eq(&self, other: &String) -> bool {
        &self.raw == other
    }
}

impl PartialEq<Strand> for str {
    fn eq(&self, other: &Strand) -> bool {
        self == other.raw
    }
}

impl PartialEq<Strand> for &str {
    fn eq(&self, other: &Strand) -> bool {
        *self == other.raw
    }
}

impl PartialOrd for Strand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Strand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl Hash for Strand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl AsRef<str> for Strand {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl Borrow<str> for Strand {
    fn borrow(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for Strand {
    fn from(value: &str) -> Self {
        Self {
            raw: value.to_owned(),
            encoding: Encoding::resolve(None),
        }
    }
}

impl From<String> for Strand {
    fn from(value: String) -> Self {
        Self {
            raw: value,
            encoding: Encoding::resolve(None),
        }
    }
}

impl From<char> for Strand {
    fn from(value: char) -> Self {
        Self {
            raw: value.to_string(),
            encoding: Encoding::resolve(None),
        }
    }
}

impl From<Strand> for String {
    fn from(value: Strand) -> Self {
        value.raw
    }
}

impl FromStr for Strand {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl<'a> IntoIterator for &'a Strand {
    type Item = char;
    type IntoIter = std::str::Chars<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.chars()
    }
}
