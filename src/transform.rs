//! Padding, trimming, whitespace normalization and truncation.
//!
//! All lengths here are codepoint counts. Out-of-range numeric arguments
//! degrade gracefully: padding to a length at or below the current length,
//! or to a negative length, returns the value unchanged.

use crate::error::{Error, Result};
use crate::strand::Strand;

/// Which side of the value receives pad characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadType {
    /// Pad on the left (right-align the content).
    Left,
    /// Pad on the right (left-align the content).
    Right,
    /// Pad on both sides; an odd remainder goes to the right.
    Both,
}

impl Strand {
    // === Padding ===

    /// Pads the value to `length` codepoints with `pad_str` on the side
    /// selected by `pad_type`.
    ///
    /// The pad string is cycled and truncated to the exact fill length.
    /// A `length` at or below the current length (including any negative
    /// length) returns the value unchanged. Fails with
    /// [`Error::InvalidArgument`] if padding is needed but `pad_str` is
    /// empty.
    ///
    /// ```
    /// use strand::{PadType, Strand};
    /// let s = Strand::from("foo");
    /// assert_eq!(s.pad(7, "ab", PadType::Both).unwrap(), "abfooab");
    /// assert_eq!(s.pad(-1, " ", PadType::Left).unwrap(), "foo");
    /// ```
    pub fn pad(&self, length: isize, pad_str: &str, pad_type: PadType) -> Result<Self> {
        let current = self.length();
        if length <= 0 || (length as usize) <= current {
            return Ok(self.clone());
        }
        if pad_str.is_empty() {
            return Err(Error::invalid_argument("pad string must not be empty"));
        }
        let fill = length as usize - current;
        let out = match pad_type {
            PadType::Left => format!("{}{}", pad_fill(pad_str, fill), self.as_str()),
            PadType::Right => format!("{}{}", self.as_str(), pad_fill(pad_str, fill)),
            PadType::Both => {
                let left = fill / 2;
                let right = fill - left;
                format!(
                    "{}{}{}",
                    pad_fill(pad_str, left),
                    self.as_str(),
                    pad_fill(pad_str, right)
                )
            }
        };
        Ok(self.derive(out))
    }

    /// Pads on the left to `length` codepoints.
    pub fn pad_left(&self, length: isize, pad_str: &str) -> Result<Self> {
        self.pad(length, pad_str, PadType::Left)
    }

    /// Pads on the right to `length` codepoints.
    pub fn pad_right(&self, length: isize, pad_str: &str) -> Result<Self> {
        self.pad(length, pad_str, PadType::Right)
    }

    /// Pads both sides to `length` codepoints.
    pub fn pad_both(&self, length: isize, pad_str: &str) -> Result<Self> {
        self.pad(length, pad_str, PadType::Both)
    }

    // === Trimming ===

    /// Strips characters from both ends.
    ///
    /// `chars` is an explicit character set, or `None` for the default
    /// Unicode whitespace set.
    pub fn trim(&self, chars: Option<&str>) -> Self {
        match chars {
            None => self.derive(self.as_str().trim()),
            Some(set) => self.derive(self.as_str().trim_matches(|c| set.contains(c))),
        }
    }

    /// Strips characters from the beginning, like [`trim`](Self::trim).
    pub fn trim_left(&self, chars: Option<&str>) -> Self {
        match chars {
            None => self.derive(self.as_str().trim_start()),
            Some(set) => self.derive(self.as_str().trim_start_matches(|c| set.contains(c))),
        }
    }

    /// Strips characters from the end, like [`trim`](Self::trim).
    pub fn trim_right(&self, chars: Option<&str>) -> Self {
        match chars {
            None => self.derive(self.as_str().trim_end()),
            Some(set) => self.derive(self.as_str().trim_end_matches(|c| set.contains(c))),
        }
    }

    /// Trims and collapses every internal whitespace run to one space.
    ///
    /// Idempotent: applying it twice equals applying it once.
    ///
    /// ```
    /// use strand::Strand;
    /// assert_eq!(Strand::from(" foo  bar ").collapse_whitespace(), "foo bar");
    /// ```
    pub fn collapse_whitespace(&self) -> Self {
        let mut out = String::with_capacity(self.byte_len());
        let mut in_run = false;
        for c in self.as_str().trim().chars() {
            if c.is_whitespace() {
                if !in_run {
                    out.push(' ');
                    in_run = true;
                }
            } else {
                out.push(c);
                in_run = false;
            }
        }
        self.derive(out)
    }

    /// Normalizes typographic characters to ASCII equivalents: smart
    /// quotes, em/en dashes and ellipses.
    ///
    /// ```
    /// use strand::Strand;
    /// assert_eq!(Strand::from("“Hello” — it’s…").tidy(), "\"Hello\" - it's...");
    /// ```
    pub fn tidy(&self) -> Self {
        let mut out = String::with_capacity(self.byte_len());
        for c in self.as_str().chars() {
            match c {
                '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => out.push('\''),
                '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => out.push('"'),
                '\u{2013}' | '\u{2014}' | '\u{2015}' => out.push('-'),
                '\u{2026}' => out.push_str("..."),
                '\u{00A0}' => out.push(' '),
                other => out.push(other),
            }
        }
        self.derive(out)
    }

    // === Truncation ===

    /// Hard truncation: the result, including `suffix`, never exceeds
    /// `length` codepoints.
    ///
    /// If the value already fits it is returned unchanged (no suffix). If
    /// the suffix alone is at least `length`, the suffix itself is
    /// truncated to `length`.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("Test foo bar");
    /// assert_eq!(s.truncate(4, ""), "Test");
    /// assert_eq!(s.truncate(7, "..."), "Test...");
    /// assert_eq!(s.truncate(99, "..."), "Test foo bar");
    /// ```
    pub fn truncate(&self, length: usize, suffix: &str) -> Self {
        let total = self.length();
        if total <= length {
            return self.clone();
        }
        let suffix_len = suffix.chars().count();
        if suffix_len >= length {
            return self.derive(suffix.chars().take(length).collect::<String>());
        }
        let keep: String = self.as_str().chars().take(length - suffix_len).collect();
        self.derive(format!("{keep}{suffix}"))
    }

    /// Truncation that never cuts inside a word.
    ///
    /// As [`truncate`](Self::truncate), but when the cut would land inside
    /// a word, the result backs up to the last whitespace boundary at or
    /// before the cut point (trailing whitespace dropped) before the
    /// suffix is appended. If the first word alone does not fit, this
    /// falls back to the hard cut.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("Test foo bar");
    /// assert_eq!(s.safe_truncate(8, ""), "Test foo");
    /// assert_eq!(s.safe_truncate(7, ""), "Test");
    /// ```
    pub fn safe_truncate(&self, length: usize, suffix: &str) -> Self {
        let total = self.length();
        if total <= length {
            return self.clone();
        }
        let suffix_len = suffix.chars().count();
        if suffix_len >= length {
            return self.derive(suffix.chars().take(length).collect::<String>());
        }
        let keep = length - suffix_len;
        let chars: Vec<char> = self.as_str().chars().collect();
        let candidate = &chars[..keep];
        let at_boundary = chars[keep].is_whitespace()
            || candidate.last().is_some_and(|c| c.is_whitespace());
        let kept: String = if at_boundary {
            candidate.iter().collect()
        } else {
            match candidate.iter().rposition(|c| c.is_whitespace()) {
                Some(ws) => candidate[..ws].iter().collect(),
                // The first word does not fit; hard cut.
                None => candidate.iter().collect(),
            }
        };
        self.derive(format!("{}{suffix}", kept.trim_end()))
    }

    /// Truncation that completes the word in progress.
    ///
    /// Cuts at the first whitespace boundary at or after codepoint
    /// `length` and appends `suffix`; if no boundary follows, the value is
    /// returned unchanged.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("Test foo bar");
    /// assert_eq!(s.shorten_after_word(6, "..."), "Test foo...");
    /// assert_eq!(s.shorten_after_word(10, "..."), "Test foo bar");
    /// ```
    pub fn shorten_after_word(&self, length: usize, suffix: &str) -> Self {
        if self.length() <= length {
            return self.clone();
        }
        let boundary = self
            .as_str()
            .chars()
            .enumerate()
            .find(|(i, c)| *i >= length && c.is_whitespace())
            .map(|(i, _)| i);
        match boundary {
            Some(cut) => {
                let kept: String = self.as_str().chars().take(cut).collect();
                self.derive(format!("{}{suffix}", kept.trim_end()))
            }
            None => self.clone(),
        }
    }
}

// Cycle `pad` to exactly `fill` codepoints.
fn pad_fill(pad: &str, fill: usize) -> String {
    pad.chars().cycle().take(fill).collect()
}

#[cfg(test)]
mod tests {
    use crate::{PadType, Strand};

    #[test]
    fn pad_cycles_the_pad_string() {
        let s = Strand::from("foo");
        assert_eq!(s.pad_left(9, "12").unwrap(), "121212foo");
        assert_eq!(s.pad_right(8, "12").unwrap(), "foo12121");
        assert_eq!(s.pad(8, "12", PadType::Both).unwrap(), "12foo121");
    }

    #[test]
    fn pad_degrades_gracefully() {
        let s = Strand::from("foo");
        assert_eq!(s.pad(-1, " ", PadType::Right).unwrap(), "foo");
        assert_eq!(s.pad(3, " ", PadType::Right).unwrap(), "foo");
        assert_eq!(s.pad(2, "", PadType::Right).unwrap(), "foo");
        assert!(s.pad(5, "", PadType::Right).is_err());
    }

    #[test]
    fn pad_counts_codepoints() {
        let s = Strand::from("fòô");
        assert_eq!(s.pad_left(6, "¬").unwrap(), "¬¬¬fòô");
    }

    #[test]
    fn trim_default_and_explicit_sets() {
        assert_eq!(Strand::from("  fòô  ").trim(None), "fòô");
        assert_eq!(Strand::from("--fòô--").trim(Some("-")), "fòô");
        assert_eq!(Strand::from("  fòô  ").trim_left(None), "fòô  ");
        assert_eq!(Strand::from("  fòô  ").trim_right(None), "  fòô");
        // Unicode whitespace is in the default set.
        assert_eq!(Strand::from("\u{2000}fòô\u{2000}").trim(None), "fòô");
    }

    #[test]
    fn collapse_whitespace_is_idempotent() {
        let s = Strand::from(" foo\t\n bar  baz ");
        let once = s.collapse_whitespace();
        assert_eq!(once, "foo bar baz");
        assert_eq!(once.collapse_whitespace(), once);
    }

    #[test]
    fn truncate_accounts_for_suffix() {
        let s = Strand::from("Test foo bar");
        assert_eq!(s.truncate(4, ""), "Test");
        assert_eq!(s.truncate(11, "..."), "Test foo...");
        assert_eq!(s.truncate(12, "..."), "Test foo bar");
        // Suffix alone exceeding the budget is itself truncated.
        assert_eq!(s.truncate(2, "..."), "..");
    }

    #[test]
    fn safe_truncate_backs_off_to_word_boundary() {
        let s = Strand::from("Test foo bar");
        assert_eq!(s.safe_truncate(8, ""), "Test foo");
        assert_eq!(s.safe_truncate(7, ""), "Test");
        assert_eq!(s.safe_truncate(12, "..."), "Test foo bar");
        // First word longer than the budget: hard cut.
        assert_eq!(Strand::from("Testfoobar").safe_truncate(4, ""), "Test");
    }

    #[test]
    fn shorten_after_word_completes_the_word() {
        let s = Strand::from("Test foo bar");
        assert_eq!(s.shorten_after_word(6, "..."), "Test foo...");
        assert_eq!(s.shorten_after_word(4, ""), "Test");
        assert_eq!(s.shorten_after_word(9, "..."), "Test foo bar");
        assert_eq!(s.shorten_after_word(99, "..."), "Test foo bar");
    }
}
