//! Searching and replacement.
//!
//! Search results use `Option<usize>` as the "not found" sentinel, never an
//! error: a failed search is a normal outcome in a fluent chain. Indices are
//! codepoint positions, not byte offsets. Case-insensitive variants compare
//! both operands lowercased under the Unicode case tables.

use fancy_regex::Regex;

use crate::error::{Error, Result};
use crate::strand::Strand;

impl Strand {
    // === Search ===

    /// Returns the codepoint index of the first occurrence of `needle`.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("fòô bàř");
    /// assert_eq!(s.index_of("bàř"), Some(4));
    /// assert_eq!(s.index_of("baz"), None);
    /// ```
    pub fn index_of(&self, needle: &str) -> Option<usize> {
        self.as_str()
            .find(needle)
            .map(|byte| self.as_str()[..byte].chars().count())
    }

    /// Returns the codepoint index of the last occurrence of `needle`.
    pub fn index_of_last(&self, needle: &str) -> Option<usize> {
        self.as_str()
            .rfind(needle)
            .map(|byte| self.as_str()[..byte].chars().count())
    }

    /// Case-insensitive [`index_of`](Self::index_of).
    ///
    /// The index refers to the lowercased form of the text, which matches
    /// the original except for the few codepoints whose lowercase mapping
    /// changes the codepoint count.
    pub fn index_of_ignore_case(&self, needle: &str) -> Option<usize> {
        let haystack = self.as_str().to_lowercase();
        let needle = needle.to_lowercase();
        haystack
            .find(&needle)
            .map(|byte| haystack[..byte].chars().count())
    }

    /// Case-insensitive [`index_of_last`](Self::index_of_last).
    pub fn index_of_last_ignore_case(&self, needle: &str) -> Option<usize> {
        let haystack = self.as_str().to_lowercase();
        let needle = needle.to_lowercase();
        haystack
            .rfind(&needle)
            .map(|byte| haystack[..byte].chars().count())
    }

    /// Returns `true` if `needle` occurs in this strand.
    #[inline]
    pub fn contains(&self, needle: &str) -> bool {
        self.as_str().contains(needle)
    }

    /// Case-insensitive [`contains`](Self::contains).
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.as_str()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// Returns `true` if any of `needles` occurs. Empty `needles` is
    /// `false`.
    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.contains(n))
    }

    /// Case-insensitive [`contains_any`](Self::contains_any).
    pub fn contains_any_ignore_case(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.contains_ignore_case(n))
    }

    /// Returns `true` if every one of `needles` occurs. Empty `needles` is
    /// `true`.
    pub fn contains_all(&self, needles: &[&str]) -> bool {
        needles.iter().all(|n| self.contains(n))
    }

    /// Case-insensitive [`contains_all`](Self::contains_all).
    pub fn contains_all_ignore_case(&self, needles: &[&str]) -> bool {
        needles.iter().all(|n| self.contains_ignore_case(n))
    }

    /// Returns `true` if the strand begins with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.as_str().starts_with(prefix)
    }

    /// Case-insensitive [`starts_with`](Self::starts_with).
    pub fn starts_with_ignore_case(&self, prefix: &str) -> bool {
        self.as_str()
            .to_lowercase()
            .starts_with(&prefix.to_lowercase())
    }

    /// Returns `true` if the strand begins with any of `prefixes`.
    pub fn starts_with_any(&self, prefixes: &[&str]) -> bool {
        prefixes.iter().any(|p| self.starts_with(p))
    }

    /// Case-insensitive [`starts_with_any`](Self::starts_with_any).
    pub fn starts_with_any_ignore_case(&self, prefixes: &[&str]) -> bool {
        prefixes.iter().any(|p| self.starts_with_ignore_case(p))
    }

    /// Returns `true` if the strand ends with `suffix`.
    #[inline]
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.as_str().ends_with(suffix)
    }

    /// Case-insensitive [`ends_with`](Self::ends_with).
    pub fn ends_with_ignore_case(&self, suffix: &str) -> bool {
        self.as_str()
            .to_lowercase()
            .ends_with(&suffix.to_lowercase())
    }

    /// Returns `true` if the strand ends with any of `suffixes`.
    pub fn ends_with_any(&self, suffixes: &[&str]) -> bool {
        suffixes.iter().any(|s| self.ends_with(s))
    }

    /// Case-insensitive [`ends_with_any`](Self::ends_with_any).
    pub fn ends_with_any_ignore_case(&self, suffixes: &[&str]) -> bool {
        suffixes.iter().any(|s| self.ends_with_ignore_case(s))
    }

    // === Replacement ===

    /// Replaces every occurrence of `search` with `replacement`.
    ///
    /// An empty `search` matches nothing and the value is returned
    /// unchanged.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("foo bar");
    /// assert_eq!(s.replace("foo ", ""), "bar");
    /// assert_eq!(s, "foo bar");
    /// ```
    pub fn replace(&self, search: &str, replacement: &str) -> Self {
        if search.is_empty() {
            return self.clone();
        }
        self.derive(self.as_str().replace(search, replacement))
    }

    /// Replaces only the first occurrence of `search`.
    pub fn replace_first(&self, search: &str, replacement: &str) -> Self {
        if search.is_empty() {
            return self.clone();
        }
        match self.as_str().find(search) {
            Some(byte) => {
                let mut out = String::with_capacity(self.byte_len());
                out.push_str(&self.as_str()[..byte]);
                out.push_str(replacement);
                out.push_str(&self.as_str()[byte + search.len()..]);
                self.derive(out)
            }
            None => self.clone(),
        }
    }

    /// Replaces only the last occurrence of `search`.
    pub fn replace_last(&self, search: &str, replacement: &str) -> Self {
        if search.is_empty() {
            return self.clone();
        }
        match self.as_str().rfind(search) {
            Some(byte) => {
                let mut out = String::with_capacity(self.byte_len());
                out.push_str(&self.as_str()[..byte]);
                out.push_str(replacement);
                out.push_str(&self.as_str()[byte + search.len()..]);
                self.derive(out)
            }
            None => self.clone(),
        }
    }

    /// Replaces `search` only when it is anchored at the beginning.
    pub fn replace_beginning(&self, search: &str, replacement: &str) -> Self {
        match self.as_str().strip_prefix(search) {
            Some(rest) if !search.is_empty() => {
                self.derive(format!("{replacement}{rest}"))
            }
            _ => self.clone(),
        }
    }

    /// Replaces `search` only when it is anchored at the end.
    pub fn replace_ending(&self, search: &str, replacement: &str) -> Self {
        match self.as_str().strip_suffix(search) {
            Some(rest) if !search.is_empty() => {
                self.derive(format!("{rest}{replacement}"))
            }
            _ => self.clone(),
        }
    }

    /// Replaces every occurrence of each search string.
    ///
    /// `replacements` is either a single replacement applied to all
    /// searches, or a parallel array of the same length as `searches`. Any
    /// other shape fails with [`Error::InvalidArgument`]. Replacements are
    /// applied in order, each over the result of the previous.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("fòô bàř");
    /// assert_eq!(s.replace_all(&["ò", "à"], &["o", "a"]).unwrap(), "foô bař");
    /// assert_eq!(s.replace_all(&["ò", "à"], &["?"]).unwrap(), "f?ô b?ř");
    /// ```
    pub fn replace_all(&self, searches: &[&str], replacements: &[&str]) -> Result<Self> {
        if replacements.len() != 1 && replacements.len() != searches.len() {
            return Err(Error::invalid_argument(format!(
                "{} searches with {} replacements; need one shared or a parallel array",
                searches.len(),
                replacements.len()
            )));
        }
        let mut current = self.clone();
        for (i, search) in searches.iter().enumerate() {
            let replacement = if replacements.len() == 1 {
                replacements[0]
            } else {
                replacements[i]
            };
            current = current.replace(search, replacement);
        }
        Ok(current)
    }

    /// Replaces every match of a regular expression.
    ///
    /// `options` is a flag string drawn from `i` (case-insensitive), `m`
    /// (multi-line), `s` (dot matches newline) and `x` (verbose),
    /// translated into an inline group for the regex engine. `replacement`
    /// may reference capture groups as `$1`, `${name}`. A malformed
    /// pattern or unknown flag fails with [`Error::InvalidArgument`].
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("fòô bàř");
    /// assert_eq!(s.regex_replace(r"[òà]", "e", "").unwrap(), "feô beř");
    /// assert_eq!(s.regex_replace("F", "_", "i").unwrap(), "_òô bàř");
    /// ```
    pub fn regex_replace(&self, pattern: &str, replacement: &str, options: &str) -> Result<Self> {
        if let Some(bad) = options.chars().find(|c| !matches!(c, 'i' | 'm' | 's' | 'x')) {
            return Err(Error::invalid_argument(format!(
                "unknown regex option {bad:?}; allowed: i, m, s, x"
            )));
        }
        let full = if options.is_empty() {
            pattern.to_owned()
        } else {
            format!("(?{options}){pattern}")
        };
        let regex = Regex::new(&full)
            .map_err(|e| Error::invalid_argument(format!("invalid pattern: {e}")))?;
        Ok(self.derive(regex.replace_all(self.as_str(), replacement).into_owned()))
    }
}
