//! Word tokenization.
//!
//! [`Strand::words_collection`] splits text into strictly alternating
//! word and separator tokens, always starting and ending on a word token.
//! Content that starts or ends with a separator therefore produces an
//! empty word token at that boundary, which keeps the token stream
//! rejoinable: imploding with no glue reproduces the input exactly.

use crate::collection::Strands;
use crate::strand::Strand;

fn is_word_char(c: char, charlist: &str) -> bool {
    c.is_alphanumeric() || charlist.contains(c)
}

impl Strand {
    /// Splits into alternating word and separator tokens.
    ///
    /// A word character is anything alphanumeric plus the characters in
    /// `charlist`. With `remove_empty` the boundary empties are dropped,
    /// along with any separator that precedes the first word, so the stream
    /// starts on a real word. `limit` caps the number of word tokens;
    /// the separator after the final kept word is still emitted, so the
    /// cut is visible.
    ///
    /// ```
    /// use strand::Strand;
    ///
    /// let s = Strand::from("fòô bàř");
    /// assert_eq!(
    ///     s.words_collection("", false, None).to_strings(),
    ///     ["fòô", " ", "bàř"]
    /// );
    /// assert_eq!(
    ///     Strand::from(" foo ").words_collection("", false, None).to_strings(),
    ///     ["", " ", "foo", " ", ""]
    /// );
    /// ```
    pub fn words_collection(
        &self,
        charlist: &str,
        remove_empty: bool,
        limit: Option<usize>,
    ) -> Strands {
        if limit == Some(0) {
            return Strands::new();
        }
        let mut tokens: Vec<Strand> = Vec::new();
        let mut words_seen = 0usize;
        let mut chars = self.chars().peekable();

        loop {
            // Word token, possibly empty at a boundary.
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if is_word_char(c, charlist) {
                    word.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            let counted = !(remove_empty && word.is_empty());
            if counted {
                tokens.push(self.derive(word));
                words_seen += 1;
            }

            // Separator token, present only between and around words.
            let mut separator = String::new();
            while let Some(&c) = chars.peek() {
                if is_word_char(c, charlist) {
                    break;
                }
                separator.push(c);
                chars.next();
            }
            let more = chars.peek().is_some();
            // A separator preceding every word is a boundary empty's tail
            // and goes with it.
            if !separator.is_empty() && !(remove_empty && tokens.is_empty()) {
                tokens.push(self.derive(separator));
            }
            if counted && limit.is_some_and(|cap| words_seen >= cap) {
                break;
            }
            if !more {
                // A trailing separator closes with an empty word token.
                if !remove_empty && tokens.len() % 2 == 0 {
                    tokens.push(self.derive(""));
                }
                break;
            }
        }

        Strands::from(tokens)
    }

    /// Returns just the non-empty word tokens.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("fòô, bàř; bàz");
    /// assert_eq!(s.words().to_strings(), ["fòô", "bàř", "bàz"]);
    /// ```
    pub fn words(&self) -> Strands {
        self.as_str()
            .split(|c: char| !is_word_char(c, ""))
            .filter(|w| !w.is_empty())
            .map(|w| self.derive(w))
            .collect()
    }
}
