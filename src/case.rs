//! Case conversion and composite-word casing.
//!
//! The composite operations (`camelize`, `dasherize`, `underscored`, ...)
//! are all parameterizations of one boundary algorithm: the input is split
//! into words at existing separators (`-`, `_`, whitespace), lower-to-upper
//! case transitions, acronym-run ends and alpha/digit transitions, then
//! rejoined with the target delimiter and per-word casing policy.

use crate::strand::Strand;

// Words the editorial title-case style keeps lowercase.
const SMALL_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "en", "for", "if", "in", "nor", "of", "on", "or",
    "per", "the", "to", "v", "v.", "via", "vs", "vs.",
];

impl Strand {
    // === Simple case ===

    /// Lowercases every codepoint.
    pub fn lowercase(&self) -> Self {
        self.derive(self.as_str().to_lowercase())
    }

    /// Uppercases every codepoint.
    pub fn uppercase(&self) -> Self {
        self.derive(self.as_str().to_uppercase())
    }

    /// Uppercases the first codepoint, leaving the rest untouched.
    pub fn upper_first(&self) -> Self {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(c) => self.derive(format!("{}{}", c.to_uppercase(), chars.as_str())),
            None => self.clone(),
        }
    }

    /// Lowercases the first codepoint, leaving the rest untouched.
    pub fn lower_first(&self) -> Self {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(c) => self.derive(format!("{}{}", c.to_lowercase(), chars.as_str())),
            None => self.clone(),
        }
    }

    /// Swaps the case of every cased codepoint.
    ///
    /// ```
    /// use strand::Strand;
    /// assert_eq!(Strand::from("fÒô Bàř").swap_case(), "FòÔ bÀŘ");
    /// ```
    pub fn swap_case(&self) -> Self {
        let mut out = String::with_capacity(self.byte_len());
        for c in self.as_str().chars() {
            if c.is_lowercase() {
                out.extend(c.to_uppercase());
            } else if c.is_uppercase() {
                out.extend(c.to_lowercase());
            } else {
                out.push(c);
            }
        }
        self.derive(out)
    }

    /// Capitalizes each whitespace-separated word, lowercasing the rest of
    /// the word.
    pub fn title_case(&self) -> Self {
        let mut out = String::with_capacity(self.byte_len());
        let mut at_word_start = true;
        for c in self.as_str().chars() {
            if c.is_whitespace() {
                out.push(c);
                at_word_start = true;
            } else if at_word_start {
                out.extend(c.to_uppercase());
                at_word_start = false;
            } else {
                out.extend(c.to_lowercase());
            }
        }
        self.derive(out)
    }

    /// Returns `true` if any codepoint is lowercase.
    pub fn has_lowercase(&self) -> bool {
        self.as_str().chars().any(char::is_lowercase)
    }

    /// Returns `true` if any codepoint is uppercase.
    pub fn has_uppercase(&self) -> bool {
        self.as_str().chars().any(char::is_uppercase)
    }

    /// Returns `true` if no codepoint is uppercase.
    pub fn is_lowercase(&self) -> bool {
        !self.has_uppercase()
    }

    /// Returns `true` if no codepoint is lowercase.
    pub fn is_uppercase(&self) -> bool {
        !self.has_lowercase()
    }

    // === Composite-word casing ===

    /// Splits into boundary-defined words and rejoins lowercased with
    /// `delimiter`. The shared primitive behind the composite casings.
    ///
    /// ```
    /// use strand::Strand;
    /// assert_eq!(Strand::from("TestCase").delimit("::"), "test::case");
    /// ```
    pub fn delimit(&self, delimiter: &str) -> Self {
        let words = case_words(self.as_str());
        let joined = words
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join(delimiter);
        self.derive(joined)
    }

    /// Lower camelCase: first word lowercased, the rest capitalized,
    /// joined bare.
    ///
    /// ```
    /// use strand::Strand;
    /// assert_eq!(Strand::from("Camel case").camelize(), "camelCase");
    /// assert_eq!(Strand::from("some_variable_name").camelize(), "someVariableName");
    /// ```
    pub fn camelize(&self) -> Self {
        let words = case_words(self.as_str());
        let mut out = String::with_capacity(self.byte_len());
        for (i, word) in words.iter().enumerate() {
            if i == 0 {
                out.push_str(&word.to_lowercase());
            } else {
                out.push_str(&capitalize(word));
            }
        }
        self.derive(out)
    }

    /// UpperCamelCase: every word capitalized, joined bare.
    pub fn upper_camelize(&self) -> Self {
        let words = case_words(self.as_str());
        let out: String = words.iter().map(|w| capitalize(w)).collect();
        self.derive(out)
    }

    /// Alias for [`upper_camelize`](Self::upper_camelize).
    #[inline]
    pub fn pascalize(&self) -> Self {
        self.upper_camelize()
    }

    /// Lowercased words joined with `-`.
    pub fn dasherize(&self) -> Self {
        self.delimit("-")
    }

    /// Lowercased words joined with `_`.
    ///
    /// ```
    /// use strand::Strand;
    /// assert_eq!(Strand::from("CamelCase").underscored(), "camel_case");
    /// ```
    pub fn underscored(&self) -> Self {
        self.delimit("_")
    }

    /// Alias for [`underscored`](Self::underscored).
    #[inline]
    pub fn snakeize(&self) -> Self {
        self.underscored()
    }

    // === Titleizing ===

    /// Capitalizes each whitespace-separated word, skipping words on the
    /// `ignore` list (matched case-insensitively, never applied to the
    /// first word). Ignored words are left verbatim; the rest are
    /// capitalized with their tail lowercased.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("i like to watch television");
    /// assert_eq!(s.titleize(&["to", "the"]), "I Like to Watch Television");
    /// ```
    pub fn titleize(&self, ignore: &[&str]) -> Self {
        let mut out = String::with_capacity(self.byte_len());
        let mut first = true;
        for token in split_keeping_whitespace(self.as_str()) {
            if token.chars().all(char::is_whitespace) {
                out.push_str(token);
                continue;
            }
            let skip = !first
                && ignore
                    .iter()
                    .any(|ig| ig.eq_ignore_ascii_case(token));
            if skip {
                out.push_str(token);
            } else {
                out.push_str(&capitalize(token));
            }
            first = false;
        }
        self.derive(out)
    }

    /// Editorial title casing.
    ///
    /// The first and last words are always capitalized; short
    /// conjunctions, prepositions and articles stay lowercase unless they
    /// open a quoted or bracketed sub-phrase or follow a colon; words with
    /// internal capitals ("iPhone", "DVDs") are preserved, all-caps words
    /// are title-cased; URLs, emails and path-like tokens are atomic and
    /// untouched. Words on `ignore` are always left verbatim.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("this is trimming a sentence");
    /// assert_eq!(s.titleize_for_humans(&[]), "This Is Trimming a Sentence");
    /// ```
    pub fn titleize_for_humans(&self, ignore: &[&str]) -> Self {
        let tokens: Vec<&str> = split_keeping_whitespace(self.as_str()).collect();
        let word_positions: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.chars().all(char::is_whitespace))
            .map(|(i, _)| i)
            .collect();
        let first_word = word_positions.first().copied();
        let last_word = word_positions.last().copied();

        let mut out = String::with_capacity(self.byte_len());
        let mut after_colon = false;
        for (i, token) in tokens.iter().enumerate() {
            if token.chars().all(char::is_whitespace) {
                out.push_str(token);
                continue;
            }
            let edge = Some(i) == first_word || Some(i) == last_word;
            out.push_str(&human_word(token, edge, after_colon, ignore));
            after_colon = token.ends_with(':');
        }
        self.derive(out)
    }
}

// Uppercase the first codepoint, lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => format!("{}{}", c.to_uppercase(), chars.as_str().to_lowercase()),
        None => String::new(),
    }
}

// Boundary-defined word split shared by the composite casings.
fn case_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '_' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_alphabetic() && c.is_ascii_digit())
                || (prev.is_ascii_digit() && c.is_alphabetic())
                // End of an acronym run: the last upper starts the next word.
                || (prev.is_uppercase() && c.is_uppercase() && next_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

// Alternating word / whitespace tokens, concatenating back to the input.
fn split_keeping_whitespace(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let first_is_ws = rest.chars().next().is_some_and(char::is_whitespace);
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != first_is_ws)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        rest = tail;
        Some(token)
    })
}

fn is_atomic_token(core: &str) -> bool {
    core.contains("://")
        || core.contains('@')
        || core.contains('/')
        || core.contains('_')
        || core.starts_with("www.")
        // A bare domain: an internal dot with no trailing sentence dot.
        || core
            .trim_end_matches(['.', ',', ';', '!', '?'])
            .contains('.')
}

// Apply the editorial ruleset to a single word token.
fn human_word(token: &str, edge: bool, after_colon: bool, ignore: &[&str]) -> String {
    if ignore.iter().any(|ig| ig.eq_ignore_ascii_case(token)) {
        return token.to_owned();
    }
    // Peel leading quotes/brackets so the casing decision sees the core.
    let open: &[char] = &['"', '\'', '\u{201C}', '\u{2018}', '(', '[', '{'];
    let lead_len = token
        .char_indices()
        .find(|(_, c)| !open.contains(c))
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    let (lead, core) = token.split_at(lead_len);
    if core.is_empty() || is_atomic_token(core) {
        return token.to_owned();
    }
    let opens_phrase = !lead.is_empty();

    let letters: Vec<char> = core.chars().filter(|c| c.is_alphabetic()).collect();
    let all_caps = letters.len() > 1 && letters.iter().all(|c| c.is_uppercase());
    let internal_caps = letters.iter().skip(1).any(|c| c.is_uppercase());

    if internal_caps && !all_caps {
        // "iPhone", "DVDs": already deliberately cased.
        return token.to_owned();
    }
    if all_caps {
        return format!("{lead}{}", capitalize(core));
    }
    let bare = core.trim_end_matches(['.', ',', ';', ':', '!', '?']);
    let small = SMALL_WORDS
        .iter()
        .any(|sw| sw.eq_ignore_ascii_case(bare));
    if small && !edge && !after_colon && !opens_phrase {
        return format!("{lead}{}", core.to_lowercase());
    }
    format!("{lead}{}", capitalize(core))
}

#[cfg(test)]
mod tests {
    use crate::Strand;

    #[test]
    fn underscored_splits_camel_runs() {
        assert_eq!(Strand::from("CamelCase").underscored(), "camel_case");
        assert_eq!(Strand::from("camelCase").underscored(), "camel_case");
        assert_eq!(Strand::from("HTMLParser").underscored(), "html_parser");
        assert_eq!(Strand::from("foo bar-baz").underscored(), "foo_bar_baz");
        assert_eq!(Strand::from("Foo2Bar").underscored(), "foo_2_bar");
    }

    #[test]
    fn delimit_is_the_shared_primitive() {
        let s = Strand::from("BackgroundColor");
        assert_eq!(s.delimit("::"), "background::color");
        assert_eq!(s.dasherize(), "background-color");
        assert_eq!(s.snakeize(), "background_color");
    }

    #[test]
    fn camelize_variants() {
        assert_eq!(Strand::from("Camel case").camelize(), "camelCase");
        assert_eq!(Strand::from("some_variable_name").camelize(), "someVariableName");
        assert_eq!(Strand::from("camel c test").camelize(), "camelCTest");
        assert_eq!(Strand::from("camel case").upper_camelize(), "CamelCase");
        assert_eq!(Strand::from("camel case").pascalize(), "CamelCase");
    }

    #[test]
    fn simple_case_operations() {
        let s = Strand::from("fÒô Bàř");
        assert_eq!(s.lowercase(), "fòô bàř");
        assert_eq!(s.uppercase(), "FÒÔ BÀŘ");
        assert_eq!(s.swap_case(), "FòÔ bÀŘ");
        assert_eq!(Strand::from("fòô bàř").upper_first(), "Fòô bàř");
        assert_eq!(Strand::from("Fòô bàř").lower_first(), "fòô bàř");
        assert_eq!(Strand::from("fòô bàř").title_case(), "Fòô Bàř");
    }

    #[test]
    fn case_predicates() {
        assert!(Strand::from("fòô bàř").is_lowercase());
        assert!(!Strand::from("fòô Bàř").is_lowercase());
        assert!(Strand::from("FÒÔ BÀŘ").is_uppercase());
        assert!(Strand::from("fòô Bàř").has_lowercase());
        assert!(Strand::from("fòô Bàř").has_uppercase());
        // Uncased text is both.
        assert!(Strand::from("123").is_lowercase());
        assert!(Strand::from("123").is_uppercase());
    }

    #[test]
    fn titleize_skips_ignore_words() {
        let s = Strand::from("i like to watch DVDs at home");
        assert_eq!(
            s.titleize(&["at", "to", "the"]),
            "I Like to Watch Dvds at Home"
        );
        // The first word is capitalized even when ignorable.
        assert_eq!(Strand::from("the end").titleize(&["the"]), "The End");
    }

    #[test]
    fn titleize_for_humans_editorial_rules() {
        let s = Strand::from("this is trimming a sentence");
        assert_eq!(s.titleize_for_humans(&[]), "This Is Trimming a Sentence");

        // Small word as the last word is capitalized.
        assert_eq!(
            Strand::from("a thing to believe in").titleize_for_humans(&[]),
            "A Thing to Believe In"
        );

        // After a colon a small word is capitalized.
        assert_eq!(
            Strand::from("rules: the sequel").titleize_for_humans(&[]),
            "Rules: The Sequel"
        );

        // Internal capitals survive; all-caps words are title-cased.
        assert_eq!(
            Strand::from("the iPhone GUIDE for DVDs").titleize_for_humans(&[]),
            "The iPhone Guide for DVDs"
        );

        // URLs and emails are atomic.
        assert_eq!(
            Strand::from("read https://example.com/x_y now").titleize_for_humans(&[]),
            "Read https://example.com/x_y Now"
        );

        // A quoted sub-phrase capitalizes its opener.
        assert_eq!(
            Strand::from("back \"the road\" again").titleize_for_humans(&[]),
            "Back \"The Road\" Again"
        );
    }
}
