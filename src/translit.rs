//! Transliteration and slug building.
//!
//! Codepoint-to-ASCII mapping is delegated to the `deunicode` tables; this
//! module orchestrates the slug pipeline on top: literal replacements,
//! per-language digraphs, transliteration, lowercasing and delimiter
//! normalization.

use deunicode::deunicode_char;

use crate::strand::Strand;

// Digraph expansions applied before the generic tables when the caller
// names the language. The generic tables map ä to "a"; German wants "ae".
const GERMAN_DIGRAPHS: &[(char, &str)] = &[
    ('ä', "ae"),
    ('ö', "oe"),
    ('ü', "ue"),
    ('Ä', "Ae"),
    ('Ö', "Oe"),
    ('Ü', "Ue"),
    ('ß', "ss"),
];

impl Strand {
    /// Maps non-ASCII codepoints to their closest ASCII equivalents via
    /// the delegated lookup tables.
    ///
    /// Codepoints with no mapping become `unknown`, or are dropped when
    /// `unknown` is `None`.
    ///
    /// ```
    /// use strand::Strand;
    /// assert_eq!(Strand::from("fòô bàř").transliterate(Some('?')), "foo bar");
    /// ```
    pub fn transliterate(&self, unknown: Option<char>) -> Self {
        let mut out = String::with_capacity(self.byte_len());
        for c in self.as_str().chars() {
            if c.is_ascii() {
                out.push(c);
                continue;
            }
            match deunicode_char(c) {
                Some(mapped) => out.push_str(mapped),
                None => {
                    if let Some(placeholder) = unknown {
                        out.push(placeholder);
                    }
                }
            }
        }
        self.derive(out)
    }

    /// Builds a URL-safe slug: transliterate, lowercase, replace
    /// non-alphanumeric runs with `delimiter`, collapse repeats and trim
    /// edge delimiters.
    ///
    /// ```
    /// use strand::Strand;
    /// assert_eq!(Strand::from("fòô  bàř!").slugify("-"), "foo-bar");
    /// ```
    pub fn slugify(&self, delimiter: &str) -> Self {
        self.urlify(delimiter, "en", &[])
    }

    /// [`slugify`](Self::slugify) with a language hint and a map of
    /// literal substring replacements applied before transliteration.
    ///
    /// `lang` currently selects the German digraph expansions (`"de"`);
    /// other languages rely on the generic tables.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("foooooo");
    /// assert_eq!(s.urlify("-", "en", &[("foooooo", "bar")]), "bar");
    /// ```
    pub fn urlify(&self, delimiter: &str, lang: &str, replacements: &[(&str, &str)]) -> Self {
        let mut text = self.as_str().to_owned();
        for (search, replacement) in replacements {
            if !search.is_empty() {
                text = text.replace(search, replacement);
            }
        }
        if lang.eq_ignore_ascii_case("de") {
            for (c, digraph) in GERMAN_DIGRAPHS {
                text = text.replace(*c, digraph);
            }
        }
        let ascii = self.derive(text).transliterate(None).lowercase();

        let mut slug = String::with_capacity(ascii.byte_len());
        let mut pending_delimiter = false;
        for c in ascii.chars() {
            if c.is_ascii_alphanumeric() {
                if pending_delimiter && !slug.is_empty() {
                    slug.push_str(delimiter);
                }
                pending_delimiter = false;
                slug.push(c);
            } else {
                pending_delimiter = true;
            }
        }
        self.derive(slug)
    }
}

#[cfg(test)]
mod tests {
    use crate::Strand;

    #[test]
    fn transliterate_known_codepoints() {
        assert_eq!(Strand::from("fòô bàř").transliterate(Some('?')), "foo bar");
        assert_eq!(Strand::from("Ærøskøbing").transliterate(None), "AEroskobing");
        assert_eq!(Strand::from("北京").transliterate(None), "Bei Jing ");
    }

    #[test]
    fn slugify_normalizes_delimiters() {
        assert_eq!(Strand::from("fòô  bàř!").slugify("-"), "foo-bar");
        assert_eq!(Strand::from("--Foo -- Bar--").slugify("-"), "foo-bar");
        assert_eq!(Strand::from("hello world").slugify("_"), "hello_world");
        assert_eq!(Strand::from("").slugify("-"), "");
        assert_eq!(Strand::from("!!!").slugify("-"), "");
    }

    #[test]
    fn urlify_applies_replacements_first() {
        let s = Strand::from("foooooo");
        assert_eq!(s.urlify("-", "en", &[("foooooo", "bar")]), "bar");
        assert_eq!(
            Strand::from("a & b").urlify("-", "en", &[("&", "and")]),
            "a-and-b"
        );
    }

    #[test]
    fn urlify_language_digraphs() {
        assert_eq!(Strand::from("Größe").urlify("-", "de", &[]), "groesse");
        // Without the hint the generic table applies.
        assert_eq!(Strand::from("Größe").urlify("-", "en", &[]), "grosse");
    }
}
