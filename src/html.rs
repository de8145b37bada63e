//! HTML escaping, entity round-trips and markup stripping.
//!
//! Entity decoding (named and numeric references) is delegated to the
//! entity tables in `html-escape`; the encode direction is a small closed
//! map driven by the quote style.

use std::sync::OnceLock;

use fancy_regex::Regex;

use crate::strand::Strand;

/// Which quote characters [`Strand::html_encode`] converts to entities.
///
/// `&`, `<` and `>` are always converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Convert both double and single quotes.
    Both,
    /// Convert double quotes only.
    Double,
    /// Leave quotes alone.
    None,
}

fn static_regex(cell: &'static OnceLock<Regex>, pattern: &'static str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern is well-formed"))
}

fn break_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    static_regex(&RE, r"(?i)<br\s*/?\s*>")
}

fn empty_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    static_regex(&RE, r"<([A-Za-z][A-Za-z0-9]*)[^>]*>\s*</\1>")
}

fn media_query_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    static_regex(
        &RE,
        r"(?s)@media[^{]*\{(?:[^{}]*\{[^{}]*\})*[^{}]*\}",
    )
}

fn script_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    static_regex(&RE, r"(?is)<script[^>]*>.*?</script\s*>|</?script[^>]*>")
}

fn event_handler_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    static_regex(&RE, r#"(?i)\son[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#)
}

fn scheme_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    static_regex(&RE, r"(?i)(javascript|vbscript|livescript)\s*:")
}

impl Strand {
    // === Entities ===

    /// Converts HTML-special characters to entities.
    ///
    /// ```
    /// use strand::{QuoteStyle, Strand};
    /// let s = Strand::from(r#"<a href="x">'y'</a>"#);
    /// assert_eq!(
    ///     s.html_encode(QuoteStyle::Both),
    ///     "&lt;a href=&quot;x&quot;&gt;&#39;y&#39;&lt;/a&gt;"
    /// );
    /// assert_eq!(
    ///     s.html_encode(QuoteStyle::None),
    ///     r#"&lt;a href="x"&gt;'y'&lt;/a&gt;"#
    /// );
    /// ```
    pub fn html_encode(&self, quotes: QuoteStyle) -> Self {
        let mut out = String::with_capacity(self.byte_len());
        for c in self.as_str().chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' if !matches!(quotes, QuoteStyle::None) => out.push_str("&quot;"),
                '\'' if matches!(quotes, QuoteStyle::Both) => out.push_str("&#39;"),
                other => out.push(other),
            }
        }
        self.derive(out)
    }

    /// [`html_encode`](Self::html_encode) with both quote styles, the
    /// common escaping for embedding text in markup.
    #[inline]
    pub fn escape(&self) -> Self {
        self.html_encode(QuoteStyle::Both)
    }

    /// Resolves named and numeric character references.
    ///
    /// ```
    /// use strand::Strand;
    /// assert_eq!(Strand::from("&amp;lt; &ograve; &#242;").html_decode(), "&lt; ò ò");
    /// ```
    pub fn html_decode(&self) -> Self {
        self.derive(html_escape::decode_html_entities(self.as_str()).into_owned())
    }

    // === Markup stripping ===

    /// Strips HTML tags, keeping those whose names appear in
    /// `allowable_tags` (given in `"<b><i>"` form). Tag text with no
    /// closing `>` is dropped to its end.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("<p>foo <b>bar</b></p>");
    /// assert_eq!(s.remove_html(""), "foo bar");
    /// assert_eq!(s.remove_html("<b>"), "foo <b>bar</b>");
    /// ```
    pub fn remove_html(&self, allowable_tags: &str) -> Self {
        let allowed: Vec<String> = allowable_tags
            .split(['<', '>'])
            .filter(|t| !t.is_empty())
            .map(|t| t.to_ascii_lowercase())
            .collect();
        let text = self.as_str();
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(open) = rest.find('<') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            let Some(close) = tail.find('>') else {
                // Unterminated tag: drop the remainder.
                rest = "";
                break;
            };
            let tag = &tail[..=close];
            if is_allowed_tag(tag, &allowed) {
                out.push_str(tag);
            }
            rest = &tail[close + 1..];
        }
        out.push_str(rest);
        self.derive(out)
    }

    /// Replaces `<br>` tags (any spelling) with `replacement`.
    pub fn remove_html_break(&self, replacement: &str) -> Self {
        self.derive(
            break_regex()
                .replace_all(self.as_str(), replacement)
                .into_owned(),
        )
    }

    /// Removes element pairs with only whitespace between them, repeating
    /// until none remain (so nested empties collapse too).
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from("<div><p> </p></div>text");
    /// assert_eq!(s.stripe_empty_html_tags(), "text");
    /// ```
    pub fn stripe_empty_html_tags(&self) -> Self {
        let mut current = self.as_str().to_owned();
        // Each pass shrinks the text, so this terminates.
        loop {
            let next = empty_tag_regex().replace_all(&current, "").into_owned();
            if next == current {
                break;
            }
            current = next;
        }
        self.derive(current)
    }

    /// Removes `@media ... { ... }` blocks from embedded CSS.
    pub fn stripe_css_media_queries(&self) -> Self {
        self.derive(
            media_query_regex()
                .replace_all(self.as_str(), "")
                .into_owned(),
        )
    }

    /// Strips script content: `<script>` elements, inline `on*=` event
    /// handlers and script-scheme URIs, including entity- and
    /// percent-encoded obfuscations of them. Bounded multi-pass so that
    /// decoding one layer cannot reintroduce a payload unseen.
    ///
    /// ```
    /// use strand::Strand;
    /// let s = Strand::from(r#"<a href="javascript:x()" onclick="x()">hi</a><script>x()</script>"#);
    /// assert_eq!(s.remove_xss(), r#"<a href="removed:x()">hi</a>"#);
    /// ```
    pub fn remove_xss(&self) -> Self {
        const MAX_PASSES: usize = 8;
        let mut current = self.as_str().to_owned();
        for _ in 0..MAX_PASSES {
            let stripped = strip_script_patterns(&current);
            if stripped != current {
                current = stripped;
                continue;
            }
            // Nothing visible; peel one obfuscation layer and re-check.
            let decoded = decode_one_layer(&current);
            if decoded != current && strip_script_patterns(&decoded) != decoded {
                current = strip_script_patterns(&decoded);
                continue;
            }
            break;
        }
        self.derive(current)
    }

    /// Converts line breaks (`\r\n`, `\r`, `\n`) to `<br>` tags.
    pub fn new_line_to_html_break(&self) -> Self {
        self.derive(
            self.as_str()
                .replace("\r\n", "<br>")
                .replace(['\r', '\n'], "<br>"),
        )
    }
}

fn is_allowed_tag(tag: &str, allowed: &[String]) -> bool {
    let inner = tag.trim_start_matches('<').trim_start_matches('/');
    let name: String = inner
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    !name.is_empty() && allowed.iter().any(|a| *a == name)
}

fn strip_script_patterns(text: &str) -> String {
    let no_scripts = script_regex().replace_all(text, "").into_owned();
    let no_handlers = event_handler_regex()
        .replace_all(&no_scripts, "")
        .into_owned();
    scheme_regex()
        .replace_all(&no_handlers, "removed:")
        .into_owned()
}

// One decoding pass over the usual obfuscation layers: HTML entities and
// percent-escapes.
fn decode_one_layer(text: &str) -> String {
    let entity_decoded = html_escape::decode_html_entities(text).into_owned();
    percent_encoding::percent_decode_str(&entity_decoded)
        .decode_utf8()
        .map(|cow| cow.into_owned())
        .unwrap_or(entity_decoded)
}
