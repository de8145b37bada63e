//! Content-classification predicates.
//!
//! The class predicates (`is_alpha`, `is_numeric`, ...) are `false` for the
//! empty strand; `is_blank` and `is_printable` are vacuously `true` for it.

use std::sync::OnceLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use fancy_regex::Regex;

use crate::strand::Strand;

/// Options controlling [`Strand::is_email`].
#[derive(Debug, Clone, Default)]
pub struct EmailOptions<'a> {
    /// Reject well-known documentation domains (`example.com`,
    /// `example.org`, ..., and the `.test`/`.invalid`/`.localhost`
    /// reserved TLDs).
    pub reject_example_domains: bool,
    /// A blocklist of disposable-email domains, matched case-insensitively
    /// against the address's host.
    pub disposable_domains: &'a [&'a str],
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        )
        .expect("email pattern is well-formed")
    })
}

fn html_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"</?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>").expect("html pattern is well-formed")
    })
}

impl Strand {
    /// Returns `true` if non-empty and every codepoint is alphabetic.
    pub fn is_alpha(&self) -> bool {
        !self.is_empty() && self.chars().all(char::is_alphabetic)
    }

    /// Returns `true` if non-empty and every codepoint is alphanumeric.
    pub fn is_alphanumeric(&self) -> bool {
        !self.is_empty() && self.chars().all(char::is_alphanumeric)
    }

    /// Returns `true` if empty or all whitespace.
    pub fn is_blank(&self) -> bool {
        self.chars().all(char::is_whitespace)
    }

    /// Alias for [`is_blank`](Self::is_blank).
    #[inline]
    pub fn is_whitespace(&self) -> bool {
        self.is_blank()
    }

    /// Returns `true` if non-empty and every codepoint is a hex digit.
    pub fn is_hexadecimal(&self) -> bool {
        !self.is_empty() && self.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Returns `true` if the content decodes as standard base64 (with
    /// padding). The empty strand is valid base64.
    pub fn is_base64(&self) -> bool {
        BASE64.decode(self.as_str()).is_ok()
    }

    /// Returns `true` if non-empty and parseable as JSON.
    pub fn is_json(&self) -> bool {
        !self.is_empty() && serde_json::from_str::<serde_json::Value>(self.as_str()).is_ok()
    }

    /// Returns `true` if the content has the shape of PHP-serialized data
    /// (`N;`, or a `b:`/`i:`/`d:`/`s:`/`a:`/`O:` payload with its
    /// terminator).
    pub fn is_serialized(&self) -> bool {
        let s = self.as_str();
        if s == "N;" {
            return true;
        }
        if s.len() < 4 {
            return false;
        }
        let mut chars = s.chars();
        let tag = chars.next().unwrap_or_default();
        let colon = chars.next().unwrap_or_default();
        matches!(tag, 'b' | 'i' | 'd' | 's' | 'a' | 'O')
            && colon == ':'
            && (s.ends_with(';') || s.ends_with('}'))
    }

    /// Returns `true` if the content contains HTML markup.
    pub fn is_html(&self) -> bool {
        html_regex().is_match(self.as_str()).unwrap_or(false)
    }

    /// Returns `true` if the content looks binary rather than textual:
    /// it contains NUL or a control codepoint other than tab, newline or
    /// carriage return.
    pub fn is_binary(&self) -> bool {
        self.chars()
            .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
    }

    /// Returns `true` for decimal numeric text: an optional sign, digits,
    /// and at most one decimal point.
    pub fn is_numeric(&self) -> bool {
        let s = self.as_str();
        let body = s.strip_prefix(['+', '-']).unwrap_or(s);
        if body.is_empty() {
            return false;
        }
        let mut seen_dot = false;
        let mut seen_digit = false;
        for c in body.chars() {
            match c {
                '0'..='9' => seen_digit = true,
                '.' if !seen_dot => seen_dot = true,
                _ => return false,
            }
        }
        seen_digit
    }

    /// Returns `true` if no codepoint is a control character.
    pub fn is_printable(&self) -> bool {
        !self.chars().any(char::is_control)
    }

    /// Returns `true` if non-empty and every codepoint is ASCII
    /// punctuation.
    pub fn is_punctuation(&self) -> bool {
        !self.is_empty() && self.chars().all(|c| c.is_ascii_punctuation())
    }

    /// Returns `true` if the content is a plausible email address.
    ///
    /// `options` can additionally reject documentation domains and a
    /// caller-supplied blocklist of disposable-email hosts.
    ///
    /// ```
    /// use strand::{EmailOptions, Strand};
    ///
    /// assert!(Strand::from("user@domain.com").is_email(&EmailOptions::default()));
    /// assert!(!Strand::from("user@@domain.com").is_email(&EmailOptions::default()));
    ///
    /// let strict = EmailOptions { reject_example_domains: true, ..Default::default() };
    /// assert!(!Strand::from("user@example.com").is_email(&strict));
    /// ```
    pub fn is_email(&self, options: &EmailOptions<'_>) -> bool {
        if !email_regex().is_match(self.as_str()).unwrap_or(false) {
            return false;
        }
        let host = match self.as_str().rsplit_once('@') {
            Some((_, host)) => host.to_ascii_lowercase(),
            None => return false,
        };
        if options.reject_example_domains {
            let documentation = matches!(
                host.as_str(),
                "example.com" | "example.org" | "example.net" | "example.edu"
            ) || host.ends_with(".test")
                || host.ends_with(".invalid")
                || host.ends_with(".localhost")
                || host.ends_with(".example");
            if documentation {
                return false;
            }
        }
        !options
            .disposable_domains
            .iter()
            .any(|d| d.eq_ignore_ascii_case(&host))
    }
}

#[cfg(test)]
mod tests {
    use crate::{EmailOptions, Strand};

    fn s(text: &str) -> Strand {
        Strand::from(text)
    }

    #[test]
    fn class_predicates_reject_empty() {
        assert!(!s("").is_alpha());
        assert!(!s("").is_alphanumeric());
        assert!(!s("").is_hexadecimal());
        assert!(!s("").is_numeric());
        assert!(!s("").is_punctuation());
        assert!(s("").is_blank());
        assert!(s("").is_printable());
    }

    #[test]
    fn alpha_and_alphanumeric_are_unicode_aware() {
        assert!(s("fòôbàř").is_alpha());
        assert!(!s("fòô bàř").is_alpha());
        assert!(s("fòô123").is_alphanumeric());
        assert!(!s("fòô 123").is_alphanumeric());
    }

    #[test]
    fn numeric_shapes() {
        assert!(s("123").is_numeric());
        assert!(s("-12.5").is_numeric());
        assert!(s("+0.5").is_numeric());
        assert!(!s("1.2.3").is_numeric());
        assert!(!s(".").is_numeric());
        assert!(!s("12a").is_numeric());
        assert!(!s("1e3").is_numeric());
    }

    #[test]
    fn hexadecimal_and_base64() {
        assert!(s("deadBEEF01").is_hexadecimal());
        assert!(!s("0xg").is_hexadecimal());
        assert!(s("Zm9vIGJhcg==").is_base64());
        assert!(!s("not base64!!").is_base64());
    }

    #[test]
    fn json_detection() {
        assert!(s("{\"a\": [1, 2]}").is_json());
        assert!(s("123").is_json());
        assert!(!s("{invalid}").is_json());
        assert!(!s("").is_json());
    }

    #[test]
    fn serialized_detection() {
        assert!(s("N;").is_serialized());
        assert!(s("b:1;").is_serialized());
        assert!(s("s:3:\"foo\";").is_serialized());
        assert!(s("a:1:{i:0;s:3:\"foo\";}").is_serialized());
        assert!(!s("foo").is_serialized());
        assert!(!s("s:").is_serialized());
    }

    #[test]
    fn html_and_binary() {
        assert!(s("<p class=\"x\">hi</p>").is_html());
        assert!(s("line<br/>break").is_html());
        assert!(!s("2 < 3 and 4 > 1").is_html());
        assert!(s("a\u{0}b").is_binary());
        assert!(!s("plain\ttext\n").is_binary());
    }

    #[test]
    fn email_validation_and_options() {
        let default = EmailOptions::default();
        assert!(s("user.name+tag@sub.domain.co").is_email(&default));
        assert!(!s("no-at-sign").is_email(&default));
        assert!(!s("user@-bad-.com").is_email(&default));
        assert!(s("user@example.com").is_email(&default));

        let strict = EmailOptions {
            reject_example_domains: true,
            ..Default::default()
        };
        assert!(!s("user@example.com").is_email(&strict));
        assert!(!s("user@foo.test").is_email(&strict));
        assert!(s("user@real-domain.io").is_email(&strict));

        let blocked = EmailOptions {
            disposable_domains: &["mailinator.com"],
            ..Default::default()
        };
        assert!(!s("user@MAILINATOR.com").is_email(&blocked));
        assert!(s("user@domain.com").is_email(&blocked));
    }

    #[test]
    fn punctuation() {
        assert!(s("?!;,.").is_punctuation());
        assert!(!s("a!").is_punctuation());
    }
}
