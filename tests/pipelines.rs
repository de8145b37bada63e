//! End-to-end fixtures that cross module boundaries the way callers do:
//! clean up, reshape, tokenize and armor in one chain.

use pretty_assertions::assert_eq;
use strand::{EmailOptions, FormatArg, PadType, QuoteStyle, Strand};

fn s(text: &str) -> Strand {
    Strand::from(text)
}

// =============================================================================
// Reshaping
// =============================================================================

#[test]
fn whitespace_cleanup() {
    assert_eq!(s("  foo   bar  ").collapse_whitespace(), "foo bar");
    assert_eq!(s("--fòô--").trim(Some("-")), "fòô");
    assert_eq!(s("\u{00A0}fòô\u{2007}").trim(None), "fòô");
}

#[test]
fn padding_fixtures() {
    assert_eq!(s("foo").pad(5, "*", PadType::Right).unwrap(), "foo**");
    assert_eq!(s("foo").pad(6, "ab", PadType::Left).unwrap(), "abafoo");
    assert_eq!(s("foo").pad(7, "-", PadType::Both).unwrap(), "--foo--");
    // Shorter targets and negative lengths leave the value alone.
    assert_eq!(s("foo").pad(2, "*", PadType::Right).unwrap(), "foo");
    assert_eq!(s("foo").pad(-1, "*", PadType::Right).unwrap(), "foo");
    assert!(s("foo").pad(5, "", PadType::Right).is_err());
}

#[test]
fn truncation_fixtures() {
    assert_eq!(s("Test foo bar").truncate(4, ""), "Test");
    assert_eq!(s("Test foo bar").truncate(11, "..."), "Test foo...");
    assert_eq!(s("Test foo bar").safe_truncate(8, ""), "Test foo");
    assert_eq!(s("Test foo bar").safe_truncate(11, "..."), "Test foo...");
    assert_eq!(s("Test").truncate(10, "..."), "Test");
    assert_eq!(s("Test foo bar").shorten_after_word(7, "..."), "Test foo...");
}

#[test]
fn composite_casing() {
    assert_eq!(s("CamelCase").underscored(), "camel_case");
    assert_eq!(s("HTMLParser").underscored(), "html_parser");
    assert_eq!(s("data_rate").camelize(), "dataRate");
    assert_eq!(s("background-color").camelize(), "backgroundColor");
    assert_eq!(s("some words here").pascalize(), "SomeWordsHere");
    assert_eq!(s("fooBar2Baz").dasherize(), "foo-bar-2-baz");
}

#[test]
fn titles_and_slugs() {
    assert_eq!(
        s("this is the title").titleize(&["is", "the"]),
        "This is the Title"
    );
    assert_eq!(
        s("a small word at the end is nothing to be afraid of")
            .titleize_for_humans(&[]),
        "A Small Word at the End Is Nothing to Be Afraid Of"
    );
    assert_eq!(s("Fòô & Bàř, 2nd Edition!").slugify("-"), "foo-bar-2nd-edition");
    assert_eq!(s("foooooo").urlify("-", "en", &[("foooooo", "bar")]), "bar");
}

// =============================================================================
// Search and replace
// =============================================================================

#[test]
fn replacement_fixtures() {
    let original = s("fòô bàř fòô");
    assert_eq!(original.replace("fòô", "bàz"), "bàz bàř bàz");
    assert_eq!(original.replace_first("fòô", "bàz"), "bàz bàř fòô");
    assert_eq!(original.replace_last("fòô", "bàz"), "fòô bàř bàz");
    assert_eq!(original, "fòô bàř fòô");

    assert_eq!(
        s("a b c").replace_all(&["a", "c"], &["x", "z"]).unwrap(),
        "x b z"
    );
    assert!(s("a").replace_all(&["a", "b"], &["x", "y", "z"]).is_err());
}

#[test]
fn regex_replacement() {
    assert_eq!(
        s("fòô bàř").regex_replace(r"\s+", "_", "").unwrap(),
        "fòô_bàř"
    );
    assert_eq!(
        s("FOO bar").regex_replace("foo", "baz", "i").unwrap(),
        "baz bar"
    );
    assert!(s("x").regex_replace("(unclosed", "", "").is_err());
}

// =============================================================================
// Tokenizing
// =============================================================================

#[test]
fn split_and_rejoin() {
    let csv = s("foo,bar,baz");
    assert_eq!(csv.split(",", Some(2)).unwrap().to_strings(), ["foo", "bar"]);
    assert_eq!(csv.explode(",").unwrap().implode(" | "), "foo | bar | baz");
    assert_eq!(s("fòôbàř").chunk(3).unwrap().to_strings(), ["fòô", "bàř"]);
}

#[test]
fn word_streams() {
    let text = s("Fòô, bàř!");
    assert_eq!(
        text.words_collection("", false, None).to_strings(),
        ["Fòô", ", ", "bàř", "!", ""]
    );
    assert_eq!(text.words_collection("", false, None).implode(""), text);
    assert_eq!(text.words().to_strings(), ["Fòô", "bàř"]);
}

// =============================================================================
// Markup and encoding layers
// =============================================================================

#[test]
fn html_pipeline() {
    let markup = s("<p>fòô <b>bàř</b><br>bàz</p>");
    assert_eq!(markup.remove_html_break(" ").remove_html(""), "fòô bàř bàz");
    assert_eq!(
        s("x & <y>").html_encode(QuoteStyle::Both).html_decode(),
        "x & <y>"
    );
}

#[test]
fn xss_stripping() {
    let dirty = s(r#"<p onclick="evil()">hi</p><script>bad()</script>"#);
    assert_eq!(dirty.remove_xss(), "<p>hi</p>");
}

#[test]
fn url_layers() {
    let original = s("fòô bàř?");
    assert_eq!(original.url_encode().url_decode(), original);
    // A doubly encoded payload needs the multi-pass decoder.
    let twice = original.url_encode().url_encode();
    assert_ne!(twice.url_decode(), original);
    assert_eq!(twice.url_decode_multi(), original);
}

#[test]
fn formatting() {
    let line = s("%-- %s: %05.1f%%")
        .replace("%--", "*")
        .format(&["load".into(), FormatArg::Float(7.3)])
        .unwrap();
    assert_eq!(line, "* load: 007.3%");
}

// =============================================================================
// Predicates
// =============================================================================

#[test]
fn content_predicates() {
    assert!(s("fòôbàř").is_alpha());
    assert!(!s("fòô bàř").is_alpha());
    assert!(s("  \t\n").is_blank());
    assert!(s(r#"{"a": [1, 2]}"#).is_json());
    assert!(!s("{a: 1}").is_json());
    assert!(s("<p>x</p>").is_html());
    assert!(s("deadBEEF").is_hexadecimal());
    assert!(s("-12.5").is_numeric());
    assert!(!s("12e3").is_numeric());
}

#[test]
fn email_validation() {
    let options = EmailOptions::default();
    assert!(s("user.name+tag@sub.example.co").is_email(&options));
    assert!(!s("not an email").is_email(&options));
    assert!(!s("missing@tld").is_email(&options));
}

// =============================================================================
// Armor round trips
// =============================================================================

#[test]
fn armor_round_trips() {
    let secret = s("fòô bàř");
    assert_eq!(secret.base64_encode().base64_decode().unwrap(), secret);
    assert_eq!(secret.hex_encode().hex_decode().unwrap(), secret);

    let sealed = secret.encrypt("passphrase").unwrap();
    assert_eq!(sealed.decrypt("passphrase").unwrap(), secret);
    assert!(sealed.decrypt("wrong").is_err());
}
