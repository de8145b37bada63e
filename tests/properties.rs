//! Property tests for the invariants that hold over arbitrary input:
//! idempotence, round trips and non-mutation.

use proptest::prelude::*;
use strand::Strand;

proptest! {
    #[test]
    fn trim_is_idempotent(text in "\\PC*") {
        let once = Strand::from(text.as_str()).trim(None);
        prop_assert_eq!(once.trim(None), once.clone());
    }

    #[test]
    fn collapse_whitespace_is_idempotent(text in "\\PC*") {
        let once = Strand::from(text.as_str()).collapse_whitespace();
        prop_assert_eq!(once.collapse_whitespace(), once.clone());
    }

    #[test]
    fn reverse_is_an_involution(text in "\\PC*") {
        let original = Strand::from(text.as_str());
        prop_assert_eq!(original.reverse().reverse(), original);
    }

    #[test]
    fn shuffle_preserves_the_codepoint_multiset(text in "\\PC*") {
        let original = Strand::from(text.as_str());
        let shuffled = original.shuffle();
        let mut a: Vec<char> = original.chars().collect();
        let mut b: Vec<char> = shuffled.chars().collect();
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn url_encoding_round_trips(text in "\\PC*") {
        let original = Strand::from(text.as_str());
        prop_assert_eq!(original.url_encode().url_decode(), original.clone());
        prop_assert_eq!(original.url_encode_raw().url_decode_raw(), original);
    }

    #[test]
    fn base64_round_trips(text in "\\PC*") {
        let original = Strand::from(text.as_str());
        prop_assert_eq!(original.base64_encode().base64_decode().unwrap(), original);
    }

    #[test]
    fn hex_round_trips(text in "\\PC*") {
        let original = Strand::from(text.as_str());
        prop_assert_eq!(original.hex_encode().hex_decode().unwrap(), original);
    }

    #[test]
    fn encryption_round_trips(text in "\\PC*", key in "\\PC{1,16}") {
        let original = Strand::from(text.as_str());
        let sealed = original.encrypt(&key).unwrap();
        prop_assert_eq!(sealed.decrypt(&key).unwrap(), original);
    }

    #[test]
    fn escape_round_trips(text in "\\PC*") {
        let original = Strand::from(text.as_str());
        prop_assert_eq!(original.escape().html_decode(), original);
    }

    #[test]
    fn word_tokens_rejoin_to_the_input(text in "\\PC*") {
        let original = Strand::from(text.as_str());
        let tokens = original.words_collection("", false, None);
        prop_assert_eq!(tokens.implode(""), original);
    }

    #[test]
    fn length_counts_codepoints(text in "\\PC*") {
        let value = Strand::from(text.as_str());
        prop_assert_eq!(value.length(), value.chars().count());
        prop_assert!(value.byte_len() >= value.length());
    }

    #[test]
    fn permissive_and_strict_access_agree_in_range(text in "\\PC{1,32}") {
        let value = Strand::from(text.as_str());
        for index in 0..value.length() {
            let strict = value.char_at(index as isize).unwrap().to_string();
            prop_assert_eq!(value.at(index as isize), strict.as_str());
        }
        prop_assert_eq!(value.at(value.length() as isize), "");
        prop_assert!(value.char_at(value.length() as isize).is_err());
    }

    #[test]
    fn transformations_do_not_mutate(text in "\\PC*") {
        let original = Strand::from(text.as_str());
        let copy = original.clone();
        let _ = original.uppercase();
        let _ = original.trim(None);
        let _ = original.replace("a", "b");
        let _ = original.reverse();
        prop_assert_eq!(original, copy);
    }
}
