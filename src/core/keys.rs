//! Key normalization and prefix correlation between featured items and
//! category sections.
//!
//! Section keys generated by the CMS are not byte-stable across edits, but
//! their leading characters are. Items are correlated to sections by comparing
//! only that leading prefix. When two sections share a prefix the first one in
//! declaration order wins.

use crate::types::CategorySection;

/// Length, in characters, of the stable prefix of a composite key.
pub const CORE_KEY_LEN: usize = 12;

/// Zero-width, direction-mark and separator characters that leak into CMS
/// text fields.
pub fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}' | '\u{2028}' | '\u{2029}' | '\u{202A}'..='\u{202E}' | '\u{2060}' | '\u{FEFF}'
    )
}

pub fn strip_invisible(s: &str) -> String {
    s.chars()
        .filter(|c| !is_invisible(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Like [`strip_invisible`] but maps blank results to `None`.
pub fn clean_opt(s: Option<&str>) -> Option<String> {
    s.map(strip_invisible).filter(|s| !s.is_empty())
}

/// Reduces a composite key to its stable prefix.
pub fn normalize(key: &str) -> String {
    let core: String = strip_invisible(key).chars().take(CORE_KEY_LEN).collect();
    core.trim_end().to_string()
}

/// True when both keys reduce to the same non-empty prefix.
pub fn prefix_matches(a: &str, b: &str) -> bool {
    let a = normalize(a);
    !a.is_empty() && a == normalize(b)
}

/// The section a featured item's key refers to.
pub fn find_section<'a>(sections: &'a [CategorySection], key: &str) -> Option<&'a CategorySection> {
    sections.iter().find(|section| prefix_matches(key, &section.key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{category, section};
    use proptest::prelude::*;

    const KEYISH: &str = "[a-zA-Z0-9 \t\u{00A0}\u{200B}-\u{200F}\u{2028}\u{2029}\u{202A}-\u{202E}\u{2060}\u{FEFF}é_-]{0,40}";

    proptest! {
        #[test]
        fn normalize_is_idempotent_for_any_string(s in any::<String>()) {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalized_keys_are_short_and_clean(s in KEYISH) {
            let core = normalize(&s);
            prop_assert!(core.chars().count() <= CORE_KEY_LEN);
            prop_assert!(!core.chars().any(is_invisible));
            prop_assert_eq!(core.trim(), core.as_str());
            prop_assert_eq!(normalize(&core), core.clone());
        }

        #[test]
        fn prefix_match_ignores_suffixes(core in "[a-z0-9]{12}", a in KEYISH, b in KEYISH) {
            let zero_width_prefixed = format!("\u{200B}{}{}", core, b);
            let plain = format!("{}{}", core, a);
            prop_assert!(prefix_matches(&plain, &zero_width_prefixed));
        }
    }

    #[test]
    fn normalize_strips_and_truncates() {
        assert_eq!(normalize("\u{200B} abcdef123456-v1 "), "abcdef123456");
        assert_eq!(normalize("short\u{FEFF}"), "short");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("\u{2060}\u{200D}"), "");
    }

    #[test]
    fn normalize_counts_chars_not_bytes() {
        assert_eq!(normalize("ééééééééééééé"), "éééééééééééé");
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = [
            "",
            "   ",
            "abcdef123456-v1",
            "abcdefghijk def",
            "\u{200E}key\u{202C} with marks",
            "ключ-раздела-длинный",
            "a\u{2028}b\u{2029}c",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn strip_invisible_keeps_inner_spaces() {
        assert_eq!(strip_invisible("\u{200B}Oil on\u{00A0}linen \u{FEFF}"), "Oil on\u{00A0}linen");
        assert_eq!(clean_opt(Some("\u{200B}")), None);
        assert_eq!(clean_opt(None), None);
    }

    #[test]
    fn empty_keys_never_match() {
        assert!(!prefix_matches("", ""));
        assert!(!prefix_matches("\u{200B}", ""));
        assert!(prefix_matches("abcdef123456-a", "abcdef123456-b"));
    }

    #[test]
    fn first_section_wins_on_prefix_collision() {
        let sections = vec![
            section("abcdef123456-v1", category("c1", "fashion")),
            section("abcdef123456-v2", category("c2", "editorial")),
        ];
        let found = find_section(&sections, "abcdef123456-v2").unwrap();
        assert_eq!(found.key, "abcdef123456-v1");
        assert!(find_section(&sections, "zzzzzz").is_none());
        assert!(find_section(&sections, "").is_none());
    }
}
