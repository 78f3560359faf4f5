//! Cursor and document level queries over key matches.

use crate::dictionary::TranslationTree;
use crate::resolver::resolve_with_depth;
use crate::syntax::{
    KeyMatch,
    scan_document,
    scan_line,
};
use crate::types::KeyRange;
use crate::validation::is_valid_key;

/// What a key match resolves to for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Leaf value after `$t(...)` substitution.
    Found(String),
    NotFound,
    /// Contains `${...}`; never looked up.
    Dynamic,
}

/// First match on the line whose range touches the cursor.
///
/// The range end is inclusive, so a cursor right after the key's last
/// character still selects it.
#[must_use]
pub fn match_at(line: &str, line_number: u32, cursor: u32) -> Option<KeyMatch> {
    scan_line(line, line_number).into_iter().find(|m| m.range.contains_offset(cursor))
}

#[must_use]
pub fn matches_on_line(line: &str, line_number: u32) -> Vec<KeyMatch> {
    scan_line(line, line_number)
}

/// Ranges of every key in the document without a `.` separator.
#[must_use]
pub fn invalid_ranges_in_document(text: &str) -> Vec<KeyRange> {
    scan_document(text)
        .into_iter()
        .filter(|m| !is_valid_key(&m.key))
        .map(|m| m.range)
        .collect()
}

/// Looks a match up, short-circuiting dynamic keys.
#[must_use]
pub fn resolve_match(key_match: &KeyMatch, tree: &TranslationTree, depth: usize) -> Resolution {
    if key_match.is_dynamic() {
        return Resolution::Dynamic;
    }

    tree.lookup(&key_match.key).map_or(Resolution::NotFound, |value| {
        Resolution::Found(resolve_with_depth(value, tree, depth))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;

    #[fixture]
    fn tree() -> TranslationTree {
        TranslationTree::from_json(&json!({
            "common": {
                "hello": "Hi $t(common.name)",
                "name": "World"
            }
        }))
        .unwrap()
    }

    const LINE: &str = r#"<p>{t("common.hello")} {t("common.name")}</p>"#;

    #[rstest]
    #[case::before_first(6, None)]
    #[case::first_start(7, Some("common.hello"))]
    #[case::first_end_inclusive(19, Some("common.hello"))]
    #[case::between(21, None)]
    #[case::second(30, Some("common.name"))]
    fn test_match_at(#[case] cursor: u32, #[case] expected: Option<&str>) {
        let key = match_at(LINE, 0, cursor).map(|m| m.key);

        assert_that!(key.as_deref(), eq(expected));
    }

    #[rstest]
    fn match_at_finds_either_family() {
        let line = r#"t("a.b") i18nKey="c.d""#;

        assert_that!(match_at(line, 0, 4).map(|m| m.key), some(eq("a.b")));
        assert_that!(match_at(line, 0, 19).map(|m| m.key), some(eq("c.d")));
    }

    #[rstest]
    fn matches_on_line_returns_all() {
        let matches = matches_on_line(LINE, 2);

        assert_that!(matches, len(eq(2)));
        assert_that!(matches[1].range, eq(KeyRange::new(2, 27, 38)));
    }

    #[rstest]
    fn invalid_ranges_cover_single_segment_keys() {
        let text = "t(\"哈哈\")\nt(\"a.b\")\n<Trans i18nKey=\"abab\"/>\nt(\"\")\n";

        let ranges = invalid_ranges_in_document(text);

        assert_that!(
            ranges,
            elements_are![
                eq(&KeyRange::new(0, 3, 5)),
                eq(&KeyRange::new(2, 16, 20)),
                eq(&KeyRange::new(3, 3, 3)),
            ]
        );
    }

    #[rstest]
    fn invalid_ranges_in_empty_document() {
        assert_that!(invalid_ranges_in_document(""), is_empty());
    }

    #[rstest]
    fn resolve_found_applies_nesting(tree: TranslationTree) {
        let key_match = match_at(r#"t("common.hello")"#, 0, 3).unwrap();

        assert_that!(
            resolve_match(&key_match, &tree, 1),
            eq(&Resolution::Found("Hi $t(⤷ World)".to_string()))
        );
    }

    #[rstest]
    fn resolve_missing(tree: TranslationTree) {
        let key_match = match_at(r#"t("common.nope")"#, 0, 3).unwrap();

        assert_that!(resolve_match(&key_match, &tree, 1), eq(&Resolution::NotFound));
    }

    #[rstest]
    fn resolve_dynamic_is_never_looked_up() {
        let tree = TranslationTree::from_json(&json!({
            "common": { "locale_abbr": { "${language}": "should not be used" } }
        }))
        .unwrap();
        let key_match = match_at("t(`common.locale_abbr.${language}`)", 0, 3).unwrap();

        assert_that!(resolve_match(&key_match, &tree, 1), eq(&Resolution::Dynamic));
    }
}
