//! Line-oriented i18n key extraction.
//!
//! Two pattern families are applied to each line independently:
//!
//! - function calls: `t("key")`, `t('key')`, `` t(`key`) ``, `t_custom("key")`
//! - component attributes: `i18nKey="key"`, `i18nKey='key'`, `i18nKey={"key"}`
//!
//! The compiled patterns are immutable statics. Every scan drives its own
//! iteration, so no search position survives between calls.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{
    Captures,
    Match,
    Regex,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::types::{
    KeyRange,
    utf16_offset,
};

/// `t` or `t_segment...` followed by `(` and a quoted key.
///
/// The "not preceded by a word character" rule is checked in code because
/// the `regex` crate has no look-behind.
static FUNCTION_CALL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(
        "function call",
        r#"t(?:_[A-Za-z0-9]+)*\(\s*(?:"(?P<double>[^"']*)"|'(?P<single>[^"']*)'|`(?P<template>[^`]*)`)"#,
    )
});

/// `i18nKey=` attribute with a quoted, optionally braced, non-empty value.
static COMPONENT_ATTRIBUTE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(
        "component attribute",
        r#"i18nKey\s*=\s*(?:"(?P<double>[^"]+)"|'(?P<single>[^']+)'|\{\s*(?:"(?P<brace_double>[^"]+)"|'(?P<brace_single>[^']+)')\s*\})"#,
    )
});

/// `$t(key)` nesting inside a translation value, with optional options argument.
static NESTED_REFERENCE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(
        "nested reference",
        r#"\$t\(\s*(?:"(?P<double>[^"]*)"|'(?P<single>[^']*)'|(?P<bare>[^\s"'(),]+))\s*(?:,[^)]*)?\)"#,
    )
});

/// Capture groups that may hold the key, per family.
const FUNCTION_CALL_GROUPS: &[&str] = &["double", "single", "template"];
const COMPONENT_ATTRIBUTE_GROUPS: &[&str] = &["double", "single", "brace_double", "brace_single"];
const NESTED_REFERENCE_GROUPS: &[&str] = &["double", "single", "bare"];

/// Marker of template interpolation inside a key.
const DYNAMIC_KEY_MARKER: &str = "${";

fn compile(name: &str, pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .map_err(|e| tracing::error!("Failed to compile {name} pattern: {e}"))
        .ok()
}

/// Which syntax produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    /// `t("key")` and friends
    FunctionCall,
    /// `i18nKey="key"`
    ComponentAttribute,
}

/// One located occurrence of an i18n key on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatch {
    /// Key text exactly as written between the quotes.
    pub key: String,
    /// Span of the key text only, excluding quotes.
    pub range: KeyRange,
    /// Full text matched by the pattern.
    pub raw: String,
    pub kind: MatchKind,
}

impl KeyMatch {
    /// Whether the key contains template interpolation and cannot be looked up.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        is_dynamic_key(&self.key)
    }
}

/// Checks for `${...}` interpolation in a key.
#[must_use]
pub fn is_dynamic_key(key: &str) -> bool {
    key.contains(DYNAMIC_KEY_MARKER)
}

/// A `$t(...)` reference found inside a translation value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedReference {
    pub key: String,
    /// Byte span of the whole `$t(...)` expression.
    pub span: Range<usize>,
}

/// Scans one line for every i18n key occurrence.
///
/// Function-call matches come first, then component-attribute matches, each
/// family in left-to-right order. Malformed fragments simply yield nothing.
#[must_use]
pub fn scan_line(text: &str, line: u32) -> Vec<KeyMatch> {
    let mut matches = scan_function_calls(text, line);
    matches.extend(scan_component_attributes(text, line));
    matches
}

/// Scans one line for `t(...)` calls only.
#[must_use]
pub fn scan_function_calls(text: &str, line: u32) -> Vec<KeyMatch> {
    let Some(pattern) = FUNCTION_CALL_PATTERN.as_ref() else {
        return Vec::new();
    };

    let mut matches = Vec::new();
    let mut search_from = 0;

    while let Some(captures) = pattern.captures_at(text, search_from) {
        let Some(whole) = captures.get(0) else {
            break;
        };

        if is_preceded_by_word_char(text, whole.start()) {
            // The candidate starts with the ASCII `t`, so the next char
            // boundary is one byte ahead. Resuming there keeps an overlapping
            // call such as `at_x("t("a.b")` reachable.
            search_from = whole.start() + 1;
            continue;
        }

        if let Some(body) = key_group(&captures, FUNCTION_CALL_GROUPS) {
            matches.push(build_match(text, line, body, whole, MatchKind::FunctionCall));
        }
        search_from = whole.end();
    }

    matches
}

/// Scans one line for `i18nKey` attributes only.
#[must_use]
pub fn scan_component_attributes(text: &str, line: u32) -> Vec<KeyMatch> {
    let Some(pattern) = COMPONENT_ATTRIBUTE_PATTERN.as_ref() else {
        return Vec::new();
    };

    pattern
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let body = key_group(&captures, COMPONENT_ATTRIBUTE_GROUPS)?;
            Some(build_match(text, line, body, whole, MatchKind::ComponentAttribute))
        })
        .collect()
}

/// Finds `$t(key)` references inside a translation value.
#[must_use]
pub fn scan_nested_references(value: &str) -> Vec<NestedReference> {
    let Some(pattern) = NESTED_REFERENCE_PATTERN.as_ref() else {
        return Vec::new();
    };

    pattern
        .captures_iter(value)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let key = key_group(&captures, NESTED_REFERENCE_GROUPS)?;
            Some(NestedReference { key: key.as_str().to_string(), span: whole.range() })
        })
        .collect()
}

fn key_group<'h>(captures: &Captures<'h>, groups: &[&str]) -> Option<Match<'h>> {
    groups.iter().find_map(|name| captures.name(name))
}

fn is_preceded_by_word_char(text: &str, index: usize) -> bool {
    text.get(..index)
        .and_then(|prefix| prefix.chars().next_back())
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Builds a match whose range is the capture group's own position.
fn build_match(
    text: &str,
    line: u32,
    body: Match<'_>,
    whole: Match<'_>,
    kind: MatchKind,
) -> KeyMatch {
    let start = utf16_offset(text, body.start());
    let end = utf16_offset(text, body.end());

    KeyMatch {
        key: body.as_str().to_string(),
        range: KeyRange::new(line, start, end),
        raw: whole.as_str().to_string(),
        kind,
    }
}
