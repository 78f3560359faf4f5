//! `$t(...)` nesting substitution for displayed translation values.
//!
//! A translation value may embed another key, i18next style:
//! `"Hi $t(common.name)"`. For display, each embedded reference whose key
//! exists is rewritten to `$t(⤷ <value>)` so the reader can see what was
//! interpolated. References to unknown keys stay as written.

use std::borrow::Cow;

use crate::dictionary::TranslationTree;
use crate::syntax::scan_nested_references;

/// Hard upper bound on substitution passes, whatever the settings say.
pub const MAX_RESOLVE_DEPTH: usize = 8;

/// Glyph marking a substituted nested value.
pub const NESTED_MARKER: &str = "⤷";

const NESTING_PREFIX: &str = "$t";

/// Runs a single substitution pass over `value`.
///
/// Values without `$t` are returned borrowed. Never fails: malformed or
/// unknown references are left untouched.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use i18n_inspect_language_server::dictionary::TranslationTree;
/// use i18n_inspect_language_server::resolver::resolve;
///
/// let tree = TranslationTree::from_json(&json!({
///     "common": { "hello": "Hi $t(common.name)", "name": "World" }
/// }))
/// .unwrap();
///
/// assert_eq!(resolve("Hi $t(common.name)", &tree), "Hi $t(⤷ World)");
/// ```
#[must_use]
pub fn resolve<'a>(value: &'a str, tree: &TranslationTree) -> Cow<'a, str> {
    if !value.contains(NESTING_PREFIX) {
        return Cow::Borrowed(value);
    }

    let mut output = String::with_capacity(value.len());
    let mut copied_until = 0;

    for reference in scan_nested_references(value) {
        let Some(nested) = tree.lookup(&reference.key) else {
            tracing::trace!(key = %reference.key, "Nested key not found");
            continue;
        };

        output.push_str(value.get(copied_until..reference.span.start).unwrap_or_default());
        output.push_str(&render_nested(nested));
        copied_until = reference.span.end;
    }

    if copied_until == 0 {
        return Cow::Borrowed(value);
    }

    output.push_str(value.get(copied_until..).unwrap_or_default());
    Cow::Owned(output)
}

/// Repeats [`resolve`] until the value stops changing.
///
/// At most `max_depth` passes run, and never more than
/// [`MAX_RESOLVE_DEPTH`], so cyclic references terminate. `max_depth == 0`
/// returns `value` as is.
#[must_use]
pub fn resolve_with_depth(value: &str, tree: &TranslationTree, max_depth: usize) -> String {
    let mut current = value.to_string();

    for _ in 0..max_depth.min(MAX_RESOLVE_DEPTH) {
        match resolve(&current, tree) {
            Cow::Borrowed(_) => break,
            Cow::Owned(next) => current = next,
        }
    }

    current
}

fn render_nested(nested: &str) -> String {
    format!("{NESTING_PREFIX}({NESTED_MARKER} {nested})")
}
