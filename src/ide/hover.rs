//! Hover implementation

use tower_lsp::lsp_types::{
    Hover,
    HoverContents,
    MarkupContent,
    MarkupKind,
};

use crate::ide::lookup::{
    Resolution,
    match_at,
    resolve_match,
};
use crate::store::TranslationSnapshot;
use crate::types::SourcePosition;

/// Markdown block describing one translation.
///
/// Shared with completion item documentation.
#[must_use]
pub fn translation_info_markdown(key: &str, value: &str, language_code: &str) -> String {
    format!("#### ✨ {value}\n<sub>🌐 {language_code}</sub>\n<sub>🔑 {key}</sub>\n")
}

fn missing_key_markdown(key: &str, language_code: &str) -> String {
    format!("#### ❗ key not found\n<sub>🌐 {language_code}</sub>\n<sub>🔑 {key}</sub>\n")
}

fn dynamic_key_markdown(key: &str) -> String {
    format!("#### 🧩 dynamic key\nCannot be resolved statically.\n<sub>🔑 {key}</sub>\n")
}

/// Generates hover content for the key under the cursor.
///
/// `line` is the text of the cursor's line only.
#[must_use]
pub fn generate_hover(
    line: &str,
    position: SourcePosition,
    snapshot: &TranslationSnapshot,
    depth: usize,
) -> Option<Hover> {
    let key_match = match_at(line, position.line, position.character)?;

    let value = match resolve_match(&key_match, &snapshot.tree, depth) {
        Resolution::Found(value) => {
            translation_info_markdown(&key_match.key, &value, &snapshot.language_code)
        }
        Resolution::NotFound => missing_key_markdown(&key_match.key, &snapshot.language_code),
        Resolution::Dynamic => dynamic_key_markdown(&key_match.key),
    };

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent { kind: MarkupKind::Markdown, value }),
        range: Some(key_match.range.into()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;
    use tower_lsp::lsp_types::{
        Position,
        Range,
    };

    use super::*;
    use crate::dictionary::TranslationTree;

    #[fixture]
    fn snapshot() -> TranslationSnapshot {
        let tree = TranslationTree::from_json(&json!({
            "common": {
                "hello": "Hi $t(common.name)",
                "name": "World"
            }
        }))
        .unwrap();
        TranslationSnapshot::new(tree, "en")
    }

    fn markdown(hover: &Hover) -> &str {
        match &hover.contents {
            HoverContents::Markup(content) => &content.value,
            other => panic!("unexpected hover contents: {other:?}"),
        }
    }

    const fn pos(line: u32, character: u32) -> SourcePosition {
        SourcePosition { line, character }
    }

    #[rstest]
    fn hover_found_key(snapshot: TranslationSnapshot) {
        let hover = generate_hover(r#"  t("common.hello")"#, pos(4, 8), &snapshot, 1).unwrap();

        assert_that!(
            markdown(&hover),
            eq("#### ✨ Hi $t(⤷ World)\n<sub>🌐 en</sub>\n<sub>🔑 common.hello</sub>\n")
        );
        assert_that!(
            hover.range,
            some(eq(Range::new(Position::new(4, 5), Position::new(4, 17))))
        );
    }

    #[rstest]
    fn hover_missing_key(snapshot: TranslationSnapshot) {
        let hover = generate_hover(r#"t("common.nope")"#, pos(0, 5), &snapshot, 1).unwrap();

        assert_that!(
            markdown(&hover),
            all![contains_substring("key not found"), contains_substring("🔑 common.nope")]
        );
    }

    #[rstest]
    fn hover_dynamic_key(snapshot: TranslationSnapshot) {
        let hover = generate_hover("t(`common.${name}`)", pos(0, 4), &snapshot, 1).unwrap();

        assert_that!(markdown(&hover), contains_substring("dynamic key"));
    }

    #[rstest]
    fn hover_outside_key(snapshot: TranslationSnapshot) {
        assert_that!(generate_hover(r#"t("common.hello")"#, pos(0, 0), &snapshot, 1), none());
        assert_that!(generate_hover("const x = 1;", pos(0, 3), &snapshot, 1), none());
    }

    #[rstest]
    fn hover_component_attribute(snapshot: TranslationSnapshot) {
        let hover =
            generate_hover(r#"<Trans i18nKey="common.name" />"#, pos(0, 20), &snapshot, 0).unwrap();

        assert_that!(markdown(&hover), starts_with("#### ✨ World\n"));
    }
}
