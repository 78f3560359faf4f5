//! Virtual text (inline translation display) for editor extensions.
//!
//! The editor hides each key's text and draws the decoration in its place.

use serde::{
    Deserialize,
    Serialize,
};
use tower_lsp::lsp_types::Range;

use crate::ide::lookup::{
    Resolution,
    resolve_match,
};
use crate::store::TranslationSnapshot;
use crate::syntax::scan_document;

/// How a decorated key resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecorationStatus {
    Found,
    Missing,
    Dynamic,
}

/// Translation decoration info for a key usage in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationDecoration {
    pub range: Range,
    pub key: String,
    /// Resolved value; `None` unless `status` is `found`.
    pub value: Option<String>,
    pub status: DecorationStatus,
}

/// Generates translation decorations for all key usages in a document.
#[must_use]
pub fn get_translation_decorations(
    text: &str,
    snapshot: &TranslationSnapshot,
    depth: usize,
) -> Vec<TranslationDecoration> {
    scan_document(text)
        .into_iter()
        .map(|key_match| {
            let (value, status) = match resolve_match(&key_match, &snapshot.tree, depth) {
                Resolution::Found(value) => (Some(value), DecorationStatus::Found),
                Resolution::NotFound => (None, DecorationStatus::Missing),
                Resolution::Dynamic => (None, DecorationStatus::Dynamic),
            };

            TranslationDecoration { range: key_match.range.into(), key: key_match.key, value, status }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;
    use tower_lsp::lsp_types::Position;

    use super::*;
    use crate::dictionary::TranslationTree;

    #[fixture]
    fn snapshot() -> TranslationSnapshot {
        let tree = TranslationTree::from_json(&json!({
            "common": { "hello": "こんにちは $t(common.name)", "name": "世界" }
        }))
        .unwrap();
        TranslationSnapshot::new(tree, "ja")
    }

    #[rstest]
    fn get_decorations_basic(snapshot: TranslationSnapshot) {
        let decorations =
            get_translation_decorations(r#"const msg = t("common.hello");"#, &snapshot, 1);

        assert_that!(decorations, len(eq(1)));
        assert_that!(decorations[0].key, eq("common.hello"));
        assert_that!(decorations[0].value, some(eq("こんにちは $t(⤷ 世界)")));
        assert_that!(decorations[0].status, eq(DecorationStatus::Found));
        assert_that!(
            decorations[0].range,
            eq(Range::new(Position::new(0, 15), Position::new(0, 27)))
        );
    }

    #[rstest]
    fn get_decorations_statuses(snapshot: TranslationSnapshot) {
        let text = "t(\"common.name\")\nt(\"common.nope\")\nt(`common.${x}`)\n";

        let decorations = get_translation_decorations(text, &snapshot, 1);

        let statuses: Vec<_> = decorations.iter().map(|d| d.status).collect();
        assert_that!(
            statuses,
            elements_are![
                eq(&DecorationStatus::Found),
                eq(&DecorationStatus::Missing),
                eq(&DecorationStatus::Dynamic),
            ]
        );
        assert_that!(decorations[1].value, none());
    }

    #[rstest]
    fn decoration_serializes_for_the_client(snapshot: TranslationSnapshot) {
        let decorations = get_translation_decorations(r#"t("common.nope")"#, &snapshot, 1);

        let value = serde_json::to_value(&decorations).unwrap();

        assert_that!(
            value,
            eq(&json!([{
                "range": {
                    "start": { "line": 0, "character": 3 },
                    "end": { "line": 0, "character": 14 }
                },
                "key": "common.nope",
                "value": null,
                "status": "missing"
            }]))
        );
    }
}
