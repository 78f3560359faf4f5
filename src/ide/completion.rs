//! Completion implementation

use tower_lsp::lsp_types::{
    CompletionItem,
    CompletionItemKind,
    CompletionTextEdit,
    Documentation,
    MarkupContent,
    MarkupKind,
    TextEdit,
};

use crate::ide::hover::translation_info_markdown;
use crate::ide::lookup::match_at;
use crate::resolver::resolve_with_depth;
use crate::store::TranslationSnapshot;
use crate::types::SourcePosition;

/// Generates completion items for the key under the cursor.
///
/// The partially typed key is used as a prefix filter over every leaf path,
/// and each item replaces the whole key text. Outside a key nothing is
/// offered.
#[must_use]
pub fn generate_completions(
    line: &str,
    position: SourcePosition,
    snapshot: &TranslationSnapshot,
    depth: usize,
) -> Vec<CompletionItem> {
    let Some(key_match) = match_at(line, position.line, position.character) else {
        return Vec::new();
    };
    let replace_range = key_match.range.into();

    let mut completion_items: Vec<CompletionItem> = snapshot
        .tree
        .keys_with_prefix(&key_match.key)
        .into_iter()
        .map(|key| {
            let value = snapshot
                .tree
                .lookup(&key)
                .map(|value| resolve_with_depth(value, &snapshot.tree, depth));

            CompletionItem {
                label: key.clone(),
                kind: Some(CompletionItemKind::VALUE),
                detail: value.as_ref().map(|value| format!("{value} ({})", snapshot.language_code)),
                documentation: value.as_ref().map(|value| {
                    Documentation::MarkupContent(MarkupContent {
                        kind: MarkupKind::Markdown,
                        value: translation_info_markdown(&key, value, &snapshot.language_code),
                    })
                }),
                text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                    range: replace_range,
                    new_text: key,
                })),
                ..Default::default()
            }
        })
        .collect();

    completion_items.sort_by(|a, b| a.label.cmp(&b.label));

    completion_items
}
