//! Inlay hints showing the translated text right after each key.

use tower_lsp::lsp_types::{
    InlayHint,
    InlayHintKind,
    InlayHintLabel,
    InlayHintTooltip,
    Range,
};

use crate::ide::lookup::{
    Resolution,
    matches_on_line,
    resolve_match,
};
use crate::store::TranslationSnapshot;

/// Label for keys absent from the dictionary.
pub const MISSING_KEY_LABEL: &str = "❗❗ Σ(°Д°; key not found ❗❗";

/// Label for keys with `${...}` interpolation.
pub const DYNAMIC_KEY_LABEL: &str = "🧩 dynamic key";

/// Hint text for one resolution.
#[must_use]
pub fn hint_label(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Found(value) => format!("✨ {value}"),
        Resolution::NotFound => MISSING_KEY_LABEL.to_string(),
        Resolution::Dynamic => DYNAMIC_KEY_LABEL.to_string(),
    }
}

/// Generates hints for every key on the lines covered by `range`.
///
/// Both range ends are inclusive on the line axis; `None` covers the whole
/// document.
#[must_use]
pub fn generate_inlay_hints(
    text: &str,
    range: Option<Range>,
    snapshot: &TranslationSnapshot,
    depth: usize,
) -> Vec<InlayHint> {
    let (first_line, last_line) = range.map_or((0, u32::MAX), |r| (r.start.line, r.end.line));

    text.lines()
        .zip(0_u32..)
        .skip_while(|(_, line_number)| *line_number < first_line)
        .take_while(|(_, line_number)| *line_number <= last_line)
        .flat_map(|(line, line_number)| matches_on_line(line, line_number))
        .map(|key_match| {
            let resolution = resolve_match(&key_match, &snapshot.tree, depth);

            InlayHint {
                position: key_match.range.end_position().into(),
                label: InlayHintLabel::String(hint_label(&resolution)),
                kind: Some(InlayHintKind::PARAMETER),
                text_edits: None,
                tooltip: Some(InlayHintTooltip::String(format!(
                    "{} ({})",
                    key_match.key, snapshot.language_code
                ))),
                padding_left: Some(true),
                padding_right: None,
                data: None,
            }
        })
        .collect()
}
