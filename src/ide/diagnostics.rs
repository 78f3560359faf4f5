//! 診断メッセージ生成モジュール

use tower_lsp::lsp_types::{
    Diagnostic,
    DiagnosticSeverity,
    NumberOrString,
};

use crate::config::DiagnosticsConfig;
use crate::dictionary::KEY_SEPARATOR;
use crate::ide::lookup::invalid_ranges_in_document;
use crate::store::TranslationSnapshot;
use crate::syntax::scan_document;
use crate::validation::is_valid_key;

/// `source` field of every diagnostic published by this server.
pub const DIAGNOSTIC_SOURCE: &str = "i18n-inspect";

/// ドキュメントの診断メッセージを生成
///
/// - `invalidKeys`: `.` を含まないキーに警告（範囲は [`invalid_ranges_in_document`]）
/// - `missingKeys`: 辞書に存在しないキーに警告。辞書が空の場合（未読み込み）は
///   全キーが対象になってしまうため出さない。動的キーと不正なキーも対象外。
///
/// 結果はドキュメント内の位置順。
#[must_use]
pub fn generate_diagnostics(
    text: &str,
    snapshot: &TranslationSnapshot,
    config: DiagnosticsConfig,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if config.invalid_keys {
        diagnostics.extend(invalid_ranges_in_document(text).into_iter().map(|range| {
            Diagnostic {
                range: range.into(),
                severity: Some(DiagnosticSeverity::WARNING),
                code: Some(NumberOrString::String("invalid-key".to_string())),
                source: Some(DIAGNOSTIC_SOURCE.to_string()),
                message: format!(
                    "Invalid i18n key: expected at least two segments separated by '{KEY_SEPARATOR}'"
                ),
                ..Diagnostic::default()
            }
        }));
    }

    if config.missing_keys && !snapshot.tree.is_empty() {
        diagnostics.extend(
            scan_document(text)
                .into_iter()
                .filter(|key_match| {
                    is_valid_key(&key_match.key)
                        && !key_match.is_dynamic()
                        && snapshot.tree.lookup(&key_match.key).is_none()
                })
                .map(|key_match| Diagnostic {
                    range: key_match.range.into(),
                    severity: Some(DiagnosticSeverity::WARNING),
                    code: Some(NumberOrString::String("missing-key".to_string())),
                    source: Some(DIAGNOSTIC_SOURCE.to_string()),
                    message: format!(
                        "Translation key '{}' not found in {}",
                        key_match.key, snapshot.language_code
                    ),
                    ..Diagnostic::default()
                }),
        );
    }

    diagnostics.sort_by_key(|d| (d.range.start.line, d.range.start.character));

    tracing::debug!(count = diagnostics.len(), "Generated diagnostics");
    diagnostics
}
