//! Source text analysis.

pub mod matcher;

pub use matcher::{
    KeyMatch,
    MatchKind,
    NestedReference,
    is_dynamic_key,
    scan_line,
    scan_nested_references,
};

/// Scans every line of a document for key usages.
///
/// Lines are numbered from 0; `\r\n` endings are handled by [`str::lines`].
#[must_use]
pub fn scan_document(text: &str) -> Vec<KeyMatch> {
    text.lines()
        .zip(0_u32..)
        .flat_map(|(line_text, line_number)| scan_line(line_text, line_number))
        .collect()
}
