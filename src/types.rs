//! Core types used throughout the project.
//!
//! All character offsets are UTF-16 code units, the position encoding the
//! LSP (and VS Code) uses by default.

use serde::{
    Deserialize,
    Serialize,
};
use tower_lsp::lsp_types;

/// A position in source code (0-indexed, UTF-16 character offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

impl From<lsp_types::Position> for SourcePosition {
    fn from(position: lsp_types::Position) -> Self {
        Self { line: position.line, character: position.character }
    }
}

impl From<SourcePosition> for lsp_types::Position {
    fn from(position: SourcePosition) -> Self {
        Self { line: position.line, character: position.character }
    }
}

/// A single-line span `[start, end)` covering a key's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyRange {
    pub line: u32,
    pub start: u32,
    pub end: u32,
}

impl KeyRange {
    #[must_use]
    pub const fn new(line: u32, start: u32, end: u32) -> Self {
        Self { line, start, end }
    }

    /// Checks if a cursor offset on the same line touches this range.
    ///
    /// The end offset is inclusive: a cursor placed right after the last key
    /// character is still editing that key.
    #[must_use]
    pub const fn contains_offset(&self, character: u32) -> bool {
        self.start <= character && character <= self.end
    }

    /// Checks if a position is within this range.
    #[must_use]
    pub const fn contains(&self, position: SourcePosition) -> bool {
        position.line == self.line && self.contains_offset(position.character)
    }

    #[must_use]
    pub const fn start_position(&self) -> SourcePosition {
        SourcePosition { line: self.line, character: self.start }
    }

    #[must_use]
    pub const fn end_position(&self) -> SourcePosition {
        SourcePosition { line: self.line, character: self.end }
    }
}

impl From<KeyRange> for lsp_types::Range {
    fn from(range: KeyRange) -> Self {
        Self { start: range.start_position().into(), end: range.end_position().into() }
    }
}

/// Converts a byte index into `text` to a UTF-16 offset.
///
/// `byte_index` must lie on a char boundary; regex match offsets always do.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // 1 行が 42 億 UTF-16 単位を超えることはない
pub fn utf16_offset(text: &str, byte_index: usize) -> u32 {
    text.get(..byte_index).map_or(0, |prefix| prefix.encode_utf16().count() as u32)
}
