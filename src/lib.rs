//! i18n-inspect-language-server
//!
//! JavaScript/TypeScript ソース中の i18n キー（`t("a.b")` や `i18nKey="a.b"`）を
//! 翻訳辞書で解決し、ホバー・補完・インレイヒント・診断として表示する
//! Language Server Protocol (LSP) 実装

pub mod config;
pub mod dictionary;
pub mod ide;
pub mod loader;
pub mod resolver;
pub mod store;
pub mod syntax;
pub mod types;
pub mod validation;

// Backend を再エクスポート
pub use ide::backend::Backend;
