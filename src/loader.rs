//! 翻訳リソースの読み込み
//!
//! Only local JSON files are supported. The locator passed in has already
//! had its `{languageCode}` placeholder filled (see
//! [`crate::config::I18nSettings::resolved_translation_resource`]).

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::dictionary::{
    DictionaryError,
    TranslationTree,
};
use crate::validation::is_url;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Remote translation resources are not supported: {locator}")]
    UnsupportedLocator { locator: String },

    #[error("Translation file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read translation file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translation file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid translation file {}: {source}", .path.display())]
    Shape {
        path: PathBuf,
        #[source]
        source: DictionaryError,
    },
}

/// Turns a locator into a filesystem path.
///
/// Relative locators resolve against `workspace_root` when one is known.
///
/// # Errors
/// [`LoadError::UnsupportedLocator`] for `http(s)://` locators.
pub fn resolve_locator(locator: &str, workspace_root: Option<&Path>) -> Result<PathBuf, LoadError> {
    if is_url(locator) {
        return Err(LoadError::UnsupportedLocator { locator: locator.to_string() });
    }

    let path = Path::new(locator);
    Ok(match workspace_root {
        Some(root) if path.is_relative() => root.join(path),
        _ => path.to_path_buf(),
    })
}

/// Reads and converts a translation file.
///
/// # Errors
/// - 対応していないロケーター (URL)
/// - ファイルが存在しない / 読み込みエラー
/// - JSON パースエラー
/// - ルートがオブジェクトではない
pub async fn load_translation_tree(
    locator: &str,
    workspace_root: Option<&Path>,
) -> Result<TranslationTree, LoadError> {
    let path = resolve_locator(locator, workspace_root)?;
    tracing::debug!(path = %path.display(), "Loading translation file");

    let content = tokio::fs::read_to_string(&path).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound { path: path.clone() }
        } else {
            LoadError::Io { path: path.clone(), source }
        }
    })?;

    let json: serde_json::Value = serde_json::from_str(&content)
        .map_err(|source| LoadError::Parse { path: path.clone(), source })?;

    let tree =
        TranslationTree::from_json(&json).map_err(|source| LoadError::Shape { path, source })?;
    tracing::debug!(entries = tree.len(), "Translation file loaded");

    Ok(tree)
}
