//! Execute Command ハンドラー
//!
//! `workspace/executeCommand` リクエストを処理し、
//! エディタ拡張向けのカスタムコマンドを実行します。

use serde::Deserialize;
use serde_json::{
    Value,
    json,
};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    ExecuteCommandParams,
    MessageType,
    Url,
};

use super::super::backend::Backend;
use crate::ide::virtual_text::get_translation_decorations;

/// 翻訳データを読み込み直す
pub const REFRESH_COMMAND: &str = "i18nInspect.refresh";
/// ドキュメント内のキーと翻訳値の一覧を返す
pub const GET_DECORATIONS_COMMAND: &str = "i18nInspect.getDecorations";
/// 現在の表示言語を返す
pub const GET_CURRENT_LANGUAGE_COMMAND: &str = "i18nInspect.getCurrentLanguage";
/// 表示言語を切り替える
pub const SET_CURRENT_LANGUAGE_COMMAND: &str = "i18nInspect.setCurrentLanguage";

/// サーバーが提供するコマンド
pub const COMMANDS: &[&str] = &[
    REFRESH_COMMAND,
    GET_DECORATIONS_COMMAND,
    GET_CURRENT_LANGUAGE_COMMAND,
    SET_CURRENT_LANGUAGE_COMMAND,
];

/// `workspace/executeCommand` リクエストを処理
pub async fn handle_execute_command(
    backend: &Backend,
    params: ExecuteCommandParams,
) -> Result<Option<Value>> {
    tracing::debug!(command = %params.command, "Execute Command request");

    match params.command.as_str() {
        REFRESH_COMMAND => handle_refresh(backend).await,
        GET_DECORATIONS_COMMAND => handle_get_decorations(backend, params.arguments).await,
        GET_CURRENT_LANGUAGE_COMMAND => handle_get_current_language(backend).await,
        SET_CURRENT_LANGUAGE_COMMAND => {
            handle_set_current_language(backend, params.arguments).await
        }
        _ => {
            tracing::warn!("Unknown command: {}", params.command);
            Ok(None)
        }
    }
}

/// `i18nInspect.refresh` コマンドを実行
async fn handle_refresh(backend: &Backend) -> Result<Option<Value>> {
    let reloaded = backend.reload_translations().await;
    if reloaded {
        backend.refresh_views().await;
    }

    Ok(Some(Value::Bool(reloaded)))
}

/// `i18nInspect.getDecorations` コマンドの引数
#[derive(Debug, Deserialize)]
struct GetDecorationsArgs {
    /// ファイル URI
    uri: String,
}

/// `i18nInspect.getDecorations` コマンドを実行
///
/// # Arguments
/// * `arguments[0]` - `{ "uri": "file:///..." }`
///
/// # Returns
/// `TranslationDecoration` の配列（JSON）。引数が不正な場合や
/// ドキュメントが開かれていない場合は空配列。
async fn handle_get_decorations(backend: &Backend, arguments: Vec<Value>) -> Result<Option<Value>> {
    let Some(first_arg) = arguments.into_iter().next() else {
        tracing::warn!("Missing arguments for {}", GET_DECORATIONS_COMMAND);
        return Ok(Some(json!([])));
    };

    let parsed_args: GetDecorationsArgs = match serde_json::from_value(first_arg) {
        Ok(args) => args,
        Err(e) => {
            tracing::warn!("Invalid arguments for {}: {}", GET_DECORATIONS_COMMAND, e);
            return Ok(Some(json!([])));
        }
    };

    let Ok(uri) = Url::parse(&parsed_args.uri) else {
        tracing::warn!("Invalid URI: {}", parsed_args.uri);
        return Ok(Some(json!([])));
    };

    let Some(text) = backend.state.document_text(&uri).await else {
        tracing::debug!(uri = %uri, "Document is not open");
        return Ok(Some(json!([])));
    };

    let depth = backend.resolution_depth().await;
    let snapshot = backend.state.store.snapshot();
    let decorations = get_translation_decorations(&text, &snapshot, depth);

    tracing::debug!(uri = %uri, count = decorations.len(), "Returning decorations");

    match serde_json::to_value(&decorations) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::error!("Failed to serialize decorations: {}", e);
            Ok(Some(json!([])))
        }
    }
}

/// `i18nInspect.getCurrentLanguage` コマンドを実行
///
/// 読み込み済みのスナップショットの言語を返します。まだ何も読み込んでいない
/// 場合は設定値を返します。
async fn handle_get_current_language(backend: &Backend) -> Result<Option<Value>> {
    let language = backend.state.store.language_code();
    if !language.is_empty() {
        return Ok(Some(Value::String(language)));
    }

    let configured = backend.config_manager.lock().await.get_settings().language_code.clone();
    Ok(Some(Value::String(configured)))
}

/// `i18nInspect.setCurrentLanguage` コマンドの引数
#[derive(Debug, Deserialize)]
struct SetCurrentLanguageArgs {
    /// 設定する言語コード
    language: String,
}

/// `i18nInspect.setCurrentLanguage` コマンドを実行
///
/// 言語を切り替えて翻訳データを読み込み直します。読み込みに失敗した場合は
/// 元の言語に戻します。
///
/// # Returns
/// 読み込みに成功した場合 `true`
async fn handle_set_current_language(
    backend: &Backend,
    arguments: Vec<Value>,
) -> Result<Option<Value>> {
    let Some(first_arg) = arguments.into_iter().next() else {
        tracing::warn!("Missing arguments for {}", SET_CURRENT_LANGUAGE_COMMAND);
        return Ok(None);
    };

    let parsed_args: SetCurrentLanguageArgs = match serde_json::from_value(first_arg) {
        Ok(args) => args,
        Err(e) => {
            tracing::warn!("Invalid arguments for {}: {}", SET_CURRENT_LANGUAGE_COMMAND, e);
            return Ok(None);
        }
    };

    let language = parsed_args.language.trim().to_string();
    if language.is_empty() {
        tracing::warn!("Ignoring empty language code");
        return Ok(None);
    }

    tracing::debug!(language = %language, "Executing {}", SET_CURRENT_LANGUAGE_COMMAND);

    let previous = {
        let mut config_manager = backend.config_manager.lock().await;
        let previous = config_manager.get_settings().language_code.clone();
        config_manager.set_language_code(language.clone());
        previous
    };

    let reloaded = backend.reload_translations().await;
    if reloaded {
        backend.refresh_views().await;
        backend
            .client
            .log_message(MessageType::INFO, format!("Current language set to: {language}"))
            .await;
    } else {
        // 読み込めなかった言語は設定に残さない
        backend.config_manager.lock().await.set_language_code(previous);
    }

    Ok(Some(Value::Bool(reloaded)))
}
