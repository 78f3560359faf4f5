//! LSP 機能ハンドラー
//!
//! `hover`, `completion`, `inlayHint` の処理を担当します。

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionParams,
    CompletionResponse,
    Hover,
    HoverParams,
    InlayHint,
    InlayHintParams,
};

use super::super::backend::Backend;
use crate::ide::completion::generate_completions;
use crate::ide::hover::generate_hover;
use crate::ide::inlay_hint::generate_inlay_hints;

/// `textDocument/hover` リクエストを処理
pub async fn handle_hover(backend: &Backend, params: HoverParams) -> Result<Option<Hover>> {
    let uri = params.text_document_position_params.text_document.uri;
    let position = params.text_document_position_params.position;

    tracing::debug!(uri = %uri, line = position.line, character = position.character, "Hover request");

    let Some(line) = backend.state.document_line(&uri, position.line).await else {
        tracing::debug!("Document not tracked: {}", uri);
        return Ok(None);
    };

    let depth = backend.resolution_depth().await;
    let snapshot = backend.state.store.snapshot();

    Ok(generate_hover(&line, position.into(), &snapshot, depth))
}

/// `textDocument/completion` リクエストを処理
pub async fn handle_completion(
    backend: &Backend,
    params: CompletionParams,
) -> Result<Option<CompletionResponse>> {
    let uri = params.text_document_position.text_document.uri;
    let position = params.text_document_position.position;

    tracing::debug!(uri = %uri, line = position.line, character = position.character, "Completion request");

    let Some(line) = backend.state.document_line(&uri, position.line).await else {
        tracing::debug!("Document not tracked: {}", uri);
        return Ok(None);
    };

    let depth = backend.resolution_depth().await;
    let snapshot = backend.state.store.snapshot();
    let items = generate_completions(&line, position.into(), &snapshot, depth);

    tracing::debug!(count = items.len(), "Generated completion items");

    if items.is_empty() {
        return Ok(None);
    }

    Ok(Some(CompletionResponse::Array(items)))
}

/// `textDocument/inlayHint` リクエストを処理
pub async fn handle_inlay_hint(
    backend: &Backend,
    params: InlayHintParams,
) -> Result<Option<Vec<InlayHint>>> {
    let uri = params.text_document.uri;

    tracing::debug!(uri = %uri, "Inlay hint request");

    let Some(text) = backend.state.document_text(&uri).await else {
        return Ok(None);
    };

    let depth = backend.resolution_depth().await;
    let snapshot = backend.state.store.snapshot();
    let hints = generate_inlay_hints(&text, Some(params.range), &snapshot, depth);

    tracing::debug!(count = hints.len(), "Generated inlay hints");

    Ok(Some(hints))
}
