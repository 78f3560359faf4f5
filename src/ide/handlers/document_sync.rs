//! Document synchronization handlers.

use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
    DidSaveTextDocumentParams,
};

use super::super::backend::Backend;

pub async fn handle_did_open(backend: &Backend, params: DidOpenTextDocumentParams) {
    let uri = params.text_document.uri;

    if !backend.is_inspected(&uri).await {
        tracing::debug!(uri = %uri, "Document is not inspected");
        return;
    }

    let text = params.text_document.text;
    backend.state.documents.lock().await.insert(uri.clone(), text.clone());

    backend.publish_document_diagnostics(uri, &text).await;
}

pub async fn handle_did_change(backend: &Backend, params: DidChangeTextDocumentParams) {
    let uri = params.text_document.uri;

    // FULL sync なので最後の変更が全文
    let Some(change) = params.content_changes.into_iter().next_back() else {
        return;
    };
    let new_content = change.text;

    {
        let mut documents = backend.state.documents.lock().await;
        let Some(text) = documents.get_mut(&uri) else {
            // did_open で対象外と判定されたドキュメント
            return;
        };
        text.clone_from(&new_content);
    }

    backend.publish_document_diagnostics(uri, &new_content).await;
}

pub async fn handle_did_save(backend: &Backend, params: DidSaveTextDocumentParams) {
    tracing::debug!(uri = %params.text_document.uri, "file saved");

    if let Some(path) = Backend::uri_to_path(&params.text_document.uri)
        && backend.translation_resource_path().await.is_some_and(|resource| resource == path)
    {
        tracing::info!("Translation resource saved, reloading");
        if backend.reload_translations().await {
            backend.refresh_views().await;
        }
    }
}

pub async fn handle_did_close(backend: &Backend, params: DidCloseTextDocumentParams) {
    let uri = params.text_document.uri;

    let removed = backend.state.documents.lock().await.remove(&uri).is_some();

    if removed {
        backend.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}
