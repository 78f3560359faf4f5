//! Shared setup for the language server integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use i18n_inspect_language_server::Backend;
use tempfile::TempDir;
use tower_lsp::lsp_types::*;
use tower_lsp::{
    LanguageServer,
    LspService,
};

pub const APP_SOURCE: &str = r#"const a = t("common.hello");
<Trans i18nKey="common.name" />
t("invalid")
"#;

pub fn create_test_backend() -> Backend {
    let (service, _socket) = LspService::new(Backend::new);
    service.inner().clone()
}

/// A workspace with a config file, English and Japanese dictionaries and one source file.
pub fn create_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    fs::write(
        root.join(".i18n-inspect.json"),
        r#"{
            "translationResource": "locales/{languageCode}.json",
            "languageCode": "en",
            "diagnostics": { "missingKeys": true }
        }"#,
    )
    .unwrap();

    fs::create_dir_all(root.join("locales")).unwrap();
    fs::write(
        root.join("locales/en.json"),
        r#"{ "common": { "hello": "Hello $t(common.name)", "name": "World" } }"#,
    )
    .unwrap();
    fs::write(
        root.join("locales/ja.json"),
        r#"{ "common": { "hello": "こんにちは", "name": "世界" } }"#,
    )
    .unwrap();

    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/App.tsx"), APP_SOURCE).unwrap();

    dir
}

pub fn initialize_params(root: &Path) -> InitializeParams {
    InitializeParams {
        workspace_folders: Some(vec![WorkspaceFolder {
            uri: Url::from_directory_path(root).unwrap(),
            name: "test".to_string(),
        }]),
        ..InitializeParams::default()
    }
}

pub fn app_uri(root: &Path) -> Url {
    Url::from_file_path(root.join("src/App.tsx")).unwrap()
}

/// Runs `initialize`, `initialized` and opens `src/App.tsx`.
pub async fn start_server(root: &Path) -> Backend {
    let backend = create_test_backend();

    backend.initialize(initialize_params(root)).await.unwrap();
    backend.initialized(InitializedParams {}).await;
    open_document(&backend, app_uri(root), APP_SOURCE).await;

    backend
}

pub async fn open_document(backend: &Backend, uri: Url, text: &str) {
    backend
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri,
                language_id: "typescriptreact".to_string(),
                version: 1,
                text: text.to_string(),
            },
        })
        .await;
}

pub fn hover_params(uri: Url, line: u32, character: u32) -> HoverParams {
    HoverParams {
        text_document_position_params: TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri },
            position: Position { line, character },
        },
        work_done_progress_params: WorkDoneProgressParams::default(),
    }
}

pub fn hover_markdown(hover: Hover) -> String {
    match hover.contents {
        HoverContents::Markup(markup) => markup.value,
        other => panic!("Expected Markup content, got {other:?}"),
    }
}
