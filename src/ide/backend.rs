//! LSP Backend 実装

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionParams,
    CompletionResponse,
    DidChangeConfigurationParams,
    DidChangeTextDocumentParams,
    DidChangeWatchedFilesParams,
    DidChangeWatchedFilesRegistrationOptions,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
    DidSaveTextDocumentParams,
    ExecuteCommandParams,
    FileSystemWatcher,
    GlobPattern,
    Hover,
    HoverParams,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    InlayHint,
    InlayHintParams,
    MessageType,
    Registration,
    Url,
};
use tower_lsp::{
    Client,
    LanguageServer,
};

use super::handlers;
use super::state::ServerState;
use crate::config::{
    CONFIG_FILE_NAME,
    ConfigManager,
    FileMatcher,
    I18nSettings,
};
use crate::dictionary::TranslationTree;
use crate::ide::diagnostics::generate_diagnostics;
use crate::loader::{
    load_translation_tree,
    resolve_locator,
};
use crate::store::TranslationSnapshot;

/// LSP Backend
#[derive(Clone)]
pub struct Backend {
    /// LSP クライアント
    pub client: Client,
    /// 設定管理
    pub config_manager: Arc<Mutex<ConfigManager>>,
    /// 共有状態
    pub state: ServerState,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("config_manager", &"<ConfigManager>")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Backend {
    /// 新しい `Backend` を作成
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            config_manager: Arc::new(Mutex::new(ConfigManager::new())),
            state: ServerState::new(),
        }
    }

    /// URI をファイルパスに変換
    pub(crate) fn uri_to_path(uri: &Url) -> Option<PathBuf> {
        uri.to_file_path().map_or_else(
            |()| {
                tracing::debug!("URI is not a file path: {}", uri);
                None
            },
            Some,
        )
    }

    /// 設定ファイルかどうか
    pub(crate) fn is_config_file(path: &Path) -> bool {
        path.file_name().is_some_and(|name| name == CONFIG_FILE_NAME)
    }

    /// 現在の設定のコピーとワークスペースルートを取得
    pub(crate) async fn settings(&self) -> (I18nSettings, Option<PathBuf>) {
        let config_manager = self.config_manager.lock().await;
        (config_manager.get_settings().clone(), config_manager.workspace_root().cloned())
    }

    /// 入れ子参照の展開深さ
    pub(crate) async fn resolution_depth(&self) -> usize {
        self.config_manager.lock().await.get_settings().nested_resolution_depth
    }

    /// ドキュメントが検査対象かどうか
    ///
    /// ファイルパスに変換できない URI（`untitled:` など）はパス部分のファイル名で判定します。
    pub(crate) async fn is_inspected(&self, uri: &Url) -> bool {
        let (settings, workspace_root) = self.settings().await;
        let matcher = match FileMatcher::new(workspace_root, &settings) {
            Ok(matcher) => matcher,
            Err(error) => {
                tracing::warn!(%error, "Invalid document patterns");
                return false;
            }
        };

        Self::uri_to_path(uri).map_or_else(
            || matcher.is_source_file(Path::new(uri.path())),
            |path| matcher.is_source_file(&path),
        )
    }

    /// 翻訳リソースのファイルパス（設定されていない場合や URL の場合は `None`）
    pub(crate) async fn translation_resource_path(&self) -> Option<PathBuf> {
        let (settings, workspace_root) = self.settings().await;
        let locator = settings.resolved_translation_resource()?;
        resolve_locator(&locator, workspace_root.as_deref()).ok()
    }

    /// 翻訳データを読み込み直す
    ///
    /// 成功した場合のみスナップショットを置き換えます。失敗した場合は
    /// 以前のスナップショットを保持し、エラーをクライアントに通知します。
    ///
    /// # Returns
    /// スナップショットを置き換えた場合 `true`
    ///
    /// 再読み込みは直列に実行されるため、後から始まった読み込みが常に
    /// 最後に反映されます。設定はロック取得後に読むので最新の値が使われます。
    pub(crate) async fn reload_translations(&self) -> bool {
        let _reload_guard = self.state.reload_lock.lock().await;
        let (settings, workspace_root) = self.settings().await;

        let Some(locator) = settings.resolved_translation_resource() else {
            tracing::info!("No translation resource configured");
            self.state
                .store
                .replace(TranslationSnapshot::new(TranslationTree::default(), &settings.language_code));
            return true;
        };

        match load_translation_tree(&locator, workspace_root.as_deref()).await {
            Ok(tree) => {
                let key_count = tree.flatten().len();
                self.state.store.replace(TranslationSnapshot::new(tree, &settings.language_code));
                self.client
                    .log_message(
                        MessageType::INFO,
                        format!(
                            "Loaded {key_count} translation keys ({}) from {locator}",
                            settings.language_code
                        ),
                    )
                    .await;
                true
            }
            Err(error) => {
                tracing::error!(%error, locator = %locator, "Failed to load translations");
                self.client
                    .show_message(
                        MessageType::WARNING,
                        format!("Failed to load translations: {error}"),
                    )
                    .await;
                false
            }
        }
    }

    /// ドキュメントの診断メッセージを送信
    pub(crate) async fn publish_document_diagnostics(&self, uri: Url, text: &str) {
        let config = self.config_manager.lock().await.get_settings().diagnostics;
        let snapshot = self.state.store.snapshot();
        let diagnostics = generate_diagnostics(text, &snapshot, config);

        tracing::debug!(uri = %uri, count = diagnostics.len(), "Publishing diagnostics");
        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }

    /// 開いている全ドキュメントに診断メッセージを送信
    pub(crate) async fn send_diagnostics_to_opened_files(&self) {
        let documents: Vec<(Url, String)> = self
            .state
            .documents
            .lock()
            .await
            .iter()
            .map(|(uri, text)| (uri.clone(), text.clone()))
            .collect();

        join_all(
            documents
                .into_iter()
                .map(|(uri, text)| async move { self.publish_document_diagnostics(uri, &text).await }),
        )
        .await;
    }

    /// 翻訳データや設定の変更を、表示中のビューに反映
    pub(crate) async fn refresh_views(&self) {
        self.send_diagnostics_to_opened_files().await;

        if let Err(error) = self.client.inlay_hint_refresh().await {
            tracing::debug!(%error, "Client did not accept inlay hint refresh");
        }
    }

    /// 設定ファイルと翻訳ファイルの変更監視を登録
    pub(crate) async fn register_file_watchers(&self) {
        let options = DidChangeWatchedFilesRegistrationOptions {
            watchers: vec![FileSystemWatcher {
                glob_pattern: GlobPattern::String("**/*.json".to_string()),
                kind: None,
            }],
        };

        let register_options = match serde_json::to_value(options) {
            Ok(value) => value,
            Err(error) => {
                tracing::error!(%error, "Failed to serialize watcher options");
                return;
            }
        };

        let registration = Registration {
            id: "i18n-inspect-file-watcher".to_string(),
            method: "workspace/didChangeWatchedFiles".to_string(),
            register_options: Some(register_options),
        };

        if let Err(error) = self.client.register_capability(vec![registration]).await {
            tracing::warn!(%error, "Failed to register file watchers");
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::lifecycle::handle_initialize(self, params).await
    }

    async fn initialized(&self, params: InitializedParams) {
        handlers::lifecycle::handle_initialized(self, params).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handlers::lifecycle::handle_shutdown().await
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handlers::workspace::handle_did_change_configuration(self, params).await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        handlers::workspace::handle_did_change_watched_files(self, params).await;
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::document_sync::handle_did_open(self, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::document_sync::handle_did_change(self, params).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        handlers::document_sync::handle_did_save(self, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::document_sync::handle_did_close(self, params).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        handlers::features::handle_hover(self, params).await
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        handlers::features::handle_completion(self, params).await
    }

    async fn inlay_hint(&self, params: InlayHintParams) -> Result<Option<Vec<InlayHint>>> {
        handlers::features::handle_inlay_hint(self, params).await
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        handlers::execute_command::handle_execute_command(self, params).await
    }
}
