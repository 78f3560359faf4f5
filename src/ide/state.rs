//! LSP サーバーの共有状態

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::Url;

use crate::store::TranslationStore;

/// LSP サーバーの共有状態
///
/// `Backend` から状態管理の責務を分離し、ハンドラー間で共有可能にします。
/// 翻訳データはロックを取らずに読めるため、ロックは `documents` のみです。
#[derive(Clone, Default)]
pub struct ServerState {
    /// 翻訳データのスナップショット
    pub store: Arc<TranslationStore>,
    /// 開いているドキュメントの全文（URI → テキスト）
    pub documents: Arc<Mutex<HashMap<Url, String>>>,
    /// 翻訳データの再読み込みを直列化する
    pub reload_lock: Arc<Mutex<()>>,
}

impl ServerState {
    /// 新しい `ServerState` を作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 開いているドキュメントのテキストを取得
    pub async fn document_text(&self, uri: &Url) -> Option<String> {
        self.documents.lock().await.get(uri).cloned()
    }

    /// 指定行のテキストを取得
    pub async fn document_line(&self, uri: &Url, line: u32) -> Option<String> {
        let documents = self.documents.lock().await;
        let text = documents.get(uri)?;
        text.lines().nth(usize::try_from(line).ok()?).map(str::to_string)
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("store", &self.store)
            .field("documents", &"<HashMap<Url, String>>")
            .finish_non_exhaustive()
    }
}
