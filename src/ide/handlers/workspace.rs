//! Workspace-related handlers.

use tower_lsp::lsp_types::{
    DidChangeConfigurationParams,
    DidChangeWatchedFilesParams,
    FileChangeType,
    MessageType,
};

use super::super::backend::Backend;
use crate::config::{
    I18nSettings,
    ServerSettings,
};

pub async fn handle_did_change_configuration(
    backend: &Backend,
    params: DidChangeConfigurationParams,
) {
    tracing::info!(settings = %params.settings, "didChangeConfiguration received");

    // 全フィールドに既定値があるため、セクション名で包まれた形を先に試す
    let new_settings = serde_json::from_value::<ServerSettings>(params.settings.clone())
        .map(|wrapped| wrapped.i18n_inspect)
        .or_else(|_| serde_json::from_value::<I18nSettings>(params.settings));

    let new_settings = match new_settings {
        Ok(settings) => settings,
        Err(error) => {
            tracing::warn!(%error, "Ignoring unrecognized settings payload");
            return;
        }
    };

    let mut config_manager = backend.config_manager.lock().await;
    match config_manager.update_settings(new_settings) {
        Ok(()) => {
            drop(config_manager);
            tracing::info!("configuration updated successfully");

            if backend.reload_translations().await {
                backend.refresh_views().await;
            }
        }
        Err(error) => {
            drop(config_manager);
            tracing::error!(%error, "configuration validation error");
            backend
                .client
                .show_message(MessageType::ERROR, format!("Configuration error: {error}"))
                .await;
        }
    }
}

pub async fn handle_did_change_watched_files(
    backend: &Backend,
    params: DidChangeWatchedFilesParams,
) {
    let mut needs_reload = false;

    for change in params.changes {
        let Some(file_path) = Backend::uri_to_path(&change.uri) else {
            continue;
        };

        if Backend::is_config_file(&file_path) {
            tracing::info!("Config file changed: {:?}, type: {:?}", file_path, change.typ);

            let reloaded = backend.config_manager.lock().await.reload();
            if let Err(error) = reloaded {
                tracing::error!(%error, "Failed to reload configuration");
                backend
                    .client
                    .show_message(MessageType::ERROR, format!("Configuration error: {error}"))
                    .await;
                continue;
            }
            needs_reload = true;
            continue;
        }

        if backend.translation_resource_path().await.is_some_and(|path| path == file_path) {
            tracing::debug!("Translation file changed: {:?}, type: {:?}", file_path, change.typ);

            if change.typ == FileChangeType::DELETED {
                tracing::warn!("Translation resource was deleted: {:?}", file_path);
            }
            needs_reload = true;
        }
    }

    if needs_reload && backend.reload_translations().await {
        backend.refresh_views().await;
    }
}
