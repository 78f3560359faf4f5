//! 設定管理を行うモジュール

use std::path::PathBuf;

use super::{
    ConfigError,
    I18nSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: I18nSettings,

    /// ワークスペースのルートパス
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ワークスペースの設定ファイルから設定を読み込む
    ///
    /// ワークスペースルートは設定ファイルの有無やエラーに関わらず記録される。
    /// エラーの場合、現在の設定は変更されない。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!(?workspace_root, "Loading settings");
        self.workspace_root = workspace_root;
        self.reload()
    }

    /// 記録済みのワークスペースルートから設定ファイルを読み直す
    ///
    /// # Errors
    /// [`Self::load_settings`] と同じ
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let from_file = match &self.workspace_root {
            Some(root) => loader::load_from_workspace(root)?,
            None => None,
        };

        self.update_settings(from_file.unwrap_or_default())
    }

    /// 設定を置き換える（`did_change_configuration` 用）
    ///
    /// # Errors
    /// バリデーションエラー。この場合現在の設定は変更されない。
    pub fn update_settings(&mut self, new_settings: I18nSettings) -> Result<(), ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(settings = ?new_settings, "Settings applied");
        self.current_settings = new_settings;

        Ok(())
    }

    /// 表示言語だけを切り替える
    pub fn set_language_code(&mut self, language_code: String) {
        self.current_settings.language_code = language_code;
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &I18nSettings {
        &self.current_settings
    }

    /// ワークスペースルートを取得
    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::loader::CONFIG_FILE_NAME;

    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_that!(manager.get_settings().language_code, eq("zh-TW"));
        assert_that!(manager.workspace_root(), none());
    }

    #[rstest]
    fn test_load_settings_without_workspace() {
        let mut manager = ConfigManager::new();

        let result = manager.load_settings(None);

        assert_that!(result, ok(anything()));
        assert_that!(manager.get_settings(), eq(&I18nSettings::default()));
    }

    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{"translationResource": "locales/{languageCode}.json", "languageCode": "en"}"#,
        )
        .unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert_that!(result, ok(anything()));
        assert_that!(manager.get_settings().language_code, eq("en"));
        assert_that!(
            manager.get_settings().resolved_translation_resource(),
            some(eq("locales/en.json"))
        );
        assert_that!(manager.workspace_root(), some(anything()));
    }

    #[rstest]
    fn test_load_settings_invalid_file_keeps_defaults_but_records_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"includePatterns": []}"#).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert_that!(result, err(displays_as(contains_substring("includePatterns"))));
        assert_that!(manager.get_settings(), eq(&I18nSettings::default()));
        assert_that!(manager.workspace_root(), some(anything()));
    }

    #[rstest]
    fn test_update_settings_valid() {
        let mut manager = ConfigManager::new();
        let new_settings =
            I18nSettings { nested_resolution_depth: 3, ..I18nSettings::default() };

        let result = manager.update_settings(new_settings);

        assert_that!(result, ok(anything()));
        assert_that!(manager.get_settings().nested_resolution_depth, eq(3));
    }

    #[rstest]
    fn test_update_settings_invalid() {
        let mut manager = ConfigManager::new();
        let new_settings = I18nSettings { language_code: String::new(), ..I18nSettings::default() };

        let result = manager.update_settings(new_settings);

        assert_that!(result, err(anything()));
        assert_that!(manager.get_settings().language_code, eq("zh-TW"));
    }

    #[rstest]
    fn test_reload_picks_up_edited_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = ConfigManager::new();
        manager.load_settings(Some(temp_dir.path().to_path_buf())).unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"languageCode": "ko"}"#).unwrap();

        let result = manager.reload();

        assert_that!(result, ok(anything()));
        assert_that!(manager.get_settings().language_code, eq("ko"));
    }

    #[rstest]
    fn test_set_language_code() {
        let mut manager = ConfigManager::new();

        manager.set_language_code("ja".to_string());

        assert_that!(manager.get_settings().language_code, eq("ja"));
    }
}
