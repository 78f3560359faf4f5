//! Workspace configuration file (`.i18n-inspect.json`).

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    I18nSettings,
};

/// Workspace configuration file name.
pub const CONFIG_FILE_NAME: &str = ".i18n-inspect.json";

/// Location of the config file for a workspace root.
pub(super) fn config_file_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(CONFIG_FILE_NAME)
}

/// Reads the workspace config file.
///
/// A missing file is not an error and yields `Ok(None)`. Fields absent from
/// the file take their defaults; the result is not validated here.
///
/// # Errors
/// - the file exists but cannot be read
/// - the content is not a JSON settings object
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<I18nSettings>, ConfigError> {
    let config_path = config_file_path(workspace_root);

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %config_path.display(), "No workspace config file");
            return Ok(None);
        }
        Err(error) => return Err(error.into()),
    };

    tracing::debug!(path = %config_path.display(), "Read workspace config file");

    serde_json::from_str(&content).map(Some).map_err(ConfigError::from)
}
