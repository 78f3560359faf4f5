//! Server configuration: settings types, the workspace config file and
//! document path matching.

/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Document path matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    DiagnosticsConfig,
    I18nSettings,
    LANGUAGE_CODE_PLACEHOLDER,
    ServerSettings,
    ValidationError,
};
