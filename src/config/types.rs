use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::resolver::MAX_RESOLVE_DEPTH;

/// Placeholder in `translationResource` replaced by the active language code.
pub const LANGUAGE_CODE_PLACEHOLDER: &str = "{languageCode}";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `didChangeConfiguration` payload wrapped in the section name.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSettings {
    pub i18n_inspect: I18nSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Local path of the translation JSON file.
    ///
    /// Relative paths resolve against the workspace root. `{languageCode}`
    /// is replaced by [`Self::language_code`]. `None` leaves the dictionary
    /// empty.
    pub translation_resource: Option<String>,

    /// Language whose translations are displayed.
    pub language_code: String,

    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,

    /// Passes of `$t(...)` substitution applied to displayed values.
    ///
    /// `0` shows raw values. Capped at [`MAX_RESOLVE_DEPTH`].
    pub nested_resolution_depth: usize,

    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosticsConfig {
    /// Warn on keys without a `.` separator.
    pub invalid_keys: bool,
    /// Report keys absent from the dictionary.
    pub missing_keys: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { invalid_keys: true, missing_keys: false }
    }
}

impl I18nSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Resolution depth out of range
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.language_code.trim().is_empty() {
            errors.push(ValidationError::new(
                "languageCode",
                "The language code cannot be empty. Example: \"zh-TW\"",
            ));
        }

        if let Some(resource) = &self.translation_resource
            && resource.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "translationResource",
                "The path cannot be empty. Specify a JSON file (e.g., \"locales/{languageCode}.json\"), or remove this field",
            ));
        }

        if self.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "includePatterns",
                "At least one pattern is required. Example: [\"**/*.{js,ts,tsx}\"]",
            ));
        }

        for (index, pattern) in self.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.nested_resolution_depth > MAX_RESOLVE_DEPTH {
            errors.push(ValidationError::new(
                "nestedResolutionDepth",
                format!("Must be between 0 and {MAX_RESOLVE_DEPTH}"),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Translation resource path with the language placeholder filled in.
    #[must_use]
    pub fn resolved_translation_resource(&self) -> Option<String> {
        self.translation_resource
            .as_deref()
            .map(|resource| resource.replace(LANGUAGE_CODE_PLACEHOLDER, &self.language_code))
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            translation_resource: None,
            language_code: "zh-TW".to_string(),
            include_patterns: vec!["**/*.{js,jsx,ts,tsx}".to_string()],
            exclude_patterns: vec!["node_modules/**".to_string()],
            nested_resolution_depth: 1,
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = I18nSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: I18nSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings.language_code, eq("zh-TW"));
        assert_that!(settings.translation_resource, none());
        assert_that!(settings.include_patterns, elements_are![eq("**/*.{js,jsx,ts,tsx}")]);
        assert_that!(settings.exclude_patterns, elements_are![eq("node_modules/**")]);
        assert_that!(settings.nested_resolution_depth, eq(1));
        assert_that!(settings.diagnostics.invalid_keys, eq(true));
        assert_that!(settings.diagnostics.missing_keys, eq(false));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{
            "translationResource": "locales/{languageCode}.json",
            "languageCode": "en",
            "diagnostics": { "missingKeys": true }
        }"#;

        let settings: I18nSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.translation_resource, some(eq("locales/{languageCode}.json")));
        assert_that!(settings.language_code, eq("en"));
        assert_that!(settings.diagnostics.missing_keys, eq(true));
        assert_that!(settings.diagnostics.invalid_keys, eq(true));
        assert_that!(settings.include_patterns, len(eq(1)));
    }

    #[rstest]
    fn deserialize_wrapped_settings() {
        let json = r#"{ "i18nInspect": { "languageCode": "ja" } }"#;

        let wrapped: ServerSettings = serde_json::from_str(json).unwrap();

        assert_that!(wrapped.i18n_inspect.language_code, eq("ja"));
    }

    #[rstest]
    #[case(Some("locales/{languageCode}.json"), "en", Some("locales/en.json"))]
    #[case(Some("/abs/zh-TW.json"), "en", Some("/abs/zh-TW.json"))]
    #[case(None, "en", None)]
    fn test_resolved_translation_resource(
        #[case] resource: Option<&str>,
        #[case] language: &str,
        #[case] expected: Option<&str>,
    ) {
        let settings = I18nSettings {
            translation_resource: resource.map(String::from),
            language_code: language.to_string(),
            ..I18nSettings::default()
        };

        assert_that!(settings.resolved_translation_resource().as_deref(), eq(expected));
    }

    #[rstest]
    fn validate_invalid_language_code_empty() {
        let settings = I18nSettings { language_code: "  ".to_string(), ..I18nSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("languageCode")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_translation_resource_empty() {
        let settings =
            I18nSettings { translation_resource: Some(String::new()), ..I18nSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("translationResource"))])
        );
    }

    #[rstest]
    fn validate_invalid_include_patterns_empty() {
        let settings = I18nSettings { include_patterns: vec![], ..I18nSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("includePatterns")),
                field!(ValidationError.message, contains_substring("At least one pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_include_pattern_invalid_glob() {
        let settings = I18nSettings {
            include_patterns: vec!["**/*.{js,ts".to_string()],
            ..I18nSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("includePatterns[0]")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern")),
                field!(ValidationError.message, contains_substring("**/*.{js,ts"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_exclude_pattern_invalid_glob() {
        let settings = I18nSettings {
            exclude_patterns: vec![
                "node_modules/**".to_string(),
                "dist/**".to_string(),
                "invalid[pattern".to_string(),
            ],
            ..I18nSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("excludePatterns[2]"))])
        );
    }

    #[rstest]
    #[case(0, true)]
    #[case(MAX_RESOLVE_DEPTH, true)]
    #[case(MAX_RESOLVE_DEPTH + 1, false)]
    fn validate_nested_resolution_depth(#[case] depth: usize, #[case] valid: bool) {
        let settings = I18nSettings { nested_resolution_depth: depth, ..I18nSettings::default() };

        assert_that!(settings.validate().is_ok(), eq(valid));
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = I18nSettings {
            language_code: String::new(),
            include_patterns: vec![],
            ..I18nSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let error_message = format!("{}", ConfigError::ValidationErrors(errors));

        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. languageCode"));
        assert_that!(error_message, contains_substring("2. includePatterns"));
    }
}
