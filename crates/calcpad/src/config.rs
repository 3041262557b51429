//! Calculator configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::DEFAULT_PRECISION;
use crate::theme::THEME_PREFERENCE_KEY;

/// Largest precision accepted.
///
/// Past 15 fractional digits f64 rounding noise reaches the display
/// (`0.1 + 0.2` prints `0.30000000000000004` at 17).
pub const MAX_PRECISION: usize = 15;

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`CalculatorConfig`]
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid-value error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Fractional digits kept in results
    pub precision: usize,
    /// Key the theme choice is stored under
    pub preference_key: String,
    /// JSON file for persisted preferences (in-memory when unset)
    pub preferences_path: Option<PathBuf>,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Render the keypad grid in the terminal front end
    pub show_keypad: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            preference_key: THEME_PREFERENCE_KEY.to_string(),
            preferences_path: None,
            log_filter: "warn".to_string(),
            show_keypad: true,
        }
    }
}

impl CalculatorConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse from a JSON string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::invalid(format!(
                "precision {} exceeds maximum of {MAX_PRECISION}",
                self.precision
            )));
        }
        if self.preference_key.trim().is_empty() {
            return Err(ConfigError::invalid("preference_key must not be empty"));
        }
        Ok(())
    }

    /// Set precision
    #[must_use]
    pub const fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set preference key
    #[must_use]
    pub fn with_preference_key(mut self, key: impl Into<String>) -> Self {
        self.preference_key = key.into();
        self
    }

    /// Set preferences file
    #[must_use]
    pub fn with_preferences_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_path = Some(path.into());
        self
    }

    /// Set log filter
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Set keypad visibility
    #[must_use]
    pub const fn with_show_keypad(mut self, show: bool) -> Self {
        self.show_keypad = show;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::Accumulator;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.precision, 5);
        assert_eq!(config.preference_key, "theme");
        assert_eq!(config.preferences_path, None);
        assert_eq!(config.log_filter, "warn");
        assert!(config.show_keypad);
        assert_eq!(CalculatorConfig::new(), config);
    }

    #[test]
    fn test_builders() {
        let config = CalculatorConfig::new()
            .with_precision(3)
            .with_preference_key("calc-theme")
            .with_preferences_path("/tmp/prefs.json")
            .with_log_filter("debug")
            .with_show_keypad(false);
        assert_eq!(config.precision, 3);
        assert_eq!(config.preference_key, "calc-theme");
        assert_eq!(
            config.preferences_path,
            Some(PathBuf::from("/tmp/prefs.json"))
        );
        assert_eq!(config.log_filter, "debug");
        assert!(!config.show_keypad);
    }

    #[test]
    fn test_from_json_partial() {
        let config = CalculatorConfig::from_json(r#"{"precision": 2}"#).unwrap();
        assert_eq!(config.precision, 2);
        assert_eq!(config.preference_key, "theme");
    }

    #[test]
    fn test_from_json_rejects_large_precision() {
        let err = CalculatorConfig::from_json(r#"{"precision": 40}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("precision 40"));
    }

    #[test]
    fn test_validate_precision_bound() {
        assert!(CalculatorConfig::new().with_precision(MAX_PRECISION).validate().is_ok());
        let err = CalculatorConfig::new()
            .with_precision(MAX_PRECISION + 1)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("exceeds maximum of 15"));
    }

    #[test]
    fn test_max_precision_keeps_float_noise_off_display() {
        let config = CalculatorConfig::new().with_precision(MAX_PRECISION);
        for (tokens, expected) in [("0 . 1 + 0 . 2 =", "0.3"), ("1 . 1 * 3 =", "3.3")] {
            let mut acc = Accumulator::from_config(&config);
            for token in tokens.split_whitespace() {
                assert!(acc.press_token(token));
            }
            assert_eq!(acc.display(), expected, "{tokens}");
        }
    }

    #[test]
    fn test_from_json_rejects_empty_key() {
        let err = CalculatorConfig::from_json(r#"{"preference_key": " "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = CalculatorConfig::from_json("{precision").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("calcpad.json");
        fs::write(&path, r#"{"show_keypad": false, "log_filter": "info"}"#).unwrap();

        let config = CalculatorConfig::from_file(&path).unwrap();
        assert!(!config.show_keypad);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_from_file_missing() {
        let dir = TempDir::new().unwrap();
        let err = CalculatorConfig::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = CalculatorConfig::new().with_precision(4);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(CalculatorConfig::from_json(&json).unwrap(), config);
    }
}
