//! Configuration management for Locale Manager
//!
//! Handles loading and validating the locale configuration supplied by the
//! host application: which locales ship, where their data lives and which
//! storage key holds the user's choice.

use crate::error::{ConfigError, ConfigResult};
use crate::locale::{self, LocaleTag};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier following reverse-DNS convention
pub const APP_ID: &str = "com.locale.Manager";

/// Storage key holding the persisted locale
pub const DEFAULT_STORAGE_KEY: &str = "language";

/// Locales shipped when no configuration is supplied
pub const DEFAULT_AVAILABLE_LOCALES: &[&str] = &["en-US", "zh-CN"];

/// Locale configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Supported locales in preference order
    pub available_locales: Vec<String>,

    /// Storage key for the persisted choice
    pub storage_key: String,

    /// Default locale when the environment reports no document language
    pub fallback_locale: Option<String>,

    /// Directory holding `<locale>.json` translation files
    pub data_dir: Option<PathBuf>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            available_locales: DEFAULT_AVAILABLE_LOCALES
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            fallback_locale: None,
            data_dir: None,
        }
    }
}

impl LocaleConfig {
    /// Configuration with the given locale list and defaults elsewhere
    pub fn with_locales<I, S>(locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available_locales: locales.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file, or return defaults if it is missing
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::debug!("No locale config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: LocaleConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the store cannot work with
    pub fn validate(&self) -> ConfigResult<()> {
        self.available_tags()?;

        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "storage_key".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if let Some(fallback) = &self.fallback_locale {
            let available = self.available_tags()?;
            if !locale::is_available(&available, fallback) {
                return Err(ConfigError::InvalidValue {
                    key: "fallback_locale".to_string(),
                    reason: format!("{fallback} is not an available locale"),
                });
            }
        }

        Ok(())
    }

    /// Parsed available locales
    pub fn available_tags(&self) -> ConfigResult<Vec<LocaleTag>> {
        if self.available_locales.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "available_locales".to_string(),
                reason: "at least one locale is required".to_string(),
            });
        }

        self.available_locales
            .iter()
            .map(|tag| {
                LocaleTag::parse(tag).map_err(|_| ConfigError::InvalidValue {
                    key: "available_locales".to_string(),
                    reason: format!("{tag:?} is not a locale tag"),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LocaleConfig::default();
        assert_eq!(config.available_locales, vec!["en-US", "zh-CN"]);
        assert_eq!(config.storage_key, "language");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = LocaleConfig::with_locales(["fr-FR", "de-DE"]);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: LocaleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.available_locales, deserialized.available_locales);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LocaleConfig =
            serde_json::from_str(r#"{"available_locales": ["ja-JP"]}"#).unwrap();
        assert_eq!(config.available_locales, vec!["ja-JP"]);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(LocaleConfig::with_locales(Vec::<String>::new())
            .validate()
            .is_err());
        assert!(LocaleConfig::with_locales(["en-US", "not a tag"])
            .validate()
            .is_err());

        let mut config = LocaleConfig::default();
        config.fallback_locale = Some("de-DE".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "fallback_locale"
        ));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = LocaleConfig::load(dir.path().join("missing.json")).unwrap();
        assert_eq!(config.available_locales, vec!["en-US", "zh-CN"]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locales.json");
        std::fs::write(
            &path,
            r#"{"available_locales": ["en-US", "fr-FR"], "fallback_locale": "fr-FR"}"#,
        )
        .unwrap();

        let config = LocaleConfig::load(&path).unwrap();
        assert_eq!(config.fallback_locale.as_deref(), Some("fr-FR"));

        std::fs::write(&path, "{").unwrap();
        assert!(matches!(
            LocaleConfig::load(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
