//! Error types for Locale Manager
//!
//! This module defines all custom error types used throughout the crate.
//! Error types are organized by category: locale selection, data loading,
//! durable storage and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type encompassing all error categories
#[derive(Error, Debug)]
pub enum LocaleError {
    /// Requested locale has no match among the available locales
    #[error("Language \"{requested}\" is not available")]
    Unavailable { requested: String },

    /// Data load requested for a locale other than the current one
    #[error("Language \"{requested}\" is not the current language ({current})")]
    NotCurrent { requested: String, current: String },

    /// Locale tag could not be parsed
    #[error("Invalid locale tag: {tag:?}")]
    InvalidTag { tag: String },

    /// Translation data loading errors
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Durable storage errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Translation data loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    /// No data exists for the locale
    #[error("No translation data for locale {locale}")]
    NotFound { locale: String },

    /// Error reading translation data
    #[error("Could not read translation data: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Translation data is not valid JSON
    #[error("Invalid translation data for locale {locale}")]
    Parse {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    /// Translation data parsed but is not a key-value mapping
    #[error("Translation data for locale {locale} is not an object")]
    NotAnObject { locale: String },

    /// Failure reported by a custom data source
    #[error("Data source error: {0}")]
    Source(String),
}

/// Durable storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error reading the storage file
    #[error("Could not read storage: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the storage file
    #[error("Could not write storage: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Storage file contents are malformed
    #[error("Invalid storage format: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Could not determine the storage directory
    #[error("Could not access storage directory")]
    DirectoryError,
}

/// Configuration related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error loading configuration file
    #[error("Could not load configuration: {0}")]
    LoadError(String),

    /// Error parsing configuration
    #[error("Invalid configuration format: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Result type alias for locale operations
pub type LocaleResult<T> = Result<T, LocaleError>;

/// Result type alias for data loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl LocaleError {
    /// Whether the error came from the background data load rather than
    /// from locale selection
    pub fn is_load_failure(&self) -> bool {
        matches!(self, LocaleError::Load(_))
    }
}
