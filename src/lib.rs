//! Locale Manager - locale negotiation and translation data loading
//!
//! Determines which locale an application runs in, negotiates requests
//! against the locales it ships, persists the user's choice and loads the
//! matching translation data asynchronously.
//!
//! ```no_run
//! use std::sync::Arc;
//! use locale_manager::{
//!     FileDataSource, FileStorage, LocaleConfig, LocaleStore, SystemEnvironment,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! locale_manager::logging::init();
//!
//! let config = LocaleConfig::default();
//! let store = LocaleStore::new(
//!     &config,
//!     Arc::new(SystemEnvironment::new()),
//!     Arc::new(FileStorage::default_location()?),
//!     Arc::new(FileDataSource::new("assets/i18n")),
//! )?;
//!
//! store.set("en-GB").await?;
//! store.wait_until_settled().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod locale;
pub mod logging;
pub mod merge;
pub mod source;
pub mod state;
pub mod storage;

pub use config::LocaleConfig;
pub use environment::{Environment, MemoryEnvironment, SystemEnvironment};
pub use error::{ConfigError, LoadError, LocaleError, LocaleResult, StorageError};
pub use locale::{best_match, LocaleTag};
pub use merge::{deep_merge, merged};
pub use source::{
    DataSource, FileDataSource, LanguageData, LayeredDataSource, MemoryDataSource,
};
pub use state::{LoadOutcome, LoadStatus, LocaleStore};
pub use storage::{FileStorage, MemoryStorage, Storage};
