//! Data source reading `<locale>.json` files

use super::{DataSource, LanguageData};
use crate::config::LocaleConfig;
use crate::error::{LoadError, LoadResult};
use crate::locale::LocaleTag;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Maximum translation file size allowed (5 MB)
pub const MAX_DATA_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Reads translation data from a directory of JSON files
#[derive(Debug, Clone)]
pub struct FileDataSource {
    dir: PathBuf,
}

impl FileDataSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Data source for the configured data directory, if one is set
    pub fn from_config(config: &LocaleConfig) -> Option<Self> {
        config.data_dir.as_ref().map(Self::new)
    }

    /// Path of the data file for a locale
    pub fn path_for(&self, locale: &LocaleTag) -> PathBuf {
        self.dir.join(format!("{}.json", locale.as_str()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DataSource for FileDataSource {
    async fn fetch(&self, locale: &LocaleTag) -> LoadResult<LanguageData> {
        let path = self.path_for(locale);

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound {
                    locale: locale.to_string(),
                });
            }
            Err(e) => return Err(LoadError::Read { path, source: e }),
        };

        if metadata.len() > MAX_DATA_FILE_SIZE {
            return Err(LoadError::Source(format!(
                "{} exceeds {} bytes",
                path.display(),
                MAX_DATA_FILE_SIZE
            )));
        }

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| LoadError::Read {
                path: path.clone(),
                source: e,
            })?;

        parse_language_data(locale, &bytes)
    }
}

/// Parse raw bytes into a translation object
pub fn parse_language_data(locale: &LocaleTag, bytes: &[u8]) -> LoadResult<LanguageData> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| LoadError::Parse {
        locale: locale.to_string(),
        source: e,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(LoadError::NotAnObject {
            locale: locale.to_string(),
        }),
    }
}
