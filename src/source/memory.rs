//! In-memory data source

use super::{DataSource, LanguageData};
use crate::error::{LoadError, LoadResult};
use crate::locale::LocaleTag;
use async_trait::async_trait;
use std::collections::HashMap;

/// Data source serving preloaded objects
#[derive(Debug, Clone, Default)]
pub struct MemoryDataSource {
    data: HashMap<String, LanguageData>,
}

impl MemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the data set for a locale
    pub fn with_locale(mut self, locale: &str, data: LanguageData) -> Self {
        self.data.insert(locale.to_string(), data);
        self
    }
}

#[async_trait]
impl DataSource for MemoryDataSource {
    async fn fetch(&self, locale: &LocaleTag) -> LoadResult<LanguageData> {
        self.data
            .get(locale.as_str())
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                locale: locale.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_source_fetch() {
        let data = json!({"test": "test"}).as_object().cloned().unwrap();
        let source = MemoryDataSource::new().with_locale("en-US", data.clone());

        let en = LocaleTag::parse("en-US").unwrap();
        assert_eq!(source.fetch(&en).await.unwrap(), data);

        let zh = LocaleTag::parse("zh-CN").unwrap();
        assert!(matches!(
            source.fetch(&zh).await,
            Err(LoadError::NotFound { .. })
        ));
    }
}
