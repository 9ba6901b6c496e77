//! Data source layering a locale over a base locale

use super::{DataSource, LanguageData};
use crate::error::{LoadError, LoadResult};
use crate::locale::LocaleTag;
use crate::merge::deep_merge;
use async_trait::async_trait;
use std::sync::Arc;

/// Fills gaps in partial translations from a base locale
///
/// The base locale's data is fetched first and the requested locale's data
/// is deep-merged on top, so keys missing from a partial translation fall
/// back to the base text.
pub struct LayeredDataSource {
    inner: Arc<dyn DataSource>,
    base: LocaleTag,
}

impl LayeredDataSource {
    pub fn new(inner: Arc<dyn DataSource>, base: LocaleTag) -> Self {
        Self { inner, base }
    }

    pub fn base(&self) -> &LocaleTag {
        &self.base
    }
}

#[async_trait]
impl DataSource for LayeredDataSource {
    async fn fetch(&self, locale: &LocaleTag) -> LoadResult<LanguageData> {
        if *locale == self.base {
            return self.inner.fetch(locale).await;
        }

        let mut data = match self.inner.fetch(&self.base).await {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Base locale {} unavailable for layering: {}", self.base, e);
                LanguageData::new()
            }
        };

        match self.inner.fetch(locale).await {
            Ok(overlay) => {
                deep_merge(&mut data, &overlay);
                Ok(data)
            }
            Err(LoadError::NotFound { .. }) if !data.is_empty() => {
                log::debug!("No data for {}, serving base locale {}", locale, self.base);
                Ok(data)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryDataSource;
    use serde_json::{json, Value};

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::parse(s).unwrap()
    }

    fn object(value: Value) -> LanguageData {
        value.as_object().cloned().unwrap()
    }

    fn layered() -> LayeredDataSource {
        let inner = MemoryDataSource::new()
            .with_locale(
                "en-US",
                object(json!({"ok": "OK", "menu": {"file": "File", "edit": "Edit"}})),
            )
            .with_locale("zh-CN", object(json!({"menu": {"file": "文件"}})));
        LayeredDataSource::new(Arc::new(inner), tag("en-US"))
    }

    #[tokio::test]
    async fn test_partial_locale_falls_back_to_base_keys() {
        let data = layered().fetch(&tag("zh-CN")).await.unwrap();
        assert_eq!(
            Value::Object(data),
            json!({"ok": "OK", "menu": {"file": "文件", "edit": "Edit"}})
        );
    }

    #[tokio::test]
    async fn test_base_locale_is_served_directly() {
        let source = layered();
        assert_eq!(source.base(), &tag("en-US"));
        let data = source.fetch(&tag("en-US")).await.unwrap();
        assert_eq!(data["ok"], json!("OK"));
    }

    #[tokio::test]
    async fn test_missing_locale_serves_base() {
        let data = layered().fetch(&tag("fr-FR")).await.unwrap();
        assert_eq!(data["menu"]["edit"], json!("Edit"));
    }
}
