//! Translation data sources
//!
//! The store treats data loading as an injected collaborator: anything that
//! can asynchronously produce a JSON object for a locale will do.
//! - `memory`: preloaded objects, keyed by locale
//! - `file`: `<dir>/<locale>.json` files read from disk
//! - `layered`: a locale's data deep-merged over a base locale's data

mod file;
mod layered;
mod memory;

pub use file::*;
pub use layered::*;
pub use memory::*;

use crate::error::LoadResult;
use crate::locale::LocaleTag;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Parsed translation data: key to string or nested mapping
pub type LanguageData = Map<String, Value>;

/// Provider of translation data for a locale
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch and parse the data set for `locale`
    async fn fetch(&self, locale: &LocaleTag) -> LoadResult<LanguageData>;
}
