//! Host environment signals
//!
//! The store reads the document language and the user agent's preferred
//! language exactly once, at construction, and writes the document language
//! whenever a locale is committed.

use std::sync::{Mutex, PoisonError};

/// Access to the language signals of the host environment
pub trait Environment: Send + Sync {
    /// Language attribute currently rendered by the host (e.g. `<html lang>`)
    fn document_language(&self) -> Option<String>;

    /// Update the visible language attribute
    fn set_document_language(&self, tag: &str);

    /// Language the user agent reports as preferred
    fn preferred_language(&self) -> Option<String>;
}

/// In-memory environment for embedded hosts and tests
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    document_language: Mutex<Option<String>>,
    preferred_language: Option<String>,
}

impl MemoryEnvironment {
    pub fn new(document_language: Option<&str>, preferred_language: Option<&str>) -> Self {
        Self {
            document_language: Mutex::new(document_language.map(str::to_string)),
            preferred_language: preferred_language.map(str::to_string),
        }
    }
}

impl Environment for MemoryEnvironment {
    fn document_language(&self) -> Option<String> {
        self.document_language
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_document_language(&self, tag: &str) {
        *self
            .document_language
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(tag.to_string());
    }

    fn preferred_language(&self) -> Option<String> {
        self.preferred_language.clone()
    }
}

/// Environment backed by the operating system locale
///
/// The OS locale doubles as the initial document language; later writes are
/// kept in memory for the host UI to read back.
#[derive(Debug)]
pub struct SystemEnvironment {
    inner: MemoryEnvironment,
}

impl SystemEnvironment {
    pub fn new() -> Self {
        let system = sys_locale::get_locale();
        log::debug!("System locale: {:?}", system);
        Self {
            inner: MemoryEnvironment::new(system.as_deref(), system.as_deref()),
        }
    }
}

impl Default for SystemEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for SystemEnvironment {
    fn document_language(&self) -> Option<String> {
        self.inner.document_language()
    }

    fn set_document_language(&self, tag: &str) {
        self.inner.set_document_language(tag);
    }

    fn preferred_language(&self) -> Option<String> {
        self.inner.preferred_language()
    }
}
