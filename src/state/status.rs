//! Load lifecycle status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of the most recent data load for the current locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// No load has been started
    #[default]
    Idle,
    /// A load is in flight; data is cleared
    Loading,
    /// Data for the current locale is available
    Loaded,
    /// The last load failed; no data is available
    Error,
}

impl LoadStatus {
    /// No load is in flight
    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadStatus::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Idle => "idle",
            LoadStatus::Loading => "loading",
            LoadStatus::Loaded => "loaded",
            LoadStatus::Error => "error",
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to the result of a completed load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The data became the store's current data
    Applied,
    /// A newer load or locale change made the result stale; it was dropped
    Superseded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_and_display() {
        assert_eq!(LoadStatus::default(), LoadStatus::Idle);
        assert_eq!(LoadStatus::Loaded.to_string(), "loaded");
        assert_eq!(
            serde_json::to_string(&LoadStatus::Error).unwrap(),
            "\"error\""
        );
    }

    #[test]
    fn test_is_settled() {
        assert!(LoadStatus::Idle.is_settled());
        assert!(!LoadStatus::Loading.is_settled());
        assert!(LoadStatus::Loaded.is_settled());
        assert!(LoadStatus::Error.is_settled());
    }
}
