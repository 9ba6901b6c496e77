//! Locale tags and best-match negotiation
//!
//! A locale tag is a language subtag optionally followed by further subtags
//! (region, script, ...), e.g. `en`, `en-US`, `zh_CN`. Negotiation compares
//! tags ASCII case-insensitively and always hands back the spelling declared
//! in the available list.

use crate::error::LocaleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated locale tag such as `en-US`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleTag(String);

impl LocaleTag {
    /// Parse a tag, accepting `-` or `_` as subtag separator
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        let trimmed = tag.trim();
        let invalid = || LocaleError::InvalidTag {
            tag: tag.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid());
        }

        let mut subtags = trimmed.split(['-', '_']);
        let language = subtags.next().unwrap_or_default();
        if !(2..=8).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid());
        }
        for subtag in subtags {
            if subtag.is_empty()
                || subtag.len() > 8
                || !subtag.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(invalid());
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The full tag as written
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`en` for `en-US`)
    pub fn language(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or(&self.0)
    }

    /// Tag equality ignoring case and separator style
    pub fn matches_exactly(&self, other: &str) -> bool {
        normalize(&self.0) == normalize(other)
    }

    /// Whether the primary language subtags are equal
    pub fn same_language(&self, other: &str) -> bool {
        let other_language = other.trim().split(['-', '_']).next().unwrap_or_default();
        self.language().eq_ignore_ascii_case(other_language)
    }
}

fn normalize(tag: &str) -> String {
    tag.trim().replace('_', "-").to_ascii_lowercase()
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleTag {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocaleTag {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocaleTag> for String {
    fn from(tag: LocaleTag) -> Self {
        tag.0
    }
}

impl AsRef<str> for LocaleTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LocaleTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LocaleTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Find the best available locale for `requested`
///
/// Precedence: exact tag match, then the first available locale (in declared
/// order) sharing the language subtag. Returns `None` when nothing matches.
pub fn best_match<'a>(available: &'a [LocaleTag], requested: &str) -> Option<&'a LocaleTag> {
    available
        .iter()
        .find(|tag| tag.matches_exactly(requested))
        .or_else(|| available.iter().find(|tag| tag.same_language(requested)))
}

/// Whether `tag` is literally one of the available locales
pub fn is_available(available: &[LocaleTag], tag: &str) -> bool {
    available.iter().any(|candidate| candidate.matches_exactly(tag))
}
