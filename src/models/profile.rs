//! Normalized profile records.

use std::fmt;

use serde::Serialize;

/// Label of the stat that carries a profile's free-text bio.
pub const BIO_LABEL: &str = "Bio";

/// Typed value of a single profile stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(u64),
    Text(String),
}

impl From<u64> for StatValue {
    fn from(n: u64) -> Self {
        StatValue::Count(n)
    }
}

impl From<&str> for StatValue {
    fn from(s: &str) -> Self {
        StatValue::Text(s.to_string())
    }
}

impl From<String> for StatValue {
    fn from(s: String) -> Self {
        StatValue::Text(s)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{}", n),
            StatValue::Text(s) => f.write_str(s),
        }
    }
}

/// A labelled stat, in the order the platform presents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub label: String,
    pub value: StatValue,
}

impl Stat {
    pub fn new(label: impl Into<String>, value: impl Into<StatValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Platform-agnostic result of a successful lookup.
///
/// Only normalizers construct these, and only once every required field
/// has been parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub stats: Vec<Stat>,
}

impl Profile {
    pub fn new(title: impl Into<String>, thumbnail_url: Option<String>, stats: Vec<Stat>) -> Self {
        Self {
            title: title.into(),
            thumbnail_url,
            stats,
        }
    }

    /// The profile bio, if the platform carries one.
    pub fn bio(&self) -> Option<&str> {
        self.stats
            .iter()
            .find(|s| s.label == BIO_LABEL)
            .and_then(|s| match &s.value {
                StatValue::Text(t) => Some(t.as_str()),
                StatValue::Count(_) => None,
            })
    }

    /// Look up a stat value by label.
    pub fn stat(&self, label: &str) -> Option<&StatValue> {
        self.stats
            .iter()
            .find(|s| s.label == label)
            .map(|s| &s.value)
    }
}
