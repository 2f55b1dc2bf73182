//! Rich message (Discord embed) mapping for lookup results.
//!
//! The structs serialize to the JSON shape of a Discord embed object so the
//! chat client can send them as-is.

use std::fmt;

use serde::Serialize;

use crate::lookup::LookupError;
use crate::models::{PlatformId, Profile, StatValue};

/// Shown in place of an empty text stat; chat embeds reject empty values.
pub const EMPTY_VALUE_PLACEHOLDER: &str = "No bio yet.";

/// Field values longer than this are truncated by the chat platform.
pub const MAX_FIELD_VALUE_LEN: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedThumbnail {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A rich message ready for the chat client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    /// Map a profile: title to title, thumbnail to thumbnail, stats to
    /// non-inline fields in order.
    pub fn from_profile(profile: &Profile, color: u32) -> Self {
        let fields = profile
            .stats
            .iter()
            .map(|stat| EmbedField {
                name: stat.label.clone(),
                value: field_value(&stat.value),
                inline: false,
            })
            .collect();

        Self {
            title: profile.title.clone(),
            description: None,
            color,
            thumbnail: profile
                .thumbnail_url
                .as_ref()
                .map(|url| EmbedThumbnail { url: url.clone() }),
            fields,
        }
    }

    /// Embed describing a failed lookup, using the user-facing message only.
    pub fn from_error(err: &LookupError, platform: PlatformId, color: u32) -> Self {
        Self {
            title: format!("{} lookup failed", platform.display_name()),
            description: Some(err.user_message(platform)),
            color,
            thumbnail: None,
            fields: Vec::new(),
        }
    }
}

fn field_value(value: &StatValue) -> String {
    match value {
        StatValue::Count(n) => n.to_string(),
        StatValue::Text(t) if t.trim().is_empty() => EMPTY_VALUE_PLACEHOLDER.to_string(),
        StatValue::Text(t) => truncate(t, MAX_FIELD_VALUE_LEN),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Plain-text rendering for terminals and logs.
impl fmt::Display for Embed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if let Some(thumbnail) = &self.thumbnail {
            writeln!(f, "  thumbnail: {}", thumbnail.url)?;
        }
        if let Some(description) = &self.description {
            writeln!(f, "  {}", description)?;
        }
        for field in &self.fields {
            writeln!(f, "  {}: {}", field.name, field.value)?;
        }
        Ok(())
    }
}
