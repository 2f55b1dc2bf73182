//! Supported platforms and lookup requests.

/// Platform a profile is looked up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PlatformId {
    /// Xbox Live gamertag (via xboxgamertag.com)
    Xbox,
    /// TikTok public profile
    #[value(name = "tiktok")]
    TikTok,
}

impl PlatformId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xbox => "xbox",
            Self::TikTok => "tiktok",
        }
    }

    /// Human-readable name used in titles and user messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Xbox => "Xbox",
            Self::TikTok => "TikTok",
        }
    }

    /// All supported platforms.
    pub fn all() -> &'static [PlatformId] {
        &[Self::Xbox, Self::TikTok]
    }
}

impl std::fmt::Display for PlatformId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single profile lookup as supplied by a command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub platform: PlatformId,
    pub identifier: String,
}

impl LookupRequest {
    pub fn new(platform: PlatformId, identifier: impl Into<String>) -> Self {
        Self {
            platform,
            identifier: identifier.into(),
        }
    }

    /// Identifier with surrounding whitespace and a leading `@` removed.
    ///
    /// Returns `None` when nothing is left.
    pub fn normalized_identifier(&self) -> Option<&str> {
        let trimmed = self.identifier.trim();
        let trimmed = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}
