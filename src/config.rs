//! Configuration loaded from `statscout.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scrapers::{
    HttpFetcher, HttpFetcherBuilder, IdentityPolicy, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT,
};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "statscout.toml";

/// Blurple, the chat platform's accent color.
pub const DEFAULT_EMBED_COLOR: &str = "0x5865F2";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid embed color {0:?}: expected a hex value such as 0x5865F2")]
    InvalidColor(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP settings for the fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds. Must be non-zero.
    pub timeout_secs: u64,
    /// Maximum redirects followed per request.
    pub max_redirects: usize,
    /// "impersonate" (default) rotates browser user agents; anything else
    /// is sent verbatim.
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: None,
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn identity_policy(&self) -> IdentityPolicy {
        IdentityPolicy::from_config(self.user_agent.as_deref())
    }

    pub fn fetcher_builder(&self) -> HttpFetcherBuilder {
        HttpFetcher::builder()
            .timeout(self.timeout())
            .max_redirects(self.max_redirects)
    }
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Embed accent color as hex (`0x5865F2`, `#5865F2` or `5865F2`).
    pub embed_color: String,
    pub http: HttpSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            embed_color: DEFAULT_EMBED_COLOR.to_string(),
            http: HttpSettings::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Load from an explicit path, or from [`DEFAULT_CONFIG_FILE`] if it
    /// exists, or fall back to defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::load(default_path)
        } else {
            tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_color(&self.embed_color)?;
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Embed color as an RGB integer.
    pub fn embed_color(&self) -> Result<u32, ConfigError> {
        parse_color(&self.embed_color)
    }
}

/// Parse a hex color such as `0x5865F2`, `#5865F2` or `5865F2`.
pub fn parse_color(raw: &str) -> Result<u32, ConfigError> {
    let trimmed = raw.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_prefix('#'))
        .unwrap_or(trimmed);

    if hex.is_empty() || hex.len() > 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(raw.to_string()));
    }
    u32::from_str_radix(hex, 16).map_err(|_| ConfigError::InvalidColor(raw.to_string()))
}
