//! Per-platform profile scrapers.
//!
//! Each platform pairs a markup-aware extractor with a type-aware
//! normalizer behind [`ProfileScraper`]. Markup drift on one platform never
//! touches another, and adding a platform means adding one implementation
//! plus a `PlatformId` variant.

pub mod html;
mod http_client;
pub mod normalize;
mod tiktok;
mod xbox;

pub use http_client::{
    random_user_agent, FetchError, Fetcher, HttpFetcher, HttpFetcherBuilder, IdentityPolicy,
    RawDocument, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT, IMPERSONATE, IMPERSONATE_USER_AGENTS,
};
pub use tiktok::TikTokScraper;
pub use xbox::XboxScraper;

use std::collections::HashMap;

use crate::lookup::LookupError;
use crate::models::{PlatformId, Profile};

/// Strings as scraped, keyed by field name.
///
/// Produced by one platform's extractor and consumed only by the same
/// platform's normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    fields: HashMap<String, String>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|s| s.as_str())
    }

    /// Value of a required field, or `MarkupShapeFailure(field)`.
    pub fn require(&self, field: &str) -> Result<&str, LookupError> {
        self.get(field).ok_or_else(|| LookupError::markup(field))
    }

    /// Remove and return a field.
    pub fn take(&mut self, field: &str) -> Option<String> {
        self.fields.remove(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Markup contract and normalization rules for one platform.
pub trait ProfileScraper: Send + Sync {
    fn platform(&self) -> PlatformId;

    /// Profile page URL for an already validated identifier.
    fn profile_url(&self, identifier: &str) -> String;

    /// Locate every anchor in the document and return its raw text.
    ///
    /// Fails with `MarkupShapeFailure` naming the first missing required
    /// anchor in the platform's declared order.
    fn extract(&self, doc: &RawDocument) -> Result<RawFields, LookupError>;

    /// Type and clean raw fields into a complete profile.
    fn normalize(&self, identifier: &str, fields: RawFields) -> Result<Profile, LookupError>;
}

static XBOX: XboxScraper = XboxScraper;
static TIKTOK: TikTokScraper = TikTokScraper;

/// Scraper for a platform.
pub fn scraper_for(platform: PlatformId) -> &'static dyn ProfileScraper {
    match platform {
        PlatformId::Xbox => &XBOX,
        PlatformId::TikTok => &TIKTOK,
    }
}

/// Percent-encode an identifier for use as a single URL path segment.
pub fn encode_identifier(identifier: &str) -> String {
    urlencoding::encode(identifier).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scraper_for_matches_platform() {
        for platform in PlatformId::all() {
            assert_eq!(scraper_for(*platform).platform(), *platform);
        }
    }

    #[test]
    fn test_raw_fields_require() {
        let mut fields = RawFields::new();
        fields.insert("followers", "42");
        assert_eq!(fields.require("followers").unwrap(), "42");
        assert_eq!(
            fields.require("likes").unwrap_err(),
            LookupError::markup("likes")
        );
        assert_eq!(fields.take("followers").as_deref(), Some("42"));
        assert!(fields.is_empty());
    }

    #[test]
    fn test_encode_identifier() {
        assert_eq!(encode_identifier("Major Nelson"), "Major%20Nelson");
        assert_eq!(encode_identifier("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode_identifier("plain_name.1"), "plain_name.1");
    }
}
