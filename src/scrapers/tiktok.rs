//! TikTok public profiles.
//!
//! Counts live in `data-e2e` tagged `<strong>` elements; the avatar comes
//! from the Open Graph image.

use scraper::Html;

use super::html::{optional, require, stripped_text, trimmed_text};
use super::normalize::{clean_url, parse_count, rewrite_thumbnail};
use super::{encode_identifier, ProfileScraper, RawDocument, RawFields};
use crate::lookup::LookupError;
use crate::models::{PlatformId, Profile, Stat, BIO_LABEL};

const PROFILE_URL: &str = "https://www.tiktok.com/@";

pub const FIELD_THUMBNAIL: &str = "thumbnail";
pub const FIELD_FOLLOWERS: &str = "followers";
pub const FIELD_FOLLOWING: &str = "following";
pub const FIELD_LIKES: &str = "likes";
pub const FIELD_BIO: &str = "bio";

const THUMBNAIL_SELECTOR: &str = r#"meta[property="og:image"]"#;
const FOLLOWERS_SELECTOR: &str = r#"strong[data-e2e="followers-count"]"#;
const FOLLOWING_SELECTOR: &str = r#"strong[data-e2e="following-count"]"#;
const LIKES_SELECTOR: &str = r#"strong[data-e2e="likes-count"]"#;
const BIO_SELECTOR: &str = r#"h2[data-e2e="user-bio"]"#;

/// Counts in display order, paired with their stat labels.
const COUNTS: &[(&str, &str)] = &[
    (FIELD_FOLLOWERS, "Followers"),
    (FIELD_FOLLOWING, "Following"),
    (FIELD_LIKES, "Likes"),
];

/// Scraper for tiktok.com profile pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct TikTokScraper;

impl ProfileScraper for TikTokScraper {
    fn platform(&self) -> PlatformId {
        PlatformId::TikTok
    }

    fn profile_url(&self, identifier: &str) -> String {
        format!("{}{}", PROFILE_URL, encode_identifier(identifier))
    }

    fn extract(&self, doc: &RawDocument) -> Result<RawFields, LookupError> {
        let document = Html::parse_document(&doc.text);

        let thumbnail = optional(&document, THUMBNAIL_SELECTOR)?
            .and_then(|meta| meta.value().attr("content"))
            .map(|s| s.to_string());
        let followers = require(&document, FOLLOWERS_SELECTOR, FIELD_FOLLOWERS).map(stripped_text);
        let following = require(&document, FOLLOWING_SELECTOR, FIELD_FOLLOWING).map(stripped_text);
        let likes = require(&document, LIKES_SELECTOR, FIELD_LIKES).map(stripped_text);
        let bio = require(&document, BIO_SELECTOR, FIELD_BIO).map(trimmed_text);

        let mut fields = RawFields::new();
        if let Some(content) = thumbnail {
            fields.insert(FIELD_THUMBNAIL, content);
        }
        fields.insert(FIELD_FOLLOWERS, followers?);
        fields.insert(FIELD_FOLLOWING, following?);
        fields.insert(FIELD_LIKES, likes?);
        fields.insert(FIELD_BIO, bio?);

        Ok(fields)
    }

    fn normalize(&self, identifier: &str, mut fields: RawFields) -> Result<Profile, LookupError> {
        let bio = fields.require(FIELD_BIO)?.trim().to_string();

        let mut stats = Vec::with_capacity(COUNTS.len() + 1);
        stats.push(Stat::new(BIO_LABEL, bio));
        for (field, label) in COUNTS {
            let count = parse_count(fields.require(field)?, field)?;
            stats.push(Stat::new(*label, count));
        }

        let thumbnail_url = clean_url(fields.take(FIELD_THUMBNAIL)).map(|u| rewrite_thumbnail(&u));

        Ok(Profile::new(
            format!("TikTok - {}", identifier),
            thumbnail_url,
            stats,
        ))
    }
}
