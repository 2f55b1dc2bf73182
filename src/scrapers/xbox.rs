//! Xbox gamertag profiles from xboxgamertag.com.
//!
//! The gamerscore is rendered as a single detail item whose text node holds
//! both the label and the value (`<span>Gamerscore</span>1,234`), so the
//! label is extracted separately and removed from the combined text.

use scraper::Html;
use tracing::debug;

use super::html::{optional, require, require_within, stripped_text, trimmed_text};
use super::normalize::{clean_url, parse_count, rewrite_thumbnail, strip_label};
use super::{encode_identifier, ProfileScraper, RawDocument, RawFields};
use crate::lookup::LookupError;
use crate::models::{PlatformId, Profile, Stat};

const SEARCH_URL: &str = "https://xboxgamertag.com/search/";

pub const FIELD_TITLE: &str = "profile_title";
pub const FIELD_GAMERSCORE: &str = "gamerscore";
pub const FIELD_GAMERSCORE_LABEL: &str = "gamerscore_label";
pub const FIELD_THUMBNAIL: &str = "thumbnail";

const TITLE_SELECTOR: &str = "h1";
const DETAIL_SELECTOR: &str = "div.col-auto.profile-detail-item";
const LABEL_SELECTOR: &str = "span";
const THUMBNAIL_SELECTOR: &str = "img.rounded.img-thumbnail";

/// Scraper for xboxgamertag.com search result pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct XboxScraper;

impl ProfileScraper for XboxScraper {
    fn platform(&self) -> PlatformId {
        PlatformId::Xbox
    }

    fn profile_url(&self, identifier: &str) -> String {
        format!("{}{}", SEARCH_URL, encode_identifier(identifier))
    }

    fn extract(&self, doc: &RawDocument) -> Result<RawFields, LookupError> {
        let document = Html::parse_document(&doc.text);

        let title = require(&document, TITLE_SELECTOR, FIELD_TITLE).map(trimmed_text);
        let detail = require(&document, DETAIL_SELECTOR, FIELD_GAMERSCORE);
        let gamerscore = detail.clone().map(stripped_text);
        let label = detail
            .and_then(|div| require_within(div, LABEL_SELECTOR, FIELD_GAMERSCORE_LABEL))
            .map(stripped_text);
        let thumbnail = optional(&document, THUMBNAIL_SELECTOR)?
            .and_then(|img| img.value().attr("src"))
            .map(|s| s.to_string());

        let mut fields = RawFields::new();
        fields.insert(FIELD_TITLE, title?);
        fields.insert(FIELD_GAMERSCORE, gamerscore?);
        fields.insert(FIELD_GAMERSCORE_LABEL, label?);
        if let Some(src) = thumbnail {
            fields.insert(FIELD_THUMBNAIL, src);
        } else {
            debug!("Xbox profile has no thumbnail image");
        }

        Ok(fields)
    }

    fn normalize(&self, _identifier: &str, mut fields: RawFields) -> Result<Profile, LookupError> {
        let title = fields.require(FIELD_TITLE)?.trim().to_string();
        if title.is_empty() {
            return Err(LookupError::markup(FIELD_TITLE));
        }

        let combined = fields.require(FIELD_GAMERSCORE)?;
        let label = fields.require(FIELD_GAMERSCORE_LABEL)?;
        let value = strip_label(combined, label, FIELD_GAMERSCORE)?;
        let gamerscore = parse_count(&value, FIELD_GAMERSCORE)?;

        let thumbnail_url = clean_url(fields.take(FIELD_THUMBNAIL)).map(|u| rewrite_thumbnail(&u));

        Ok(Profile::new(
            title,
            thumbnail_url,
            vec![Stat::new("Gamerscore", gamerscore)],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatValue;

    fn page(body: &str) -> RawDocument {
        RawDocument::new(
            format!("<html><body>{}</body></html>", body),
            "https://xboxgamertag.com/search/Someone",
            200,
        )
    }

    const FULL: &str = r#"
        <h1> Major Nelson </h1>
        <img class="rounded img-thumbnail" src="//images.weserv.nl/?url=https://images-eds.xboxlive.com/pic.png">
        <div class="row">
          <div class="col-auto profile-detail-item"><span>Gamerscore</span> 1,234</div>
          <div class="col-auto profile-detail-item"><span>Games Played</span> 77</div>
        </div>
    "#;

    #[test]
    fn test_profile_url_encodes_identifier() {
        assert_eq!(
            XboxScraper.profile_url("Major Nelson"),
            "https://xboxgamertag.com/search/Major%20Nelson"
        );
    }

    #[test]
    fn test_extract_full_page() {
        let fields = XboxScraper.extract(&page(FULL)).unwrap();
        assert_eq!(fields.get(FIELD_TITLE), Some("Major Nelson"));
        assert_eq!(fields.get(FIELD_GAMERSCORE), Some("Gamerscore1,234"));
        assert_eq!(fields.get(FIELD_GAMERSCORE_LABEL), Some("Gamerscore"));
        assert!(fields.get(FIELD_THUMBNAIL).unwrap().starts_with("//images.weserv.nl"));
    }

    #[test]
    fn test_normalize_full_page() {
        let fields = XboxScraper.extract(&page(FULL)).unwrap();
        let profile = XboxScraper.normalize("Major Nelson", fields).unwrap();
        assert_eq!(profile.title, "Major Nelson");
        assert_eq!(profile.stats, vec![Stat::new("Gamerscore", 1234u64)]);
        assert_eq!(
            profile.thumbnail_url.as_deref(),
            Some("https://external-content.duckduckgo.com/iu/?u=https://images-eds.xboxlive.com/pic.png")
        );
    }

    #[test]
    fn test_missing_title_named() {
        let body = r#"<div class="col-auto profile-detail-item"><span>Gamerscore</span>5</div>"#;
        assert_eq!(
            XboxScraper.extract(&page(body)).unwrap_err(),
            LookupError::markup(FIELD_TITLE)
        );
    }

    #[test]
    fn test_missing_gamerscore_named() {
        let body = "<h1>Someone</h1>";
        assert_eq!(
            XboxScraper.extract(&page(body)).unwrap_err(),
            LookupError::markup(FIELD_GAMERSCORE)
        );
    }

    #[test]
    fn test_missing_label_named() {
        let body = r#"<h1>Someone</h1><div class="col-auto profile-detail-item">1,234</div>"#;
        assert_eq!(
            XboxScraper.extract(&page(body)).unwrap_err(),
            LookupError::markup(FIELD_GAMERSCORE_LABEL)
        );
    }

    #[test]
    fn test_missing_thumbnail_is_fine() {
        let body = r#"<h1>Someone</h1><div class="col-auto profile-detail-item"><span>Gamerscore</span>0</div>"#;
        let fields = XboxScraper.extract(&page(body)).unwrap();
        let profile = XboxScraper.normalize("Someone", fields).unwrap();
        assert_eq!(profile.thumbnail_url, None);
        assert_eq!(profile.stat("Gamerscore"), Some(&StatValue::Count(0)));
    }

    #[test]
    fn test_non_numeric_gamerscore() {
        let body = r#"<h1>Someone</h1><div class="col-auto profile-detail-item"><span>Gamerscore</span>hidden</div>"#;
        let fields = XboxScraper.extract(&page(body)).unwrap();
        assert_eq!(
            XboxScraper.normalize("Someone", fields).unwrap_err(),
            LookupError::markup(FIELD_GAMERSCORE)
        );
    }

    #[test]
    fn test_unknown_thumbnail_prefix_passes_through() {
        let body = r#"<h1>Someone</h1>
            <img class="rounded img-thumbnail" src="https://cdn.example.com/a.png">
            <div class="col-auto profile-detail-item"><span>Gamerscore</span>10</div>"#;
        let fields = XboxScraper.extract(&page(body)).unwrap();
        let profile = XboxScraper.normalize("Someone", fields).unwrap();
        assert_eq!(profile.thumbnail_url.as_deref(), Some("https://cdn.example.com/a.png"));
    }
}
