//! Anchor lookup helpers shared by the platform extractors.

use scraper::{ElementRef, Html, Selector};

use crate::lookup::LookupError;

/// Compile a built-in selector.
///
/// Selectors are constants in this crate, so a parse failure is a defect
/// rather than markup drift.
pub fn selector(css: &str) -> Result<Selector, LookupError> {
    Selector::parse(css)
        .map_err(|e| LookupError::internal(format!("invalid selector {:?}: {:?}", css, e)))
}

/// First element matching `css`, or `MarkupShapeFailure(field)`.
pub fn require<'a>(
    document: &'a Html,
    css: &str,
    field: &str,
) -> Result<ElementRef<'a>, LookupError> {
    let sel = selector(css)?;
    document
        .select(&sel)
        .next()
        .ok_or_else(|| LookupError::markup(field))
}

/// First element matching `css`, if any.
pub fn optional<'a>(document: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>, LookupError> {
    let sel = selector(css)?;
    Ok(document.select(&sel).next())
}

/// First descendant of `parent` matching `css`, or `MarkupShapeFailure(field)`.
pub fn require_within<'a>(
    parent: ElementRef<'a>,
    css: &str,
    field: &str,
) -> Result<ElementRef<'a>, LookupError> {
    let sel = selector(css)?;
    parent
        .select(&sel)
        .next()
        .ok_or_else(|| LookupError::markup(field))
}

/// Every text node trimmed, then concatenated with no separator.
///
/// `<div><span>Gamerscore</span>\n 1,234</div>` becomes `Gamerscore1,234`.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Full text content with leading and trailing whitespace removed.
pub fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        <html><body>
          <div class="item"><span>Gamerscore</span>
            1,234
          </div>
          <h2 class="bio">  line one
          line two  </h2>
        </body></html>
    "#;

    #[test]
    fn test_stripped_text_joins_nodes() {
        let doc = Html::parse_document(DOC);
        let div = require(&doc, "div.item", "gamerscore").unwrap();
        assert_eq!(stripped_text(div), "Gamerscore1,234");
    }

    #[test]
    fn test_trimmed_text_keeps_inner_whitespace() {
        let doc = Html::parse_document(DOC);
        let h2 = require(&doc, "h2.bio", "bio").unwrap();
        assert!(trimmed_text(h2).starts_with("line one"));
        assert!(trimmed_text(h2).ends_with("line two"));
    }

    #[test]
    fn test_require_names_field() {
        let doc = Html::parse_document(DOC);
        let err = require(&doc, "h1", "profile_title").unwrap_err();
        assert_eq!(err, LookupError::markup("profile_title"));
    }

    #[test]
    fn test_optional_missing_is_none() {
        let doc = Html::parse_document(DOC);
        assert!(optional(&doc, "meta[property=\"og:image\"]").unwrap().is_none());
    }

    #[test]
    fn test_bad_selector_is_internal() {
        let err = selector("div[").unwrap_err();
        assert!(matches!(err, LookupError::InternalFailure(_)));
    }
}
