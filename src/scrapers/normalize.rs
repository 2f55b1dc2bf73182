//! Text-to-type conversions shared by the platform normalizers.

use crate::lookup::LookupError;

/// Image proxy prefix found in scraped thumbnail URLs.
pub const IMAGE_PROXY_PREFIX: &str = "//images.weserv.nl/?url=";

/// Public image relay that serves the same images to chat clients.
pub const IMAGE_RELAY_PREFIX: &str = "https://external-content.duckduckgo.com/iu/?u=";

/// Parse a displayed count into an integer.
///
/// Accepts plain digits, comma thousands separators (`1,234`) and the
/// abbreviated forms TikTok renders (`12.5K`, `1.2M`, `3B`). Anything else
/// fails with `MarkupShapeFailure(field)`.
pub fn parse_count(raw: &str, field: &str) -> Result<u64, LookupError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(LookupError::markup(field));
    }

    let (number, multiplier) = match s.chars().last() {
        Some('K') | Some('k') => (&s[..s.len() - 1], 1_000u64),
        Some('M') | Some('m') => (&s[..s.len() - 1], 1_000_000u64),
        Some('B') | Some('b') => (&s[..s.len() - 1], 1_000_000_000u64),
        _ => (s, 1u64),
    };

    let (whole, frac) = match number.split_once('.') {
        Some((w, f)) if multiplier > 1 => (w, f),
        Some(_) => return Err(LookupError::markup(field)),
        None => (number, ""),
    };

    // Separators only appear in exact counts.
    let whole = if whole.contains(',') {
        if multiplier > 1 {
            return Err(LookupError::markup(field));
        }
        ungroup_thousands(whole).ok_or_else(|| LookupError::markup(field))?
    } else {
        whole.to_string()
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LookupError::markup(field));
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LookupError::markup(field));
    }

    let whole: u64 = whole.parse().map_err(|_| LookupError::markup(field))?;
    let mut total = whole
        .checked_mul(multiplier)
        .ok_or_else(|| LookupError::markup(field))?;

    // Fractional digits beyond the multiplier's precision are dropped.
    let mut scale = multiplier;
    for digit in frac.bytes() {
        scale /= 10;
        if scale == 0 {
            break;
        }
        total = total
            .checked_add(u64::from(digit - b'0') * scale)
            .ok_or_else(|| LookupError::markup(field))?;
    }

    Ok(total)
}

/// Join `1,234,567` style groups: 1 to 3 leading digits, then groups of 3.
fn ungroup_thousands(grouped: &str) -> Option<String> {
    let mut groups = grouped.split(',');
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 || !first.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

/// Remove the observed `label` from a combined label+value text, once.
///
/// Fails when the label is empty or does not occur in `combined`.
pub fn strip_label(combined: &str, label: &str, field: &str) -> Result<String, LookupError> {
    if label.is_empty() {
        return Err(LookupError::markup(field));
    }
    match combined.find(label) {
        Some(pos) => {
            let mut value = String::with_capacity(combined.len() - label.len());
            value.push_str(&combined[..pos]);
            value.push_str(&combined[pos + label.len()..]);
            Ok(value.trim().to_string())
        }
        None => Err(LookupError::markup(field)),
    }
}

/// Rewrite a proxied thumbnail URL to the public relay.
///
/// Unrecognized URLs pass through unchanged.
pub fn rewrite_thumbnail(url: &str) -> String {
    match url.strip_prefix(IMAGE_PROXY_PREFIX) {
        Some(rest) => format!("{}{}", IMAGE_RELAY_PREFIX, rest),
        None => url.to_string(),
    }
}

/// Trimmed non-empty URL, or `None`.
pub fn clean_url(raw: Option<String>) -> Option<String> {
    raw.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_plain_and_commas() {
        assert_eq!(parse_count("42", "f").unwrap(), 42);
        assert_eq!(parse_count(" 1,234 ", "f").unwrap(), 1234);
        assert_eq!(parse_count("1,000,000", "f").unwrap(), 1_000_000);
        assert_eq!(parse_count("0", "f").unwrap(), 0);
    }

    #[test]
    fn test_parse_count_abbreviated() {
        assert_eq!(parse_count("12.5K", "f").unwrap(), 12_500);
        assert_eq!(parse_count("1.2M", "f").unwrap(), 1_200_000);
        assert_eq!(parse_count("3B", "f").unwrap(), 3_000_000_000);
        assert_eq!(parse_count("999k", "f").unwrap(), 999_000);
        assert_eq!(parse_count("1.25K", "f").unwrap(), 1_250);
    }

    #[test]
    fn test_parse_count_rejects_non_numeric() {
        for raw in [
            "", "abc", "12a", "-5", "1.5", "K", ".5K", "1.xK", "1 000", "1,5K", ",5", "1,2,3",
            "12,34", "1,,000", "1,000,", "1234,567", "1,234.5", "1,234K", "1,2.5K",
        ] {
            assert_eq!(
                parse_count(raw, "followers"),
                Err(LookupError::markup("followers")),
                "input {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_parse_count_overflow() {
        assert!(parse_count("99999999999999999999", "f").is_err());
        assert!(parse_count("99999999999B", "f").is_err());
    }

    #[test]
    fn test_strip_label_gamerscore() {
        let value = strip_label("Gamerscore1,234", "Gamerscore", "gamerscore").unwrap();
        assert_eq!(value, "1,234");
        assert_eq!(parse_count(&value, "gamerscore").unwrap(), 1234);
    }

    #[test]
    fn test_strip_label_only_once() {
        let value = strip_label("GG12GG", "GG", "f").unwrap();
        assert_eq!(value, "12GG");
    }

    #[test]
    fn test_strip_label_uses_observed_text() {
        // Localized label
        let value = strip_label("Puntuación1.234", "Puntuación", "gamerscore").unwrap();
        assert_eq!(value, "1.234");
    }

    #[test]
    fn test_strip_label_missing() {
        assert_eq!(
            strip_label("1,234", "Gamerscore", "gamerscore"),
            Err(LookupError::markup("gamerscore"))
        );
        assert_eq!(
            strip_label("1,234", "", "gamerscore"),
            Err(LookupError::markup("gamerscore"))
        );
    }

    #[test]
    fn test_rewrite_thumbnail_proxy() {
        let rest = "https%3A%2F%2Fimages-eds.xboxlive.com%2Fimage%3Furl%3Dabc&w=128";
        let url = format!("{}{}", IMAGE_PROXY_PREFIX, rest);
        let rewritten = rewrite_thumbnail(&url);
        assert_eq!(rewritten, format!("{}{}", IMAGE_RELAY_PREFIX, rest));
        assert!(rewritten.ends_with(rest));
    }

    #[test]
    fn test_rewrite_thumbnail_passthrough() {
        let url = "https://cdn.example.com/avatar.png";
        assert_eq!(rewrite_thumbnail(url), url);
    }

    #[test]
    fn test_clean_url() {
        assert_eq!(clean_url(Some("  ".into())), None);
        assert_eq!(clean_url(None), None);
        assert_eq!(clean_url(Some(" https://a/b ".into())), Some("https://a/b".into()));
    }
}
