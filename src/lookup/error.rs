//! Lookup failure taxonomy.

use thiserror::Error;

use crate::models::PlatformId;
use crate::scrapers::FetchError;

/// Why a lookup failed.
///
/// The `Display` text carries detail for logs. What a chat user sees comes
/// from [`LookupError::user_message`], which never exposes parser internals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Identifier is empty")]
    EmptyOrInvalidIdentifier,

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Remote returned HTTP {0}")]
    HttpStatusFailure(u16),

    #[error("Expected field missing or malformed: {0}")]
    MarkupShapeFailure(String),

    #[error("Internal failure: {0}")]
    InternalFailure(String),
}

impl LookupError {
    pub fn markup(field: impl Into<String>) -> Self {
        LookupError::MarkupShapeFailure(field.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        LookupError::InternalFailure(detail.into())
    }

    /// Short machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::EmptyOrInvalidIdentifier => "empty_or_invalid_identifier",
            LookupError::NetworkFailure(_) => "network_failure",
            LookupError::HttpStatusFailure(_) => "http_status_failure",
            LookupError::MarkupShapeFailure(_) => "markup_shape_failure",
            LookupError::InternalFailure(_) => "internal_failure",
        }
    }

    /// Message suitable for showing to the user who ran the command.
    pub fn user_message(&self, platform: PlatformId) -> String {
        let name = platform.display_name();
        match self {
            LookupError::EmptyOrInvalidIdentifier => {
                format!("Please provide a {} username to look up.", name)
            }
            LookupError::NetworkFailure(_) => {
                format!("An error occurred while fetching the {} data.", name)
            }
            LookupError::HttpStatusFailure(404) => {
                format!("{} returned 404 Not Found. Check the username and try again.", name)
            }
            LookupError::HttpStatusFailure(code) => {
                format!("{} returned an error (HTTP {}). Try again later.", name, code)
            }
            LookupError::MarkupShapeFailure(_) => format!(
                "Failed to parse the {} data. The username might be invalid or the data format has changed.",
                name
            ),
            LookupError::InternalFailure(_) => format!(
                "Something went wrong while reading the {} data. The data format may have changed.",
                name
            ),
        }
    }
}

impl From<FetchError> for LookupError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Network(detail) => LookupError::NetworkFailure(detail),
            FetchError::Status(code) => LookupError::HttpStatusFailure(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_distinct() {
        let errors = [
            LookupError::EmptyOrInvalidIdentifier,
            LookupError::NetworkFailure("dns".into()),
            LookupError::HttpStatusFailure(500),
            LookupError::markup("gamerscore"),
            LookupError::internal("boom"),
        ];
        let messages: Vec<String> = errors
            .iter()
            .map(|e| e.user_message(PlatformId::Xbox))
            .collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_user_message_hides_internals() {
        let err = LookupError::markup("followers_count_selector");
        let msg = err.user_message(PlatformId::TikTok);
        assert!(!msg.contains("followers_count_selector"));
        assert!(msg.contains("data format has changed"));

        let err = LookupError::internal("panicked at src/scrapers/xbox.rs:42");
        let msg = err.user_message(PlatformId::TikTok);
        assert!(!msg.contains("panicked"));
        assert!(!msg.contains("xbox.rs"));
    }

    #[test]
    fn test_status_message_mentions_code() {
        let msg = LookupError::HttpStatusFailure(503).user_message(PlatformId::Xbox);
        assert!(msg.contains("503"));
    }

    #[test]
    fn test_from_fetch_error() {
        assert_eq!(
            LookupError::from(FetchError::Status(429)),
            LookupError::HttpStatusFailure(429)
        );
        assert_eq!(
            LookupError::from(FetchError::Network("timed out".into())).kind(),
            "network_failure"
        );
    }

    #[test]
    fn test_display_keeps_detail() {
        let err = LookupError::markup("gamerscore");
        assert!(err.to_string().contains("gamerscore"));
    }
}
