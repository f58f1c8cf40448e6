use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Feed request returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Feed request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to parse feed: {0}")]
    Parse(String),

    #[error("Entry has no {0}")]
    FieldAbsent(&'static str),

    #[error("Unparseable timestamp: {0:?}")]
    DateParse(String),
}

impl FeedError {
    /// Whether the error came from retrieving the feed rather than reading it.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_) | Self::Request(_) | Self::Status(_) | Self::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_network() {
        assert!(FeedError::Timeout(Duration::from_secs(6)).is_network());
        assert!(FeedError::Status(reqwest::StatusCode::NOT_FOUND).is_network());
        assert!(!FeedError::Parse("unexpected end".to_string()).is_network());
        assert!(!FeedError::FieldAbsent("video id").is_network());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            FeedError::Status(reqwest::StatusCode::NOT_FOUND).to_string(),
            "Feed request returned HTTP 404 Not Found"
        );
        assert_eq!(
            FeedError::FieldAbsent("video id").to_string(),
            "Entry has no video id"
        );
    }
}
