//! Scraper error types.

use thiserror::Error;

pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream returned {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ScrapeError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// A required page field whose pattern did not match.
    pub fn missing_field(field: &str) -> Self {
        Self::Parse(format!("required field '{}' not found in page", field))
    }

    /// The request never produced a usable response.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::UpstreamStatus { .. })
    }

    /// The response arrived but its body had an unexpected shape.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Json(_))
    }

    /// A required metadata field was missing or malformed.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = ScrapeError::UpstreamStatus {
            status: 412,
            url: "https://api.example/x".to_string(),
        };
        assert!(err.is_network());
        assert!(!err.is_parse());

        assert!(ScrapeError::decode("bad body").is_decode());
        assert!(ScrapeError::missing_field("aid").is_parse());
    }

    #[test]
    fn test_missing_field_message() {
        let err = ScrapeError::missing_field("cid");
        assert_eq!(err.to_string(), "Parse error: required field 'cid' not found in page");
    }
}
