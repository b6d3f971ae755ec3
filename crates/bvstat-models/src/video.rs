//! Video metadata models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier of a whole uploaded video (the platform's `aid`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(pub u64);

impl ContentId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ContentId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Numeric identifier of one part/episode inside a video (the platform's `cid`).
///
/// Barrage files are keyed by this id, not by [`ContentId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub u64);

impl SectionId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SectionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Public statistics and descriptive fields scraped from one video page.
///
/// Every field except `comment_count` and `title` is required: a page that
/// lacks any of them does not produce a record at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    /// Identifier of the whole video
    pub content_id: ContentId,

    /// Identifier of the first part of the video
    pub section_id: SectionId,

    pub view_count: u64,

    /// Number of barrage (danmaku) captions
    pub barrage_count: u64,

    pub like_count: u64,

    pub coin_count: u64,

    /// Number of users who saved the video to a favourites folder
    pub collection_count: u64,

    pub share_count: u64,

    pub uploader_name: String,

    /// Publish time as UTC epoch milliseconds
    pub release_time_millis: i64,

    /// Number of top-level comments, when the page exposes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,

    /// Page title without the platform suffix, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl VideoMetadata {
    /// Comment count, or `0` when the page did not expose one.
    pub fn comment_count_or_default(&self) -> u64 {
        self.comment_count.unwrap_or_default()
    }

    /// Title, or an empty string when the page did not expose one.
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Publish time as a UTC timestamp.
    pub fn release_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.release_time_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VideoMetadata {
        VideoMetadata {
            content_id: ContentId(170001),
            section_id: SectionId(279786),
            view_count: 100,
            barrage_count: 20,
            like_count: 30,
            coin_count: 4,
            collection_count: 5,
            share_count: 6,
            uploader_name: "uploader".to_string(),
            release_time_millis: 1_672_545_600_000,
            comment_count: None,
            title: None,
        }
    }

    #[test]
    fn test_optional_fields_default() {
        let meta = sample();
        assert_eq!(meta.comment_count_or_default(), 0);
        assert_eq!(meta.title_or_default(), "");
    }

    #[test]
    fn test_release_time_conversion() {
        let meta = sample();
        let ts = meta.release_time().unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-01-01T04:00:00+00:00");
    }

    #[test]
    fn test_serializes_camel_case_and_skips_missing_optionals() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["contentId"], 170001);
        assert_eq!(json["barrageCount"], 20);
        assert!(json.get("commentCount").is_none());
        assert!(json.get("title").is_none());
    }

    #[test]
    fn test_ids_display() {
        assert_eq!(ContentId(42).to_string(), "42");
        assert_eq!(SectionId::from(7).get(), 7);
    }
}
