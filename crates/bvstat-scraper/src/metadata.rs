//! Video page metadata parsing.

use chrono::{Duration, NaiveDateTime};
use regex::Regex;

use bvstat_models::{ContentId, SectionId, VideoMetadata};

use crate::error::{ScrapeError, ScrapeResult};
use crate::pattern::extract;
use crate::patterns;

/// Offset of the platform's publication timezone (UTC+8), in hours.
///
/// Pages print publish times in this zone without saying so. The offset is
/// fixed, never taken from response headers.
pub const SOURCE_UTC_OFFSET_HOURS: i64 = 8;

/// Parse one video page into a [`VideoMetadata`] record.
///
/// Fails with [`ScrapeError::Parse`] when a required field is missing or a
/// number does not fit. `comment_count` and `title` are optional.
pub fn parse_metadata(html: &str) -> ScrapeResult<VideoMetadata> {
    let section_id = required_number(&patterns::SECTION_ID, html, "cid")?;
    let content_id = required_number(&patterns::CONTENT_ID, html, "aid")?;

    let stats = patterns::STATS_SENTENCE
        .captures(html)
        .ok_or_else(|| ScrapeError::missing_field("stats sentence"))?;
    let counter = |index: usize, name: &str| -> ScrapeResult<u64> {
        let digits = stats
            .get(index)
            .map(|m| m.as_str())
            .ok_or_else(|| ScrapeError::missing_field(name))?;
        parse_u64(digits, name)
    };

    let view_count = counter(1, "view count")?;
    let barrage_count = counter(2, "barrage count")?;
    let like_count = counter(3, "like count")?;
    let coin_count = counter(4, "coin count")?;
    let collection_count = counter(5, "collection count")?;
    let share_count = counter(6, "share count")?;
    let uploader_name = stats
        .get(7)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ScrapeError::missing_field("uploader"))?;

    let pubdate = extract(&patterns::PUBDATE, html)
        .ok_or_else(|| ScrapeError::missing_field("pubdate"))?;
    let release_time_millis = local_time_to_utc_millis(pubdate)?;

    let comment_count = extract(&patterns::REPLY_COUNT, html)
        .map(|digits| parse_u64(digits, "comment count"))
        .transpose()?;
    let title = extract(&patterns::TITLE, html).map(str::to_string);

    Ok(VideoMetadata {
        content_id: ContentId(content_id),
        section_id: SectionId(section_id),
        view_count,
        barrage_count,
        like_count,
        coin_count,
        collection_count,
        share_count,
        uploader_name,
        release_time_millis,
        comment_count,
        title,
    })
}

/// Convert a `YYYY-MM-DD HH:MM:SS` time in the platform zone to UTC epoch
/// milliseconds.
pub fn local_time_to_utc_millis(text: &str) -> ScrapeResult<i64> {
    let local = NaiveDateTime::parse_from_str(text.trim(), patterns::PUBDATE_FORMAT)
        .map_err(|e| ScrapeError::parse(format!("invalid publish time '{}': {}", text, e)))?;
    let utc = local - Duration::hours(SOURCE_UTC_OFFSET_HOURS);
    Ok(utc.and_utc().timestamp_millis())
}

fn required_number(pattern: &Regex, html: &str, name: &str) -> ScrapeResult<u64> {
    let digits = extract(pattern, html).ok_or_else(|| ScrapeError::missing_field(name))?;
    parse_u64(digits, name)
}

fn parse_u64(digits: &str, name: &str) -> ScrapeResult<u64> {
    digits
        .parse::<u64>()
        .map_err(|e| ScrapeError::parse(format!("{} '{}' is not a valid count: {}", name, digits, e)))
}
