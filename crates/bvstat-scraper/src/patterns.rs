//! Upstream markup patterns.
//!
//! These mirror what the platform currently embeds in its pages. When the
//! layout changes, this table is the only thing that needs editing.

use std::sync::LazyLock;

use regex::Regex;

/// Section id of the first part, from the embedded player state.
pub static SECTION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{"cid":(\d+),"page":1"#).unwrap());

/// Content id, from the embedded initial state.
pub static CONTENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""aid":(\d+),"#).unwrap());

/// The description meta sentence: views, barrage, likes, coins, favourites,
/// shares, then the uploader name.
pub static STATS_SENTENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"视频播放量 (\d+)、弹幕量 (\d+)、点赞数 (\d+)、投硬币枚数 (\d+)、收藏人数 (\d+)、转发人数 (\d+), 视频作者 (.*?), ",
    )
    .unwrap()
});

/// Publish time inside the pubdate span. The date may sit on the next line.
pub static PUBDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span class="pubdate[^"]*".*?\s*(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})"#).unwrap()
});

/// Top-level comment count from the embedded stat object.
pub static REPLY_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""reply":(\d+),"#).unwrap());

/// Page title meta tag, minus the platform suffix.
pub static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<meta data-vue-meta="true" itemprop="name" name="title" content="(.*?)_哔哩哔哩_bilibili">"#,
    )
    .unwrap()
});

/// One caption inside a barrage XML file.
pub static BARRAGE_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"">(.*?)</d>"#).unwrap());

/// Format of the captured publish time.
pub const PUBDATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        for re in [
            &*SECTION_ID,
            &*CONTENT_ID,
            &*STATS_SENTENCE,
            &*PUBDATE,
            &*REPLY_COUNT,
            &*TITLE,
            &*BARRAGE_ITEM,
        ] {
            assert!(re.captures_len() >= 2);
        }
    }

    #[test]
    fn test_pubdate_matches_multiline_and_inline_layouts() {
        let multiline = "<span class=\"pubdate\" title=\"x\">\n      2023-01-01 12:00:00\n    </span>";
        let inline = r#"<span class="pubdate-text" style="">2024-05-06 07:08:09</span>"#;

        assert_eq!(&PUBDATE.captures(multiline).unwrap()[1], "2023-01-01 12:00:00");
        assert_eq!(&PUBDATE.captures(inline).unwrap()[1], "2024-05-06 07:08:09");
    }
}
