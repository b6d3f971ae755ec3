//! Best-effort paginated comment collection.
//!
//! The first failing page ends collection; the comments gathered so far are
//! the result.

use metrics::counter;
use serde::Deserialize;
use tracing::{debug, info, warn};

use bvstat_models::{CommentCorpus, ContentId};

use crate::client::BiliClient;
use crate::error::{ScrapeError, ScrapeResult};

const COMMENT_PAGES_TOTAL: &str = "bvstat_comment_pages_total";

/// Comment list response envelope.
#[derive(Debug, Deserialize)]
struct ReplyPage {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: Option<String>,
    data: Option<ReplyData>,
}

#[derive(Debug, Deserialize)]
struct ReplyData {
    replies: Option<Vec<Reply>>,
}

#[derive(Debug, Deserialize)]
struct Reply {
    content: ReplyContent,
}

#[derive(Debug, Deserialize)]
struct ReplyContent {
    message: String,
}

/// Decode one comment list page into its messages, in page order.
///
/// A missing `data` object or a `null` reply list is a decode failure; an
/// empty list is a valid, empty page.
pub fn decode_comment_page(body: &str) -> ScrapeResult<Vec<String>> {
    let page: ReplyPage = serde_json::from_str(body)?;

    let data = page.data.ok_or_else(|| {
        ScrapeError::decode(format!(
            "comment page has no data (code {}: {})",
            page.code,
            page.message.as_deref().unwrap_or("no message")
        ))
    })?;

    let replies = data
        .replies
        .ok_or_else(|| ScrapeError::decode("comment page has no reply list"))?;

    Ok(replies.into_iter().map(|r| r.content.message).collect())
}

impl BiliClient {
    /// Collect comments for `content_id` from pages `1..=max_pages`.
    ///
    /// Never fails: a network or decode error on any page stops collection
    /// and whatever was accumulated is returned.
    pub async fn collect_comments(&self, content_id: ContentId, max_pages: u32) -> CommentCorpus {
        let mut corpus = CommentCorpus::new();

        for page in 1..=max_pages {
            match self.fetch_comment_page(content_id, page).await {
                Ok(messages) => {
                    counter!(COMMENT_PAGES_TOTAL, "outcome" => "ok").increment(1);
                    debug!(
                        content_id = %content_id,
                        page,
                        count = messages.len(),
                        "Comment page collected"
                    );
                    corpus.extend(messages);
                }
                Err(e) => {
                    counter!(COMMENT_PAGES_TOTAL, "outcome" => "stopped").increment(1);
                    warn!(
                        content_id = %content_id,
                        page,
                        error = %e,
                        "Comment collection stopped early"
                    );
                    break;
                }
            }
        }

        info!(
            content_id = %content_id,
            comments = corpus.len(),
            "Comment collection finished"
        );
        corpus
    }

    async fn fetch_comment_page(&self, content_id: ContentId, page: u32) -> ScrapeResult<Vec<String>> {
        let url = format!(
            "{}?pn={}&type=1&oid={}&sort=2",
            self.config.comment_api_url, page, content_id
        );
        let body = self.fetch_text(&url).await?;
        decode_comment_page(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_page_in_order() {
        let body = r#"{"code":0,"data":{"replies":[
            {"content":{"message":"first"},"mid":1},
            {"content":{"message":"second"}}
        ]}}"#;
        assert_eq!(decode_comment_page(body).unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_decode_empty_list_is_ok() {
        let body = r#"{"code":0,"data":{"replies":[]}}"#;
        assert!(decode_comment_page(body).unwrap().is_empty());
    }

    #[test]
    fn test_decode_null_replies_is_error() {
        let body = r#"{"code":0,"data":{"replies":null}}"#;
        assert!(decode_comment_page(body).unwrap_err().is_decode());
    }

    #[test]
    fn test_decode_error_envelope() {
        let body = r#"{"code":-412,"message":"请求被拦截"}"#;
        let err = decode_comment_page(body).unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().contains("-412"));
    }

    #[test]
    fn test_decode_malformed_json() {
        assert!(decode_comment_page("<html>").unwrap_err().is_decode());
    }
}
