//! Bilibili HTTP client.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use tracing::{debug, info, info_span, Instrument};

use bvstat_models::{ScrapeOptions, VideoMetadata, VideoSnapshot};

use crate::config::ScraperConfig;
use crate::error::{ScrapeError, ScrapeResult};
use crate::metadata::parse_metadata;

/// Client for the video page, comment API and barrage files.
///
/// Holds only read-only configuration and a pooled `reqwest::Client`, so one
/// instance is shared by every in-flight request.
#[derive(Debug, Clone)]
pub struct BiliClient {
    pub(crate) http: Client,
    pub(crate) config: ScraperConfig,
}

impl BiliClient {
    /// Create a new client.
    pub fn new(config: ScraperConfig) -> ScrapeResult<Self> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| ScrapeError::InvalidConfig(format!("invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, user_agent);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScrapeError::InvalidConfig(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ScrapeResult<Self> {
        Self::new(ScraperConfig::from_env())
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// GET `url` and return the body decoded as UTF-8, replacing invalid bytes.
    pub async fn fetch_text(&self, url: &str) -> ScrapeResult<String> {
        debug!(url = %url, "Fetching");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Always UTF-8, whatever the response claims; bad sequences become U+FFFD
        let bytes = response.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Fetch a video page and parse its metadata.
    pub async fn fetch_metadata(&self, video_url: &str) -> ScrapeResult<VideoMetadata> {
        let html = self.fetch_text(video_url).await?;
        let metadata = parse_metadata(&html)?;

        info!(
            content_id = %metadata.content_id,
            section_id = %metadata.section_id,
            "Video metadata parsed"
        );
        Ok(metadata)
    }

    /// Metadata first, then whichever corpora `options` asks for.
    ///
    /// Comment collection never fails this call; a barrage failure does.
    pub async fn snapshot(
        &self,
        video_url: &str,
        options: ScrapeOptions,
    ) -> ScrapeResult<VideoSnapshot> {
        let span = info_span!(
            "scrape",
            url = %video_url,
            comments = options.comments,
            barrage = options.barrage
        );

        async move {
            let metadata = self.fetch_metadata(video_url).await?;

            let comments = if options.comments {
                Some(
                    self.collect_comments(metadata.content_id, self.config.max_comment_pages)
                        .await,
                )
            } else {
                None
            };

            let barrage = if options.barrage {
                Some(self.collect_barrage(metadata.section_id).await?)
            } else {
                None
            };

            Ok(VideoSnapshot {
                metadata,
                comments,
                barrage,
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_user_agent() {
        let config = ScraperConfig {
            user_agent: "bad\nagent".to_string(),
            ..ScraperConfig::default()
        };
        let err = BiliClient::new(config).unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidConfig(_)));
    }

    #[test]
    fn test_builds_with_defaults() {
        let client = BiliClient::new(ScraperConfig::default()).unwrap();
        assert_eq!(client.config().max_comment_pages, 20);
    }
}
