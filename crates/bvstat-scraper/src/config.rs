//! Scraper configuration.

use std::time::Duration;

/// Desktop browser user agent; the video page serves a stripped layout to
/// unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

pub const DEFAULT_COMMENT_API_URL: &str = "https://api.bilibili.com/x/v2/reply";

pub const DEFAULT_BARRAGE_URL: &str = "https://comment.bilibili.com";

/// Default cap on comment pages per request.
pub const DEFAULT_MAX_COMMENT_PAGES: u32 = 20;

/// Configuration for [`crate::BiliClient`].
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Paginated comment list endpoint
    pub comment_api_url: String,
    /// Base URL of the barrage XML files
    pub barrage_url: String,
    /// Last comment page requested (pages start at 1)
    pub max_comment_pages: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            comment_api_url: DEFAULT_COMMENT_API_URL.to_string(),
            barrage_url: DEFAULT_BARRAGE_URL.to_string(),
            max_comment_pages: DEFAULT_MAX_COMMENT_PAGES,
        }
    }
}

impl ScraperConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            user_agent: std::env::var("BILI_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            timeout: Duration::from_secs(
                std::env::var("BILI_REQUEST_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            comment_api_url: std::env::var("BILI_COMMENT_API_URL")
                .unwrap_or_else(|_| DEFAULT_COMMENT_API_URL.to_string()),
            barrage_url: std::env::var("BILI_BARRAGE_URL")
                .unwrap_or_else(|_| DEFAULT_BARRAGE_URL.to_string()),
            max_comment_pages: std::env::var("BILI_MAX_COMMENT_PAGES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_COMMENT_PAGES),
        }
    }

    /// Point both API endpoints at one base URL (used against mock servers).
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.comment_api_url = format!("{}/x/v2/reply", base);
        self.barrage_url = base.to_string();
        self
    }
}
