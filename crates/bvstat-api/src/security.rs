//! Video URL validation.
//!
//! The service fetches whatever `video_url` names, so the URL is checked
//! before any request leaves the process:
//! - length and scheme (http/https only)
//! - internal addresses and cloud metadata endpoints are refused
//! - the host, or a parent domain of it, must be on the allow list

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;
use url::Url;

/// Maximum URL length.
const MAX_URL_LENGTH: usize = 2048;

static BLOCKED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Internal IP ranges
        Regex::new(r"^https?://127\.").unwrap(),
        Regex::new(r"^https?://localhost").unwrap(),
        Regex::new(r"^https?://10\.").unwrap(),
        Regex::new(r"^https?://172\.(1[6-9]|2[0-9]|3[0-1])\.").unwrap(),
        Regex::new(r"^https?://192\.168\.").unwrap(),
        Regex::new(r"^https?://169\.254\.").unwrap(),
        Regex::new(r"^https?://\[::1\]").unwrap(),
        Regex::new(r"^https?://\[fd").unwrap(),
        Regex::new(r"^https?://\[fe80").unwrap(),
        // Cloud metadata endpoints
        Regex::new(r"^https?://metadata\.").unwrap(),
    ]
});

/// Hosts a video URL may point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedHosts {
    /// No host checks at all. Meant for local mirrors and tests.
    Any,
    /// Listed hosts and their subdomains.
    Only(HashSet<String>),
}

impl AllowedHosts {
    /// Build from a configured list; a `*` entry allows any host.
    pub fn from_list(hosts: &[String]) -> Self {
        if hosts.iter().any(|h| h == "*") {
            return Self::Any;
        }
        Self::Only(hosts.iter().map(|h| h.to_lowercase()).collect())
    }

    /// Check if a host or any of its parent domains is allowed.
    pub fn allows(&self, host: &str) -> bool {
        let hosts = match self {
            Self::Any => return true,
            Self::Only(hosts) => hosts,
        };

        let mut candidate = host;
        loop {
            if hosts.contains(candidate) {
                return true;
            }
            match candidate.split_once('.') {
                Some((_, parent)) if parent.contains('.') => candidate = parent,
                _ => return false,
            }
        }
    }
}

/// Result of URL validation.
#[derive(Debug)]
pub enum UrlValidationResult {
    /// URL is valid and allowed.
    Valid(String),
    /// URL is malformed or uses an unsupported protocol.
    Invalid(String),
    /// URL host is not allowed.
    HostNotAllowed(String),
    /// URL matches a blocked pattern (e.g., internal IPs).
    Blocked(String),
    /// URL exceeds maximum length.
    TooLong,
}

impl UrlValidationResult {
    /// Convert to Result for easy error handling.
    pub fn into_result(self) -> Result<String, String> {
        match self {
            Self::Valid(url) => Ok(url),
            Self::Invalid(msg) => Err(msg),
            Self::HostNotAllowed(host) => Err(format!("Host '{}' is not allowed", host)),
            Self::Blocked(reason) => Err(reason),
            Self::TooLong => Err(format!(
                "URL exceeds maximum length of {} characters",
                MAX_URL_LENGTH
            )),
        }
    }
}

/// Validate a video URL against the allowed hosts.
pub fn validate_video_url(url: &str, allowed: &AllowedHosts) -> UrlValidationResult {
    if url.len() > MAX_URL_LENGTH {
        return UrlValidationResult::TooLong;
    }

    let url = url.trim();
    if url.is_empty() {
        return UrlValidationResult::Invalid("URL cannot be empty".to_string());
    }

    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(e) => return UrlValidationResult::Invalid(format!("Invalid URL format: {}", e)),
    };

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return UrlValidationResult::Invalid(format!(
                "Invalid protocol '{}'. Only HTTP and HTTPS are allowed.",
                scheme
            ))
        }
    }

    let host = match parsed.host_str() {
        Some(h) => h.to_lowercase(),
        None => return UrlValidationResult::Invalid("URL must have a valid host".to_string()),
    };

    if *allowed == AllowedHosts::Any {
        return UrlValidationResult::Valid(url.to_string());
    }

    if BLOCKED_PATTERNS.iter().any(|p| p.is_match(url)) {
        warn!(url = %url, "Blocked URL pattern detected");
        return UrlValidationResult::Blocked(
            "URL appears to target an internal or restricted endpoint".to_string(),
        );
    }

    if !allowed.allows(&host) {
        return UrlValidationResult::HostNotAllowed(host);
    }

    UrlValidationResult::Valid(url.to_string())
}
