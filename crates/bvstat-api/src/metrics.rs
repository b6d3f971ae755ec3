//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
///
/// Comment page and word cloud counters are recorded by the scraper and
/// renderer crates under `bvstat_comment_pages_total`,
/// `bvstat_wordclouds_rendered_total` and
/// `bvstat_wordcloud_render_duration_seconds`.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "bvstat_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "bvstat_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "bvstat_http_requests_in_flight";
}

/// Paths reported as their own label value; anything else is `other`.
const KNOWN_PATHS: &[&str] = &[
    "/get_bilibili_data",
    "/generate_comment_wordcloud",
    "/generate_barrage_wordcloud",
    "/health",
    "/healthz",
    "/metrics",
];

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path_label(path).to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Label for `path`; unknown paths collapse to `other`.
fn path_label(path: &str) -> &str {
    KNOWN_PATHS
        .iter()
        .find(|known| **known == path)
        .copied()
        .unwrap_or("other")
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_label() {
        assert_eq!(path_label("/get_bilibili_data"), "/get_bilibili_data");
        assert_eq!(path_label("/healthz"), "/healthz");
        assert_eq!(path_label("/wp-admin/setup.php"), "other");
    }
}
