//! Collector tests against a mock upstream.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bvstat_models::{ContentId, ScrapeOptions, SectionId};
use bvstat_scraper::{BiliClient, ScraperConfig};

const VIDEO_PAGE: &str = include_str!("fixtures/video_page.html");
const BARRAGE_XML: &str = include_str!("fixtures/barrage.xml");

fn client_for(server: &MockServer) -> BiliClient {
    let config = ScraperConfig::default().with_base_url(&server.uri());
    BiliClient::new(config).unwrap()
}

fn reply_page(messages: &[&str]) -> serde_json::Value {
    let replies: Vec<_> = messages
        .iter()
        .map(|m| json!({ "rpid": 1, "content": { "message": m } }))
        .collect();
    json!({ "code": 0, "message": "0", "data": { "replies": replies } })
}

async fn mount_page(server: &MockServer, page: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/x/v2/reply"))
        .and(query_param("pn", page))
        .and(query_param("oid", "170001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_comments_stop_at_first_failed_page() {
    let server = MockServer::start().await;
    mount_page(&server, "1", reply_page(&["第一条", "second", "第一条"])).await;

    Mock::given(method("GET"))
        .and(path("/x/v2/reply"))
        .and(query_param("pn", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/x/v2/reply"))
        .and(query_param("pn", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_page(&["never"])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let corpus = client.collect_comments(ContentId(170001), 3).await;

    assert_eq!(corpus.as_slice(), ["第一条", "second", "第一条"]);
}

#[tokio::test]
async fn test_comments_stop_on_undecodable_page() {
    let server = MockServer::start().await;
    mount_page(&server, "1", reply_page(&["a"])).await;
    mount_page(&server, "2", json!({ "code": 0, "data": { "replies": null } })).await;
    mount_page(&server, "3", reply_page(&["c"])).await;

    let client = client_for(&server);
    let corpus = client.collect_comments(ContentId(170001), 3).await;

    assert_eq!(corpus.as_slice(), ["a"]);
}

#[tokio::test]
async fn test_comments_respect_page_cap() {
    let server = MockServer::start().await;
    mount_page(&server, "1", reply_page(&["a"])).await;
    mount_page(&server, "2", reply_page(&["b", "c"])).await;

    Mock::given(method("GET"))
        .and(path("/x/v2/reply"))
        .and(query_param("pn", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_page(&["d"])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let corpus = client.collect_comments(ContentId(170001), 2).await;

    assert_eq!(corpus.as_slice(), ["a", "b", "c"]);
}

#[tokio::test]
async fn test_comments_continue_past_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, "1", reply_page(&[])).await;
    mount_page(&server, "2", reply_page(&["late"])).await;

    let client = client_for(&server);
    let corpus = client.collect_comments(ContentId(170001), 2).await;

    assert_eq!(corpus.as_slice(), ["late"]);
}

#[tokio::test]
async fn test_comments_zero_pages_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_page(&["x"])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let corpus = client.collect_comments(ContentId(170001), 0).await;

    assert!(corpus.is_empty());
}

#[tokio::test]
async fn test_comments_unreachable_upstream_returns_empty() {
    let config = ScraperConfig::default().with_base_url("http://127.0.0.1:9");
    let client = BiliClient::new(config).unwrap();

    let corpus = client.collect_comments(ContentId(1), 5).await;
    assert!(corpus.is_empty());
}

#[tokio::test]
async fn test_barrage_collected_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/279786.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BARRAGE_XML))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let corpus = client.collect_barrage(SectionId(279786)).await.unwrap();

    assert_eq!(corpus.as_slice(), ["前方高能", "awsl", "名场面"]);
}

#[tokio::test]
async fn test_barrage_failure_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/279786.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.collect_barrage(SectionId(279786)).await.unwrap_err();

    assert!(err.is_network());
}

#[tokio::test]
async fn test_fetch_metadata_tolerates_invalid_utf8() {
    let server = MockServer::start().await;
    let mut body = b"\xff\xfe".to_vec();
    body.extend_from_slice(VIDEO_PAGE.as_bytes());
    body.extend_from_slice(b"\xc3\x28");
    Mock::given(method("GET"))
        .and(path("/video/BV17x411w7KC"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let url = format!("{}/video/BV17x411w7KC", server.uri());
    let meta = client.fetch_metadata(&url).await.unwrap();

    assert_eq!(meta.content_id, ContentId(170001));
    assert_eq!(meta.title.as_deref(), Some("【官方MV】示例视频"));
}

#[tokio::test]
async fn test_fetch_metadata_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video/BV17x411w7KC"))
        .and(header("user-agent", "bvstat-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(VIDEO_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let config = ScraperConfig {
        user_agent: "bvstat-test/1.0".to_string(),
        ..ScraperConfig::default().with_base_url(&server.uri())
    };
    let client = BiliClient::new(config).unwrap();
    let url = format!("{}/video/BV17x411w7KC", server.uri());
    let meta = client.fetch_metadata(&url).await.unwrap();

    assert_eq!(meta.content_id, ContentId(170001));
    assert_eq!(meta.section_id, SectionId(279786));
    assert_eq!(meta.view_count, 2_345_678);
    assert_eq!(meta.barrage_count, 34_567);
    assert_eq!(meta.like_count, 456_789);
    assert_eq!(meta.coin_count, 56_789);
    assert_eq!(meta.collection_count, 67_890);
    assert_eq!(meta.share_count, 7_890);
    assert_eq!(meta.uploader_name, "示例UP主");
    assert_eq!(meta.release_time_millis, 1_672_545_600_000);
    assert_eq!(meta.comment_count, Some(4321));
    assert_eq!(meta.title.as_deref(), Some("【官方MV】示例视频"));
}

#[tokio::test]
async fn test_snapshot_runs_requested_collectors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video/BV17x411w7KC"))
        .respond_with(ResponseTemplate::new(200).set_body_string(VIDEO_PAGE))
        .mount(&server)
        .await;
    mount_page(&server, "1", reply_page(&["好活", "当赏"])).await;
    Mock::given(method("GET"))
        .and(path("/x/v2/reply"))
        .and(query_param("pn", "2"))
        .respond_with(ResponseTemplate::new(412))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/279786.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BARRAGE_XML))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let url = format!("{}/video/BV17x411w7KC", server.uri());

    let only_meta = client.snapshot(&url, ScrapeOptions::metadata_only()).await.unwrap();
    assert!(only_meta.comments.is_none());
    assert!(only_meta.barrage.is_none());

    let options = ScrapeOptions {
        comments: true,
        barrage: true,
    };
    let snapshot = client.snapshot(&url, options).await.unwrap();
    assert_eq!(snapshot.comments.unwrap().as_slice(), ["好活", "当赏"]);
    assert_eq!(snapshot.barrage.unwrap().len(), 3);
}

#[tokio::test]
async fn test_snapshot_fails_on_unparseable_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let url = format!("{}/video/broken", server.uri());
    let err = client
        .snapshot(&url, ScrapeOptions::with_comments())
        .await
        .unwrap_err();

    assert!(err.is_parse());
}
