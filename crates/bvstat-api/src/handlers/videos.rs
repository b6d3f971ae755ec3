//! Video statistics and word cloud handlers.
//!
//! All three endpoints take a form-encoded body with a `video_url` field.
//! Metadata is always fetched first; the word cloud endpoints then collect
//! one corpus and render it on the blocking pool.

use axum::body::Body;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use bvstat_models::{ScrapeOptions, VideoMetadata};

use crate::error::{ApiError, ApiResult, NO_VIDEO_URL};
use crate::security::validate_video_url;
use crate::state::AppState;

/// Form body shared by every video endpoint.
#[derive(Debug, Deserialize)]
pub struct VideoForm {
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Metadata response, `{"status": 200, "info": {...}}`.
#[derive(Debug, Serialize)]
pub struct VideoInfoResponse {
    pub status: u16,
    pub info: VideoInfo,
}

/// Video statistics under their wire names.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub view_count: u64,
    pub danmu_count: u64,
    pub like_count: u64,
    pub coin_count: u64,
    pub collection_count: u64,
    pub share_count: u64,
    pub uploader: String,
    /// UTC epoch milliseconds
    pub release_time: i64,
    pub comment_count: u64,
    pub title: String,
}

impl From<VideoMetadata> for VideoInfo {
    fn from(meta: VideoMetadata) -> Self {
        Self {
            view_count: meta.view_count,
            danmu_count: meta.barrage_count,
            like_count: meta.like_count,
            coin_count: meta.coin_count,
            collection_count: meta.collection_count,
            share_count: meta.share_count,
            comment_count: meta.comment_count_or_default(),
            title: meta.title.unwrap_or_default(),
            uploader: meta.uploader_name,
            release_time: meta.release_time_millis,
        }
    }
}

/// Pull a validated `video_url` out of the form.
fn video_url(state: &AppState, form: Result<Form<VideoForm>, FormRejection>) -> ApiResult<String> {
    let url = match form {
        Ok(Form(form)) => form.video_url,
        Err(e) => {
            warn!(error = %e, "Unreadable form body");
            None
        }
    };

    let url = url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request(NO_VIDEO_URL))?;

    validate_video_url(&url, &state.allowed_hosts)
        .into_result()
        .map_err(ApiError::BadRequest)
}

/// Scrape the public statistics of a video.
pub async fn get_bilibili_data(
    State(state): State<AppState>,
    form: Result<Form<VideoForm>, FormRejection>,
) -> ApiResult<Json<VideoInfoResponse>> {
    let url = video_url(&state, form)?;
    let metadata = state.client.fetch_metadata(&url).await?;

    Ok(Json(VideoInfoResponse {
        status: StatusCode::OK.as_u16(),
        info: metadata.into(),
    }))
}

/// Render a word cloud of the video's comments.
pub async fn generate_comment_wordcloud(
    State(state): State<AppState>,
    form: Result<Form<VideoForm>, FormRejection>,
) -> ApiResult<Response> {
    let url = video_url(&state, form)?;
    let snapshot = state
        .client
        .snapshot(&url, ScrapeOptions::with_comments())
        .await?;
    let comments = snapshot.comments.unwrap_or_default();

    info!(
        content_id = %snapshot.metadata.content_id,
        comments = comments.len(),
        "Rendering comment word cloud"
    );
    render_png(&state, comments.into_inner(), "comment_wordcloud.png").await
}

/// Render a word cloud of the video's barrage captions.
pub async fn generate_barrage_wordcloud(
    State(state): State<AppState>,
    form: Result<Form<VideoForm>, FormRejection>,
) -> ApiResult<Response> {
    let url = video_url(&state, form)?;
    let snapshot = state
        .client
        .snapshot(&url, ScrapeOptions::with_barrage())
        .await?;
    let barrage = snapshot.barrage.unwrap_or_default();

    info!(
        section_id = %snapshot.metadata.section_id,
        captions = barrage.len(),
        "Rendering barrage word cloud"
    );
    render_png(&state, barrage.into_inner(), "barrage_wordcloud.png").await
}

/// Render on the blocking pool and wrap the PNG as an attachment.
async fn render_png(state: &AppState, fragments: Vec<String>, filename: &str) -> ApiResult<Response> {
    let renderer = state.renderer.clone();
    let image = tokio::task::spawn_blocking(move || renderer.render_default(&fragments))
        .await
        .map_err(|e| ApiError::internal(format!("Render task failed: {}", e)))??;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .header(header::CONTENT_LENGTH, image.png.len())
        .body(Body::from(image.png))
        .map_err(|e| ApiError::internal(format!("Failed to build response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bvstat_models::{ContentId, SectionId};

    #[test]
    fn test_video_info_wire_names() {
        let meta = VideoMetadata {
            content_id: ContentId(1),
            section_id: SectionId(2),
            view_count: 10,
            barrage_count: 11,
            like_count: 12,
            coin_count: 13,
            collection_count: 14,
            share_count: 15,
            uploader_name: "up".to_string(),
            release_time_millis: 1_672_545_600_000,
            comment_count: None,
            title: None,
        };
        let body = serde_json::to_value(VideoInfoResponse {
            status: 200,
            info: meta.into(),
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "status": 200,
                "info": {
                    "viewCount": 10,
                    "danmuCount": 11,
                    "likeCount": 12,
                    "coinCount": 13,
                    "collectionCount": 14,
                    "shareCount": 15,
                    "uploader": "up",
                    "releaseTime": 1_672_545_600_000_i64,
                    "commentCount": 0,
                    "title": ""
                }
            })
        );
    }
}
