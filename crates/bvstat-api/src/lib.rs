//! Axum HTTP API server.
//!
//! This crate provides:
//! - Video statistics scraped from a Bilibili video page
//! - Comment and barrage word clouds as PNG attachments
//! - Video URL validation against an allowed host list
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod security;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
