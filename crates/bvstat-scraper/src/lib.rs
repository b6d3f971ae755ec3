//! Bilibili scraper.
//!
//! This crate provides:
//! - Single-capture pattern extraction over raw page text
//! - Video page metadata parsing
//! - Best-effort paginated comment collection
//! - Barrage (danmaku) file collection
//!
//! Every upstream markup assumption lives in [`patterns`], so a layout
//! change on the platform is fixed in one place.

pub mod barrage;
pub mod client;
pub mod comments;
pub mod config;
pub mod error;
pub mod metadata;
pub mod pattern;
pub mod patterns;

pub use barrage::parse_barrage;
pub use client::BiliClient;
pub use comments::decode_comment_page;
pub use config::ScraperConfig;
pub use error::{ScrapeError, ScrapeResult};
pub use metadata::{parse_metadata, SOURCE_UTC_OFFSET_HOURS};
pub use pattern::{extract, extract_all};
