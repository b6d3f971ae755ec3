//! Shared data models for bvstat.
//!
//! This crate provides Serde-serializable types for:
//! - Video metadata scraped from a Bilibili video page
//! - Comment and barrage (danmaku) text corpora
//! - Scrape options and the combined snapshot of one scrape

pub mod corpus;
pub mod snapshot;
pub mod video;

// Re-export common types
pub use corpus::{BarrageCorpus, CommentCorpus};
pub use snapshot::{ScrapeOptions, VideoSnapshot};
pub use video::{ContentId, SectionId, VideoMetadata};
