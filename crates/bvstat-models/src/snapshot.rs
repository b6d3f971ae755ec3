//! Result of scraping one video.

use serde::{Deserialize, Serialize};

use crate::corpus::{BarrageCorpus, CommentCorpus};
use crate::video::VideoMetadata;

/// Which optional collectors run after the metadata parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeOptions {
    /// Collect paginated comments
    #[serde(default)]
    pub comments: bool,
    /// Collect the barrage file
    #[serde(default)]
    pub barrage: bool,
}

impl ScrapeOptions {
    /// Metadata only.
    pub fn metadata_only() -> Self {
        Self::default()
    }

    pub fn with_comments() -> Self {
        Self {
            comments: true,
            barrage: false,
        }
    }

    pub fn with_barrage() -> Self {
        Self {
            comments: false,
            barrage: true,
        }
    }
}

/// Metadata plus whichever corpora were requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSnapshot {
    pub metadata: VideoMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<CommentCorpus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barrage: Option<BarrageCorpus>,
}
