//! Renderer error types.

use std::path::PathBuf;

use thiserror::Error;

pub type CloudResult<T> = Result<T, CloudError>;

#[derive(Debug, Error)]
pub enum CloudError {
    /// No fragments, or only whitespace.
    #[error("Corpus is empty")]
    EmptyCorpus,

    /// Text was present but every token was filtered out.
    #[error("No words left to plot after filtering {filtered} tokens")]
    NoWords { filtered: usize },

    /// Not even the most frequent word fits on the canvas.
    #[error("No word fits on a {width}x{height} canvas")]
    NothingPlaced { width: u32, height: u32 },

    #[error("Failed to load font {}: {message}", .path.display())]
    Font { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

impl CloudError {
    /// The input had nothing to draw, as opposed to a renderer failure.
    pub fn is_empty_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyCorpus | Self::NoWords { .. } | Self::NothingPlaced { .. }
        )
    }
}
