//! Renderer configuration.

use std::path::PathBuf;

/// Canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 1920;

/// Canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 1080;

/// Word cloud renderer configuration.
///
/// Canvas size and background are fixed per process, never per request.
#[derive(Debug, Clone)]
pub struct CloudConfig {
    /// Canvas width
    pub width: u32,
    /// Canvas height
    pub height: u32,
    /// Background colour (RGB)
    pub background: [u8; 3],
    /// TrueType font able to draw the corpus script
    pub font_path: PathBuf,
    /// Optional newline-separated file of extra stop words
    pub stopwords_path: Option<PathBuf>,
    /// Most frequent words kept for layout
    pub max_words: usize,
    /// Size of the first (most frequent) word
    pub max_font_size: f32,
    /// Layout stops once a word would need to be smaller than this
    pub min_font_size: f32,
    /// Size decrement when a word does not fit
    pub font_step: f32,
    /// How much relative frequency drives size (0 = rank only, 1 = linear)
    pub relative_scaling: f32,
    /// Free pixels kept around each word
    pub margin: u32,
    /// Inserted between fragments when building the corpus
    pub fragment_separator: String,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            background: [255, 255, 255],
            font_path: PathBuf::from("FZYTK.TTF"),
            stopwords_path: None,
            max_words: 200,
            max_font_size: 270.0,
            min_font_size: 8.0,
            font_step: 2.0,
            relative_scaling: 0.5,
            margin: 4,
            fragment_separator: String::new(),
        }
    }
}

impl CloudConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            font_path: std::env::var("WORDCLOUD_FONT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.font_path.clone()),
            stopwords_path: std::env::var("WORDCLOUD_STOPWORDS_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            max_words: std::env::var("WORDCLOUD_MAX_WORDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_words),
            ..defaults
        }
    }
}
