//! Word cloud renderer.

use std::sync::Arc;
use std::time::Instant;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgb, RgbImage};
use metrics::{counter, histogram};
use tracing::{debug, info};

use crate::config::CloudConfig;
use crate::corpus::assemble_corpus;
use crate::error::{CloudError, CloudResult};
use crate::frequency::weigh_words;
use crate::glyphs::{FontGlyphs, GlyphBackend};
use crate::layout::{layout_words, LayoutOptions, PlacedWord};
use crate::stopwords::StopWords;
use crate::tokenize::Tokenizer;

const WORDCLOUDS_RENDERED_TOTAL: &str = "bvstat_wordclouds_rendered_total";
const WORDCLOUD_RENDER_DURATION: &str = "bvstat_wordcloud_render_duration_seconds";

/// Viridis anchors, dark to light. Higher-ranked words get darker colours.
const PALETTE: [[u8; 3]; 5] = [
    [0x44, 0x01, 0x54],
    [0x3b, 0x52, 0x8b],
    [0x21, 0x91, 0x8c],
    [0x5e, 0xc9, 0x62],
    [0xfd, 0xe7, 0x25],
];

/// A rendered word cloud.
#[derive(Debug, Clone)]
pub struct WordCloudImage {
    /// PNG-encoded image
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Words in placement order
    pub words: Vec<PlacedWord>,
}

/// Renders text fragments into a PNG word cloud.
///
/// Holds the glyph backend, the jieba dictionary and the default stop words.
/// Built once per process and shared; rendering is CPU bound and should run
/// on a blocking thread.
pub struct WordCloudRenderer {
    config: CloudConfig,
    glyphs: Arc<dyn GlyphBackend>,
    tokenizer: Tokenizer,
    stop_words: StopWords,
}

impl WordCloudRenderer {
    /// Create a renderer with the given glyph backend.
    ///
    /// Loads the extra stop-word file when the config names one.
    pub fn new(config: CloudConfig, glyphs: Arc<dyn GlyphBackend>) -> CloudResult<Self> {
        let stop_words = match &config.stopwords_path {
            Some(path) => StopWords::defaults_with_file(path)?,
            None => StopWords::defaults(),
        };

        Ok(Self {
            config,
            glyphs,
            tokenizer: Tokenizer::new(),
            stop_words,
        })
    }

    /// Create a renderer drawing with the TrueType font named in the config.
    pub fn from_config(config: CloudConfig) -> CloudResult<Self> {
        let glyphs = FontGlyphs::from_path(&config.font_path)?;
        Self::new(config, Arc::new(glyphs))
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// Stop words loaded at construction.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Render with the stop words loaded at construction.
    pub fn render_default<S: AsRef<str>>(&self, fragments: &[S]) -> CloudResult<WordCloudImage> {
        self.render(fragments, &self.stop_words)
    }

    /// Render `fragments` into a PNG word cloud.
    ///
    /// Fragments made only of stop words, numbers or single characters are
    /// skipped; the rest are joined with the configured separator.
    pub fn render<S: AsRef<str>>(
        &self,
        fragments: &[S],
        stop_words: &StopWords,
    ) -> CloudResult<WordCloudImage> {
        let start = Instant::now();

        if fragments.iter().all(|f| f.as_ref().trim().is_empty()) {
            return Err(CloudError::EmptyCorpus);
        }

        // Fragments with no surviving word are dropped before joining so
        // they cannot fuse with a neighbour into a new token.
        let mut dropped = 0;
        let kept: Vec<&str> = fragments
            .iter()
            .map(|f| f.as_ref())
            .filter(|fragment| {
                let (words, filtered) = self.tokenizer.words(fragment, stop_words);
                if words.is_empty() {
                    dropped += filtered;
                }
                !words.is_empty()
            })
            .collect();

        let corpus = assemble_corpus(&kept, &self.config.fragment_separator);
        let (tokens, filtered) = self.tokenizer.words(&corpus, stop_words);
        let frequencies = weigh_words(tokens, self.config.max_words);
        if frequencies.is_empty() {
            return Err(CloudError::NoWords {
                filtered: filtered + dropped,
            });
        }
        debug!(
            fragments = fragments.len(),
            dropped_fragments = fragments.len() - kept.len(),
            distinct = frequencies.len(),
            filtered,
            "Weighed corpus"
        );

        let options = LayoutOptions::from(&self.config);
        let placed = layout_words(&frequencies, self.glyphs.as_ref(), &options);
        if placed.is_empty() {
            return Err(CloudError::NothingPlaced {
                width: self.config.width,
                height: self.config.height,
            });
        }

        let canvas = self.rasterize(&placed);
        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ColorType::Rgb8,
        )?;

        let elapsed = start.elapsed();
        counter!(WORDCLOUDS_RENDERED_TOTAL).increment(1);
        histogram!(WORDCLOUD_RENDER_DURATION).record(elapsed.as_secs_f64());
        info!(
            words = placed.len(),
            bytes = png.len(),
            duration_ms = elapsed.as_millis() as u64,
            "Rendered word cloud"
        );

        Ok(WordCloudImage {
            png,
            width: self.config.width,
            height: self.config.height,
            words: placed,
        })
    }

    fn rasterize(&self, placed: &[PlacedWord]) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(
            self.config.width,
            self.config.height,
            Rgb(self.config.background),
        );
        let last_rank = placed.iter().map(|w| w.rank).max().unwrap_or(0);

        for word in placed {
            self.glyphs.draw(
                &mut canvas,
                &word.word,
                word.x as i32,
                word.y as i32,
                word.font_size,
                rank_colour(word.rank, last_rank),
            );
        }
        canvas
    }
}

impl std::fmt::Debug for WordCloudRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordCloudRenderer")
            .field("config", &self.config)
            .field("stop_words", &self.stop_words.len())
            .finish_non_exhaustive()
    }
}

/// Colour for `rank` along the palette, where `last_rank` maps to its end.
fn rank_colour(rank: usize, last_rank: usize) -> Rgb<u8> {
    let t = if last_rank == 0 {
        0.0
    } else {
        rank as f32 / last_rank as f32
    };
    let scaled = t.clamp(0.0, 1.0) * (PALETTE.len() - 1) as f32;
    let lower = (scaled.floor() as usize).min(PALETTE.len() - 2);
    let frac = scaled - lower as f32;

    let (a, b) = (PALETTE[lower], PALETTE[lower + 1]);
    let mix = |i: usize| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * frac).round() as u8;
    Rgb([mix(0), mix(1), mix(2)])
}
