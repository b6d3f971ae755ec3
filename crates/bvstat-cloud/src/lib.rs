//! Word cloud rendering.
//!
//! Turns a list of text fragments into a PNG where each word's size follows
//! its frequency:
//! - corpus assembly and CJK-aware tokenization (jieba)
//! - stop-word filtering and frequency weighting
//! - spiral layout over an occupancy grid
//! - rasterization through a [`GlyphBackend`] and PNG encoding
//!
//! Layout and colouring are deterministic: the same corpus, configuration and
//! font always produce the same bytes.

pub mod config;
pub mod corpus;
pub mod error;
pub mod frequency;
pub mod glyphs;
pub mod layout;
pub mod render;
pub mod stopwords;
pub mod tokenize;

pub use config::CloudConfig;
pub use corpus::assemble_corpus;
pub use error::{CloudError, CloudResult};
pub use frequency::{weigh_words, WordFrequency};
pub use glyphs::{BlockGlyphs, FontGlyphs, GlyphBackend};
pub use layout::{layout_words, LayoutOptions, PlacedWord};
pub use render::{WordCloudImage, WordCloudRenderer};
pub use stopwords::StopWords;
pub use tokenize::Tokenizer;
