//! Glyph measurement and rasterization.

use std::path::Path;

use image::{Rgb, RgbImage};
use rusttype::{point, Font, Scale};
use tracing::info;

use crate::error::{CloudError, CloudResult};

/// Measures and draws horizontal text.
///
/// Layout only needs the bounding box of a word at a given size; drawing
/// puts the word with its top-left corner at `(x, y)`.
pub trait GlyphBackend: Send + Sync {
    /// Width and height in pixels of `text` at `font_size`.
    fn measure(&self, text: &str, font_size: f32) -> (u32, u32);

    /// Draw `text` with its bounding box's top-left corner at `(x, y)`.
    fn draw(&self, canvas: &mut RgbImage, text: &str, x: i32, y: i32, font_size: f32, color: Rgb<u8>);
}

/// TrueType glyphs.
pub struct FontGlyphs {
    font: Font<'static>,
}

impl FontGlyphs {
    /// Load a TrueType/OpenType font from disk.
    pub fn from_path(path: impl AsRef<Path>) -> CloudResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| CloudError::Font {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let glyphs = Self::from_bytes(data).ok_or_else(|| CloudError::Font {
            path: path.to_path_buf(),
            message: "not a valid TrueType font".to_string(),
        })?;

        info!(path = %path.display(), "Loaded word cloud font");
        Ok(glyphs)
    }

    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(data).map(|font| Self { font })
    }
}

impl GlyphBackend for FontGlyphs {
    fn measure(&self, text: &str, font_size: f32) -> (u32, u32) {
        let scale = Scale::uniform(font_size);
        let v_metrics = self.font.v_metrics(scale);
        let height = (v_metrics.ascent - v_metrics.descent).ceil().max(0.0) as u32;

        let width = self
            .font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .last()
            .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);

        (width.ceil().max(0.0) as u32, height)
    }

    fn draw(&self, canvas: &mut RgbImage, text: &str, x: i32, y: i32, font_size: f32, color: Rgb<u8>) {
        let scale = Scale::uniform(font_size);
        let v_metrics = self.font.v_metrics(scale);
        let origin = point(x as f32, y as f32 + v_metrics.ascent);
        let (canvas_w, canvas_h) = canvas.dimensions();

        for glyph in self.font.layout(text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px as u32 >= canvas_w || py as u32 >= canvas_h {
                    return;
                }
                let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                *pixel = blend(*pixel, color, coverage);
            });
        }
    }
}

impl std::fmt::Debug for FontGlyphs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontGlyphs").finish_non_exhaustive()
    }
}

/// Font-free glyphs that draw each word as a solid bar.
///
/// Latin characters are 0.6 em wide and CJK characters a full em. Used in
/// tests and when no font is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockGlyphs;

impl GlyphBackend for BlockGlyphs {
    fn measure(&self, text: &str, font_size: f32) -> (u32, u32) {
        // tenths of an em
        let tenths: u32 = text.chars().map(|c| if is_wide(c) { 10 } else { 6 }).sum();
        (
            (tenths as f32 * font_size / 10.0).ceil() as u32,
            font_size.ceil() as u32,
        )
    }

    fn draw(&self, canvas: &mut RgbImage, text: &str, x: i32, y: i32, font_size: f32, color: Rgb<u8>) {
        let (w, h) = self.measure(text, font_size);
        let (canvas_w, canvas_h) = canvas.dimensions();

        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x + w as i32).clamp(0, canvas_w as i32) as u32;
        let y1 = (y + h as i32).clamp(0, canvas_h as i32) as u32;

        for py in y0..y1 {
            for px in x0..x1 {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}

fn is_wide(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x115F
            | 0x2E80..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0x20000..=0x3FFFD
    )
}

fn blend(background: Rgb<u8>, foreground: Rgb<u8>, coverage: f32) -> Rgb<u8> {
    let coverage = coverage.clamp(0.0, 1.0);
    let mix = |b: u8, f: u8| (b as f32 * (1.0 - coverage) + f as f32 * coverage).round() as u8;
    Rgb([
        mix(background[0], foreground[0]),
        mix(background[1], foreground[1]),
        mix(background[2], foreground[2]),
    ])
}
