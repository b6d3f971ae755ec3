//! Word placement.
//!
//! Words are placed in frequency order. Each word starts at the size derived
//! from its weight and walks an Archimedean spiral out from the canvas
//! centre until its box is free. If the spiral runs off the canvas the word
//! shrinks by one step and tries again. Once a word would drop below the
//! minimum size, layout ends.
//!
//! Free space is tracked on a coarse grid with a summed-area table so each
//! candidate position is checked in constant time.

use tracing::debug;

use crate::config::CloudConfig;
use crate::frequency::WordFrequency;
use crate::glyphs::GlyphBackend;

/// Side of an occupancy cell in pixels.
const CELL: u32 = 4;

/// Layout parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub width: u32,
    pub height: u32,
    pub max_font_size: f32,
    pub min_font_size: f32,
    pub font_step: f32,
    pub relative_scaling: f32,
    pub margin: u32,
}

impl From<&CloudConfig> for LayoutOptions {
    fn from(config: &CloudConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            max_font_size: config.max_font_size,
            min_font_size: config.min_font_size,
            font_step: config.font_step,
            relative_scaling: config.relative_scaling,
            margin: config.margin,
        }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::from(&CloudConfig::default())
    }
}

/// A word with its final size and position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub font_size: f32,
    /// Left edge of the text in pixels
    pub x: u32,
    /// Top edge of the text in pixels
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in the frequency ranking, 0 for the most frequent word
    pub rank: usize,
}

/// Place `words` (most frequent first) on the canvas.
///
/// Words that would need a size below the minimum are dropped, along with
/// everything after them.
pub fn layout_words(
    words: &[WordFrequency],
    glyphs: &dyn GlyphBackend,
    options: &LayoutOptions,
) -> Vec<PlacedWord> {
    let mut grid = Occupancy::new(options.width / CELL, options.height / CELL);
    let mut placed = Vec::new();

    let rs = options.relative_scaling;
    let mut font_size = options.max_font_size;
    let mut last_weight = 1.0_f32;

    for (rank, entry) in words.iter().enumerate() {
        if rank > 0 && rs != 0.0 {
            font_size = ((rs * entry.weight / last_weight + (1.0 - rs)) * font_size).round();
        }

        let mut slot = None;
        while font_size >= options.min_font_size {
            let (w, h) = glyphs.measure(&entry.word, font_size);
            if w > 0 && h > 0 {
                let cells_w = (w + 2 * options.margin).div_ceil(CELL) as usize;
                let cells_h = (h + 2 * options.margin).div_ceil(CELL) as usize;
                if let Some((cx, cy)) = grid.find_slot(cells_w, cells_h) {
                    slot = Some((cx, cy, cells_w, cells_h, w, h));
                    break;
                }
            }
            font_size -= options.font_step;
        }

        let Some((cx, cy, cells_w, cells_h, w, h)) = slot else {
            debug!(word = %entry.word, rank, "Word does not fit, stopping layout");
            break;
        };

        grid.occupy(cx, cy, cells_w, cells_h);
        placed.push(PlacedWord {
            word: entry.word.clone(),
            font_size,
            x: cx as u32 * CELL + options.margin,
            y: cy as u32 * CELL + options.margin,
            width: w,
            height: h,
            rank,
        });
        last_weight = entry.weight;
    }

    placed
}

/// Cell occupancy with a summed-area table.
struct Occupancy {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
    /// `(rows + 1) x (cols + 1)` prefix sums of occupied cells
    integral: Vec<u32>,
    used: usize,
}

impl Occupancy {
    fn new(cols: u32, rows: u32) -> Self {
        let (cols, rows) = (cols as usize, rows as usize);
        Self {
            cols,
            rows,
            cells: vec![false; cols * rows],
            integral: vec![0; (cols + 1) * (rows + 1)],
            used: 0,
        }
    }

    fn at(&self, x: usize, y: usize) -> u32 {
        self.integral[y * (self.cols + 1) + x]
    }

    fn is_free(&self, x: usize, y: usize, w: usize, h: usize) -> bool {
        self.at(x + w, y + h) + self.at(x, y) == self.at(x + w, y) + self.at(x, y + h)
    }

    /// Top-left cell of the first free `w` x `h` box along the spiral.
    fn find_slot(&self, w: usize, h: usize) -> Option<(usize, usize)> {
        if w > self.cols || h > self.rows || w * h > self.cols * self.rows - self.used {
            return None;
        }

        let origin_x = ((self.cols - w) / 2) as i64;
        let origin_y = ((self.rows - h) / 2) as i64;
        let max_x = (self.cols - w) as i64;
        let max_y = (self.rows - h) as i64;

        spiral(self.cols, self.rows)
            .map(|(dx, dy)| (origin_x + dx, origin_y + dy))
            .filter(|&(x, y)| x >= 0 && y >= 0 && x <= max_x && y <= max_y)
            .map(|(x, y)| (x as usize, y as usize))
            .find(|&(x, y)| self.is_free(x, y, w, h))
    }

    fn occupy(&mut self, x: usize, y: usize, w: usize, h: usize) {
        for row in y..y + h {
            for col in x..x + w {
                let cell = &mut self.cells[row * self.cols + col];
                if !*cell {
                    *cell = true;
                    self.used += 1;
                }
            }
        }

        // prefix sums only change below and right of the box
        let stride = self.cols + 1;
        for row in y..self.rows {
            let mut row_sum = 0;
            for col in 0..self.cols {
                row_sum += self.cells[row * self.cols + col] as u32;
                self.integral[(row + 1) * stride + col + 1] =
                    self.integral[row * stride + col + 1] + row_sum;
            }
        }
    }
}

/// Integer offsets along an Archimedean spiral, stretched horizontally to the
/// grid's aspect ratio, until the spiral covers the whole grid.
fn spiral(cols: usize, rows: usize) -> impl Iterator<Item = (i64, i64)> {
    let aspect = if rows == 0 { 1.0 } else { cols as f32 / rows as f32 };
    let max_radius = rows as f32 / 2.0 * std::f32::consts::SQRT_2 + 1.0;
    let mut t = 0.0_f32;
    let mut last = None;

    std::iter::from_fn(move || loop {
        let r = t / std::f32::consts::TAU;
        if r > max_radius {
            return None;
        }
        let point = (
            (r * aspect * t.cos()).round() as i64,
            (r * t.sin()).round() as i64,
        );
        // one cell outward per turn, at most one cell of arc per step
        t += 1.0 / (r * aspect.max(1.0)).max(1.0);
        if last != Some(point) {
            last = Some(point);
            return Some(point);
        }
    })
}
