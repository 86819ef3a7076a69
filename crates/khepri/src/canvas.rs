//! Half-block pixel canvas backing the terminal surface.

use khepri_background::{Rgba, Surface};
use khepri_core::{GRID_STEP, Rgb};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '▀';

/// A pixel buffer where one canvas pixel covers one LED grid step.
///
/// Every terminal cell shows two canvas pixels stacked vertically.
#[derive(Debug, Clone, Default)]
pub struct PixelCanvas {
    /// Surface size in engine pixels.
    width: u32,
    height: u32,
    /// Canvas pixels, row-major, `columns * rows` long.
    pixels: Vec<[f32; 3]>,
    columns: usize,
    rows: usize,
}

impl PixelCanvas {
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Color of the canvas pixel at `col`, `row`.
    pub fn pixel(&self, col: usize, row: usize) -> Option<Rgb> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        let [r, g, b] = self.pixels[row * self.columns + col];
        Some(Rgb::new(r.round() as u8, g.round() as u8, b.round() as u8))
    }

    /// Canvas pixel span touched by `[start, start + len)` engine pixels.
    fn span(start: f32, len: f32, limit: usize) -> std::ops::Range<usize> {
        let step = GRID_STEP as f32;
        let first = ((start / step).floor().max(0.0) as usize).min(limit);
        let last = ((start + len) / step).ceil().max(0.0) as usize;
        first..last.clamp(first, limit)
    }

    fn for_each_in_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        mut f: impl FnMut(&mut [f32; 3]),
    ) {
        let cols = Self::span(x, w, self.columns);
        let rows = Self::span(y, h, self.rows);
        for row in rows {
            let start = row * self.columns;
            for pixel in &mut self.pixels[start + cols.start..start + cols.end] {
                f(pixel);
            }
        }
    }
}

impl Surface for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.columns = (width / GRID_STEP) as usize;
        self.rows = (height / GRID_STEP) as usize;
        self.pixels = vec![[0.0; 3]; self.columns * self.rows];
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.for_each_in_rect(x, y, width, height, |pixel| *pixel = [0.0; 3]);
    }

    /// Source-over blend of `color` onto every touched pixel.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        let a = color.alpha;
        let src = [color.rgb.r as f32, color.rgb.g as f32, color.rgb.b as f32];
        self.for_each_in_rect(x, y, width, height, |pixel| {
            for (dst, src) in pixel.iter_mut().zip(src) {
                *dst = src * a + *dst * (1.0 - a);
            }
        });
    }
}

impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area
            .width
            .min(u16::try_from(self.columns()).unwrap_or(u16::MAX));
        let height = area
            .height
            .min(u16::try_from(self.rows().div_ceil(2)).unwrap_or(u16::MAX));
        for y in 0..height {
            for x in 0..width {
                let (col, row) = (x as usize, y as usize * 2);
                let Some(top) = self.pixel(col, row) else {
                    continue;
                };
                let bottom = self.pixel(col, row + 1).unwrap_or(top);
                if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                    cell.set_char(HALF_BLOCK)
                        .set_fg(Color::Rgb(top.r, top.g, top.b))
                        .set_bg(Color::Rgb(bottom.r, bottom.g, bottom.b));
                }
            }
        }
    }
}
