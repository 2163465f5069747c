//! RGB pixel canvas with line, rectangle and text primitives.
//!
//! All drawing is clipped to the canvas bounds, so callers may pass
//! coordinates that fall partly or wholly outside it.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::error::ChartError;
use crate::font;

/// An RGB colour.
pub type Color = Rgb<u8>;

/// White.
pub const WHITE: Color = Rgb([255, 255, 255]);
/// Black.
pub const BLACK: Color = Rgb([0, 0, 0]);
/// Light grey used for frames and legend borders.
pub const GREY: Color = Rgb([204, 204, 204]);

/// A drawable RGB image.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Colour at (`x`, `y`), or `None` outside the canvas.
    #[cfg(test)]
    pub(crate) fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let (x, y) = self.clip(x, y)?;
        Some(*self.image.get_pixel(x, y))
    }

    /// Set one pixel. Out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some((x, y)) = self.clip(x, y) {
            self.image.put_pixel(x, y, color);
        }
    }

    /// Fill a `w` x `h` rectangle whose top-left corner is (`x`, `y`).
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let x_end = x.saturating_add(w).min(self.width() as i32);
        let y_end = y.saturating_add(h).min(self.height() as i32);
        for py in y.max(0)..y_end {
            for px in x.max(0)..x_end {
                self.image.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// Outline a `w` x `h` rectangle with a 1-pixel border.
    pub fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w - 1, y, 1, h, color);
    }

    /// Draw a straight line using Bresenham's algorithm.
    ///
    /// `thickness` pixels are stamped around each point of the line.
    pub fn draw_line(
        &mut self,
        (x0, y0): (i32, i32),
        (x1, y1): (i32, i32),
        thickness: u32,
        color: Color,
    ) {
        let t = thickness.max(1) as i32;
        let half = (t - 1) / 2;

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.fill_rect(x - half, y - half, t, t, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Width in pixels of `text` drawn at `scale`.
    pub fn text_width(text: &str, scale: u32) -> u32 {
        let n = text.chars().count() as u32;
        if n == 0 {
            return 0;
        }
        (n * (font::WIDTH + font::SPACING) - font::SPACING) * scale
    }

    /// Height in pixels of a line of text drawn at `scale`.
    pub fn text_height(scale: u32) -> u32 {
        font::HEIGHT * scale
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Color) {
        self.draw_glyphs(text, scale, |canvas, tx, ty| {
            canvas.put_pixel(x + tx, y + ty, color);
        });
    }

    /// Draw `text` rotated a quarter turn counter-clockwise so that it reads
    /// bottom to top, starting at (`x`, `y_bottom`).
    pub fn draw_text_vertical(&mut self, x: i32, y_bottom: i32, text: &str, scale: u32, color: Color) {
        self.draw_glyphs(text, scale, |canvas, tx, ty| {
            canvas.put_pixel(x + ty, y_bottom - tx, color);
        });
    }

    /// Write the canvas to `path` as a PNG file.
    pub fn save_png(&self, path: &Path) -> Result<(), ChartError> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    /// Walk every set pixel of `text` in unrotated text-space coordinates.
    fn draw_glyphs(&mut self, text: &str, scale: u32, mut plot: impl FnMut(&mut Self, i32, i32)) {
        let scale = scale.max(1);
        let advance = (font::WIDTH + font::SPACING) * scale;

        for (i, ch) in text.chars().enumerate() {
            let x0 = i as u32 * advance;
            for dy in 0..font::HEIGHT {
                for dx in 0..font::WIDTH {
                    if !font::pixel(ch, dx, dy) {
                        continue;
                    }
                    for sy in 0..scale {
                        for sx in 0..scale {
                            let tx = (x0 + dx * scale + sx) as i32;
                            let ty = (dy * scale + sy) as i32;
                            plot(self, tx, ty);
                        }
                    }
                }
            }
        }
    }

    fn clip(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return None;
        }
        Some((x as u32, y as u32))
    }
}
