//! Drawing primitives
//!
//! Everything here is built on [`Canvas::draw_pixel`]. Implementors only
//! provide that one method; lines, boxes, circles, bitmaps and text come
//! for free. Coordinates are `i32` and may lie anywhere; primitives only
//! visit the part of a shape inside [`Canvas::extent`].

use core::ops::RangeInclusive;

use embedded_graphics_core::pixelcolor::BinaryColor;

use crate::font::Font;
use crate::framebuffer::{HEIGHT, WIDTH};

/// Width of the block drawn for characters a font does not cover
pub const PLACEHOLDER_WIDTH: i32 = 8;

/// Bitmap blit errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitmapError {
    /// Width or height is not a multiple of 8
    UnalignedDimensions,
    /// Source holds fewer than `width / 8 * height` bytes
    TooShort,
}

/// A 1 bit per pixel drawing surface
pub trait Canvas {
    /// Set or clear one pixel, ignoring coordinates off the surface
    fn draw_pixel(&mut self, x: i32, y: i32, color: BinaryColor);

    /// Drawable width and height
    ///
    /// Primitives never visit points outside `0..width` x `0..height`, so
    /// arbitrarily large shapes cost no more than the visible part.
    fn extent(&self) -> (i32, i32) {
        (WIDTH as i32, HEIGHT as i32)
    }

    /// Draw a horizontal line, both ends inclusive
    fn draw_line_horizontal(&mut self, x_start: i32, x_end: i32, y: i32, color: BinaryColor) {
        let (width, height) = self.extent();
        if !(0..height).contains(&y) {
            return;
        }
        let (from, to) = ordered(x_start, x_end);
        for x in from.max(0)..=to.min(width - 1) {
            self.draw_pixel(x, y, color);
        }
    }

    /// Draw a vertical line, both ends inclusive
    fn draw_line_vertical(&mut self, x: i32, y_start: i32, y_end: i32, color: BinaryColor) {
        let (width, height) = self.extent();
        if !(0..width).contains(&x) {
            return;
        }
        let (from, to) = ordered(y_start, y_end);
        for y in from.max(0)..=to.min(height - 1) {
            self.draw_pixel(x, y, color);
        }
    }

    /// Draw a rectangle outline between two opposite corners
    fn draw_box_empty(
        &mut self,
        x_start: i32,
        y_start: i32,
        x_end: i32,
        y_end: i32,
        color: BinaryColor,
    ) {
        self.draw_line_horizontal(x_start, x_end, y_start, color);
        self.draw_line_horizontal(x_start, x_end, y_end, color);
        self.draw_line_vertical(x_start, y_start, y_end, color);
        self.draw_line_vertical(x_end, y_start, y_end, color);
    }

    /// Draw a filled rectangle between two opposite corners
    fn draw_box_filled(
        &mut self,
        x_start: i32,
        y_start: i32,
        x_end: i32,
        y_end: i32,
        color: BinaryColor,
    ) {
        let (_, height) = self.extent();
        let (from, to) = ordered(y_start, y_end);
        for y in from.max(0)..=to.min(height - 1) {
            self.draw_line_horizontal(x_start, x_end, y, color);
        }
    }

    /// Draw a ring one pixel thick
    ///
    /// A point belongs to the ring when its squared distance `d` from the
    /// center satisfies `r² <= d < (r + 1)²`.
    fn draw_circle_empty(&mut self, x: i32, y: i32, radius: i32, color: BinaryColor) {
        let r = i64::from(radius);
        let (inner, outer) = (r * r, (r + 1) * (r + 1));
        let (width, height) = self.extent();

        for dy in span(y, radius, height) {
            for dx in span(x, radius, width) {
                let d = dx * dx + dy * dy;
                if d >= inner && d < outer {
                    self.draw_pixel(offset(x, dx), offset(y, dy), color);
                }
            }
        }
    }

    /// Draw a disc: every point with squared distance `<= r²`
    fn draw_circle_filled(&mut self, x: i32, y: i32, radius: i32, color: BinaryColor) {
        let r = i64::from(radius);
        let limit = r * r;
        let (width, height) = self.extent();

        for dy in span(y, radius, height) {
            for dx in span(x, radius, width) {
                if dx * dx + dy * dy <= limit {
                    self.draw_pixel(offset(x, dx), offset(y, dy), color);
                }
            }
        }
    }

    /// Blit a row-major, MSB-first bitmap
    ///
    /// Set bits are painted `color`, clear bits the opposite color, so the
    /// whole `width x height` destination is overwritten. Both dimensions
    /// must be multiples of 8.
    fn draw_bitmap(
        &mut self,
        bitmap: &[u8],
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: BinaryColor,
    ) -> Result<(), BitmapError> {
        if width % 8 != 0 || height % 8 != 0 {
            return Err(BitmapError::UnalignedDimensions);
        }
        let row_bytes = (width / 8) as usize;
        if bitmap.len() < row_bytes * height as usize {
            return Err(BitmapError::TooShort);
        }
        blit(self, bitmap, x, y, row_bytes, height as usize, color);
        Ok(())
    }

    /// Draw a string left to right starting at `(x, y)`
    ///
    /// Characters the font does not cover are drawn as a filled block
    /// [`PLACEHOLDER_WIDTH`] wide and one font height tall. Returns the
    /// cursor x after the last character, saturating at `i32::MAX`.
    fn draw_string(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font: &Font<'_>,
        color: BinaryColor,
    ) -> i32 {
        let (width, _) = self.extent();
        let height = i32::from(font.height());
        let mut cursor = x;

        for ch in text.chars() {
            let glyph = font.glyph(ch);
            let advance = glyph.map_or(PLACEHOLDER_WIDTH, |g| g.width_px() as i32);

            // Past the right edge nothing more can land on the surface
            if cursor < width {
                match glyph {
                    Some(glyph) => blit(
                        self,
                        font.glyph_bits(&glyph),
                        cursor,
                        y,
                        glyph.width_bytes as usize,
                        glyph.height_bits as usize,
                        color,
                    ),
                    None => self.draw_box_filled(
                        cursor,
                        y,
                        cursor.saturating_add(PLACEHOLDER_WIDTH - 1),
                        y.saturating_add(height - 1),
                        color,
                    ),
                }
            }
            cursor = cursor.saturating_add(advance);
        }

        cursor
    }
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Offsets from `center` within `radius` that land inside `0..limit`
///
/// Empty for a negative radius.
fn span(center: i32, radius: i32, limit: i32) -> RangeInclusive<i64> {
    let (center, radius) = (i64::from(center), i64::from(radius));
    (-radius).max(-center)..=radius.min(i64::from(limit) - 1 - center)
}

/// `base + delta` for a delta taken from [`span`], which keeps it on the surface
fn offset(base: i32, delta: i64) -> i32 {
    (i64::from(base) + delta) as i32
}

/// Paint `height` rows of `row_bytes` bytes each, skipping off-surface pixels
fn blit<C: Canvas + ?Sized>(
    canvas: &mut C,
    bits: &[u8],
    x: i32,
    y: i32,
    row_bytes: usize,
    height: usize,
    color: BinaryColor,
) {
    if row_bytes == 0 {
        return;
    }
    let (width, surface_height) = canvas.extent();
    let (columns, rows) = (0..i64::from(width), 0..i64::from(surface_height));
    let background = color.invert();

    for (row, row_data) in bits.chunks(row_bytes).take(height).enumerate() {
        let py = i64::from(y) + row as i64;
        if py >= rows.end {
            break;
        }
        if !rows.contains(&py) {
            continue;
        }
        for (column, &byte) in row_data.iter().enumerate() {
            for bit in 0..8 {
                let px = i64::from(x) + (column * 8 + bit) as i64;
                if columns.contains(&px) {
                    let lit = byte & (0x80 >> bit) != 0;
                    let paint = if lit { color } else { background };
                    canvas.draw_pixel(px as i32, py as i32, paint);
                }
            }
        }
    }
}
