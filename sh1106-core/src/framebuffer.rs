//! Page-organized framebuffer
//!
//! Translates linear (x, y) pixel coordinates into the controller's
//! page/column byte layout. The mapping is fixed by the SH1106 RAM
//! organization and must stay bit-exact:
//!
//! - byte index = `(y / 8) * WIDTH + x`
//! - bit        = `y % 8`

use core::convert::Infallible;

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::Pixel;

use crate::canvas::Canvas;

/// Visible panel width in pixels
pub const WIDTH: usize = 128;

/// Visible panel height in pixels
pub const HEIGHT: usize = 64;

/// Rows per page (one byte per column)
pub const PAGE_HEIGHT: usize = 8;

/// Number of pages
pub const PAGES: usize = HEIGHT / PAGE_HEIGHT;

/// Framebuffer size in bytes
pub const BUFFER_SIZE: usize = WIDTH * PAGES;

/// 1 bit per pixel framebuffer for a 128x64 panel
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    buffer: [u8; BUFFER_SIZE],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let lit = self.buffer.iter().map(|b| b.count_ones()).sum::<u32>();
        f.debug_struct("Framebuffer")
            .field("lit_pixels", &lit)
            .finish()
    }
}

impl Framebuffer {
    /// Create a zero-filled (all pixels off) framebuffer
    pub const fn new() -> Self {
        Self {
            buffer: [0; BUFFER_SIZE],
        }
    }

    /// Check whether a coordinate lies on the visible panel
    pub const fn contains(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < WIDTH && (y as usize) < HEIGHT
    }

    /// Byte index and bit position for a pixel, `None` when off-panel
    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if !Self::contains(x, y) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(((y / PAGE_HEIGHT) * WIDTH + x, (y % PAGE_HEIGHT) as u8))
    }

    /// Set or clear one pixel
    ///
    /// Coordinates outside the panel are ignored. Returns `true` if the
    /// pixel was on the panel and written.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) -> bool {
        let Some((index, bit)) = Self::locate(x, y) else {
            return false;
        };
        match color {
            BinaryColor::On => self.buffer[index] |= 1 << bit,
            BinaryColor::Off => self.buffer[index] &= !(1 << bit),
        }
        true
    }

    /// Read one pixel, `None` outside the panel
    pub fn pixel(&self, x: i32, y: i32) -> Option<BinaryColor> {
        let (index, bit) = Self::locate(x, y)?;
        Some(BinaryColor::from(self.buffer[index] & (1 << bit) != 0))
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Raw buffer in controller order
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// The `WIDTH` bytes of one page, `None` past the last page
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        self.buffer.chunks_exact(WIDTH).nth(page)
    }

    /// Iterate over all pages top to bottom
    pub fn pages(&self) -> impl Iterator<Item = &[u8]> {
        self.buffer.chunks_exact(WIDTH)
    }
}

impl Canvas for Framebuffer {
    fn draw_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        self.set_pixel(x, y, color);
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }
}
