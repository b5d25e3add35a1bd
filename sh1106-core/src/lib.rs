//! Board-agnostic framebuffer logic for SH1106 OLED panels
//!
//! This crate contains everything that does not touch the bus:
//!
//! - Page-organized framebuffer and pixel address translation
//! - Drawing primitives built on a single set-pixel operation
//! - Glyph table types for proportional bitmap fonts
//!
//! # Memory layout
//!
//! ```text
//!            x = 0        x = 1        ...   x = 127
//! page 0   [byte 0]     [byte 1]     ...   [byte 127]    rows 0-7
//! page 1   [byte 128]   [byte 129]   ...   [byte 255]    rows 8-15
//! ...
//! page 7   [byte 896]   [byte 897]   ...   [byte 1023]   rows 56-63
//! ```
//!
//! Bit `n` of a byte is row `page * 8 + n` of that column (LSB on top).

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod canvas;
pub mod font;
pub mod framebuffer;

pub use canvas::{BitmapError, Canvas, PLACEHOLDER_WIDTH};
pub use embedded_graphics_core::pixelcolor::BinaryColor;
pub use font::{Font, FontError, GlyphDescriptor};
pub use framebuffer::{Framebuffer, BUFFER_SIZE, HEIGHT, PAGES, PAGE_HEIGHT, WIDTH};
