//! 8x8 digit font
//!
//! Covers '0'..=':' so clock-style readouts render; anything else falls
//! back to the driver's placeholder block.

use sh1106_display::{Font, FontError, GlyphDescriptor};

const fn glyph(index: u16) -> GlyphDescriptor {
    GlyphDescriptor::new(1, 8, index * 8)
}

static DESCRIPTORS: [GlyphDescriptor; 11] = [
    glyph(0),
    glyph(1),
    glyph(2),
    glyph(3),
    glyph(4),
    glyph(5),
    glyph(6),
    glyph(7),
    glyph(8),
    glyph(9),
    glyph(10),
];

#[rustfmt::skip]
static BITMAP: [u8; 88] = [
    0x3C, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x3C, 0x00, // 0
    0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00, // 1
    0x3C, 0x66, 0x06, 0x0C, 0x30, 0x60, 0x7E, 0x00, // 2
    0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00, // 3
    0x0C, 0x1C, 0x3C, 0x6C, 0x7E, 0x0C, 0x0C, 0x00, // 4
    0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00, // 5
    0x3C, 0x60, 0x7C, 0x66, 0x66, 0x66, 0x3C, 0x00, // 6
    0x7E, 0x06, 0x0C, 0x18, 0x30, 0x30, 0x30, 0x00, // 7
    0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00, // 8
    0x3C, 0x66, 0x66, 0x3E, 0x06, 0x0C, 0x38, 0x00, // 9
    0x00, 0x18, 0x18, 0x00, 0x18, 0x18, 0x00, 0x00, // :
];

/// The digit font
pub fn digits() -> Result<Font<'static>, FontError> {
    Font::new(b'0', b':', &DESCRIPTORS, &BITMAP)
}
