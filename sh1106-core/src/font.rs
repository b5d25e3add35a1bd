//! Glyph tables for bitmap fonts
//!
//! A font is a contiguous range of code points `[start_char, end_char]`,
//! one [`GlyphDescriptor`] per code point, and a shared bitmap blob. Each
//! glyph is stored row-major, `width_bytes` bytes per row, MSB first.
//! Glyphs may differ in width but all must share one height.

/// Per-glyph descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphDescriptor {
    /// Glyph width in bytes (8 pixels each)
    pub width_bytes: u8,
    /// Glyph height in rows
    pub height_bits: u8,
    /// Offset of the first row in the bitmap blob
    pub offset: u16,
}

impl GlyphDescriptor {
    /// Describe a glyph `width_bytes * 8` pixels wide starting at `offset`
    pub const fn new(width_bytes: u8, height_bits: u8, offset: u16) -> Self {
        Self {
            width_bytes,
            height_bits,
            offset,
        }
    }

    /// Horizontal advance in pixels
    pub const fn width_px(&self) -> u32 {
        self.width_bytes as u32 * 8
    }

    /// Number of bitmap bytes this glyph occupies
    pub const fn byte_len(&self) -> usize {
        self.width_bytes as usize * self.height_bits as usize
    }
}

/// Font table validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontError {
    /// `start_char` is greater than `end_char`
    InvalidRange,
    /// Descriptor count does not match the code point range
    DescriptorCount,
    /// A glyph has zero width or zero height
    EmptyGlyph,
    /// Glyphs do not all share the same height
    MixedHeights,
    /// A glyph's rows extend past the end of the bitmap
    GlyphOutOfBounds,
}

/// Validated, read-only font table
#[derive(Debug, Clone, Copy)]
pub struct Font<'a> {
    start_char: u8,
    end_char: u8,
    height: u8,
    descriptors: &'a [GlyphDescriptor],
    bitmap: &'a [u8],
}

impl<'a> Font<'a> {
    /// Build a font from its tables, checking that every glyph is usable
    pub fn new(
        start_char: u8,
        end_char: u8,
        descriptors: &'a [GlyphDescriptor],
        bitmap: &'a [u8],
    ) -> Result<Self, FontError> {
        if start_char > end_char {
            return Err(FontError::InvalidRange);
        }
        if descriptors.len() != (end_char - start_char) as usize + 1 {
            return Err(FontError::DescriptorCount);
        }

        let height = descriptors[0].height_bits;
        for glyph in descriptors {
            if glyph.width_bytes == 0 || glyph.height_bits == 0 {
                return Err(FontError::EmptyGlyph);
            }
            if glyph.height_bits != height {
                return Err(FontError::MixedHeights);
            }
            if glyph.offset as usize + glyph.byte_len() > bitmap.len() {
                return Err(FontError::GlyphOutOfBounds);
            }
        }

        Ok(Self {
            start_char,
            end_char,
            height,
            descriptors,
            bitmap,
        })
    }

    /// First supported code point
    pub const fn start_char(&self) -> u8 {
        self.start_char
    }

    /// Last supported code point
    pub const fn end_char(&self) -> u8 {
        self.end_char
    }

    /// Common glyph height in pixels
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Descriptor for a character, `None` if the font does not cover it
    pub fn glyph(&self, ch: char) -> Option<GlyphDescriptor> {
        let code = u32::from(ch);
        if code < u32::from(self.start_char) || code > u32::from(self.end_char) {
            return None;
        }
        self.descriptors
            .get((code - u32::from(self.start_char)) as usize)
            .copied()
    }

    /// Bitmap rows of a glyph
    pub fn glyph_bits(&self, glyph: &GlyphDescriptor) -> &'a [u8] {
        let start = glyph.offset as usize;
        self.bitmap
            .get(start..start + glyph.byte_len())
            .unwrap_or(&[])
    }
}
