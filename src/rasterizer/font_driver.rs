//! Glyph rasterization primitives.
//!
//! This module defines the `FontDriver` trait, the seam between the glyph
//! cache and whatever actually turns outlines into coverage (fontdue for real
//! fonts, the headless driver for tests and font-less runs).

use anyhow::Result;

/// Coverage bitmap for one character at one pixel size, as produced by a
/// `FontDriver`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// One byte of coverage per pixel, row-major, **top row first**.
    /// Length is `width * height`.
    pub coverage: Vec<u8>,
    pub width: usize,
    pub height: usize,
    /// Offset from the pen origin to the left edge of the mask.
    pub bearing_x: i32,
    /// Offset from the baseline up to the top edge of the mask.
    pub bearing_y: i32,
    /// Horizontal pen advance in 1/64 pixel units.
    pub advance: i32,
}

/// Rasterizer adapter trait.
///
/// Implementors own whatever face object their engine needs; callers only
/// ever see `GlyphBitmap`s.
pub trait FontDriver {
    /// Rasterize the single-byte character `code` at `pixel_size` pixels.
    ///
    /// # Returns
    /// The coverage bitmap, or an error if this particular character cannot
    /// be rasterized. A failure here is local to `code`; callers are expected
    /// to carry on with other characters.
    fn rasterize(&self, code: u8, pixel_size: u32) -> Result<GlyphBitmap>;

    /// Human-readable name of the face, for logging.
    fn name(&self) -> &str;
}
