//! Headless font driver implementation.
//!
//! Produces solid blocks for printable ASCII so that layout and compositing
//! can run without a font file.

use crate::rasterizer::font_driver::{FontDriver, GlyphBitmap};
use anyhow::{bail, Result};

#[derive(Debug, Clone, Default)]
pub struct HeadlessFontDriver;

impl HeadlessFontDriver {
    pub fn new() -> Self {
        Self
    }
}

impl FontDriver for HeadlessFontDriver {
    fn rasterize(&self, code: u8, pixel_size: u32) -> Result<GlyphBitmap> {
        let ch = code as char;
        if !ch.is_ascii() || ch.is_ascii_control() {
            bail!("HeadlessFontDriver: no glyph for code {}", code);
        }

        let height = pixel_size as usize;
        let width = (height / 2).max(1);
        let advance_px = width as i32 + 1;

        // Space advances but draws nothing.
        let (width, height) = if ch == ' ' { (0, 0) } else { (width, height) };

        Ok(GlyphBitmap {
            coverage: vec![255; width * height],
            width,
            height,
            bearing_x: 0,
            bearing_y: height as i32,
            advance: advance_px << 6,
        })
    }

    fn name(&self) -> &str {
        "headless"
    }
}
