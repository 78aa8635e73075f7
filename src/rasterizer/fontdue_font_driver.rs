//! Font driver backed by `fontdue`.
//!
//! Loads TrueType/OpenType data and rasterizes single-byte characters into
//! coverage masks. fontdue already emits masks top row first, which is the
//! orientation `GlyphBitmap` expects.

use crate::rasterizer::font_driver::{FontDriver, GlyphBitmap};
use anyhow::{anyhow, bail, Result};
use log::trace;

pub struct FontdueFontDriver {
    face: fontdue::Font,
    name: String,
}

impl FontdueFontDriver {
    /// Parse a font face from raw file contents.
    pub fn from_bytes(bytes: &[u8], settings: fontdue::FontSettings, name: &str) -> Result<Self> {
        let face = fontdue::Font::from_bytes(bytes, settings)
            .map_err(|e| anyhow!("Failed to parse font '{}': {}", name, e))?;
        Ok(Self {
            face,
            name: name.to_string(),
        })
    }
}

impl FontDriver for FontdueFontDriver {
    fn rasterize(&self, code: u8, pixel_size: u32) -> Result<GlyphBitmap> {
        let ch = code as char;
        // Index 0 is .notdef: the face has no mapping for this character.
        if self.face.lookup_glyph_index(ch) == 0 {
            bail!("Font '{}' has no glyph for code {}", self.name, code);
        }

        let (metrics, coverage) = self.face.rasterize(ch, pixel_size as f32);
        trace!(
            "Rasterized code {} at {}px: {}x{} xmin={} ymin={} advance={}",
            code,
            pixel_size,
            metrics.width,
            metrics.height,
            metrics.xmin,
            metrics.ymin,
            metrics.advance_width
        );

        Ok(GlyphBitmap {
            coverage,
            width: metrics.width,
            height: metrics.height,
            bearing_x: metrics.xmin,
            // fontdue's ymin is the bottom edge relative to the baseline.
            bearing_y: metrics.ymin + metrics.height as i32,
            advance: (metrics.advance_width * 64.0).round() as i32,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
