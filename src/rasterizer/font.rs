//! The `Font` resource: one loaded face plus its glyph cache.

use super::engine::RasterEngine;
use super::font_driver::FontDriver;
use super::glyph_cache::{Glyph, GlyphCache, RebuildStats};
use anyhow::Result;
use log::{debug, info};
use std::fmt;

/// Pixel size a font is rasterized at when it is created.
pub const DEFAULT_PIXEL_SIZE: u32 = 12;

/// A loaded font face and the glyphs rasterized from it.
///
/// The face lives behind the `FontDriver` trait object; layout and blitting
/// only ever see cached `Glyph`s. Dropping a `Font` frees its cache and
/// releases its engine handle.
pub struct Font {
    driver: Option<Box<dyn FontDriver>>,
    cache: GlyphCache,
    _engine: Option<RasterEngine>,
}

impl Font {
    /// Wrap a driver loaded through `engine` and rasterize its glyphs at
    /// `DEFAULT_PIXEL_SIZE`, so the font can draw right away.
    pub fn new(engine: RasterEngine, driver: Box<dyn FontDriver>) -> Result<Self> {
        let mut font = Self {
            driver: Some(driver),
            cache: GlyphCache::new(),
            _engine: Some(engine),
        };
        font.set_pixel_size(DEFAULT_PIXEL_SIZE)?;
        Ok(font)
    }

    /// A font with no face. Every glyph is zero-size with no advance, so
    /// drawing with it changes nothing.
    pub fn empty() -> Self {
        Self {
            driver: None,
            cache: GlyphCache::new(),
            _engine: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.driver.is_none()
    }

    pub fn name(&self) -> &str {
        self.driver.as_deref().map_or("<empty>", |d| d.name())
    }

    /// Re-rasterize every cached glyph at `pixel_size`.
    ///
    /// Setting the size that is already active is a no-op.
    pub fn set_pixel_size(&mut self, pixel_size: u32) -> Result<RebuildStats> {
        let Some(driver) = self.driver.as_deref() else {
            debug!("Font: ignoring pixel size {} on empty font", pixel_size);
            return Ok(RebuildStats::default());
        };
        if self.cache.pixel_size() == Some(pixel_size) {
            debug!(
                "Font '{}': already at {}px, skipping rebuild",
                driver.name(),
                pixel_size
            );
            return Ok(RebuildStats::default());
        }
        info!("Font '{}': switching to {}px", driver.name(), pixel_size);
        self.cache.rebuild(driver, pixel_size)
    }

    /// Force a rebuild even when `pixel_size` is already active.
    pub fn refresh(&mut self, pixel_size: u32) -> Result<RebuildStats> {
        match self.driver.as_deref() {
            Some(driver) => self.cache.rebuild(driver, pixel_size),
            None => Ok(RebuildStats::default()),
        }
    }

    pub fn pixel_size(&self) -> Option<u32> {
        self.cache.pixel_size()
    }

    /// Cached glyph for a character code.
    pub fn glyph(&self, code: u32) -> Result<&Glyph> {
        self.cache.lookup(code)
    }

    pub fn cache(&self) -> &GlyphCache {
        &self.cache
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name())
            .field("pixel_size", &self.pixel_size())
            .finish()
    }
}
