//! Fixed-range glyph cache.
//!
//! The `GlyphCache` holds one `Glyph` for every single-byte code below
//! `GLYPH_COUNT`, all rasterized at the same pixel size. Changing the size
//! rebuilds every slot in place through a `FontDriver`.

use super::font_driver::{FontDriver, GlyphBitmap};
use anyhow::{bail, Result};
use log::*;

/// Number of character codes the cache covers (`0..GLYPH_COUNT`).
pub const GLYPH_COUNT: usize = 128;

/// One rasterized character at the cache's current pixel size.
///
/// The mask length always equals `width * height`; glyphs are only built
/// through `TryFrom<GlyphBitmap>`, which checks it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glyph {
    /// Coverage bytes, top row first.
    coverage: Vec<u8>,
    width: usize,
    height: usize,
    bearing_x: i32,
    bearing_y: i32,
    /// Pen advance in 1/64 pixel units.
    advance: i32,
}

impl TryFrom<GlyphBitmap> for Glyph {
    type Error = anyhow::Error;

    fn try_from(bitmap: GlyphBitmap) -> Result<Self> {
        let expected = bitmap.width.checked_mul(bitmap.height);
        if expected != Some(bitmap.coverage.len()) {
            bail!(
                "Coverage mask holds {} bytes, expected {}x{}",
                bitmap.coverage.len(),
                bitmap.width,
                bitmap.height
            );
        }
        Ok(Self {
            coverage: bitmap.coverage,
            width: bitmap.width,
            height: bitmap.height,
            bearing_x: bitmap.bearing_x,
            bearing_y: bitmap.bearing_y,
            advance: bitmap.advance,
        })
    }
}

impl Glyph {
    /// Coverage of the mask pixel at column `x` of mask row `row`
    /// (row 0 = top of the glyph). Outside the mask the coverage is 0.
    pub fn coverage_at(&self, x: usize, row: usize) -> u8 {
        if x >= self.width || row >= self.height {
            return 0;
        }
        self.coverage[row * self.width + x]
    }

    pub fn coverage(&self) -> &[u8] {
        &self.coverage
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bearing(&self) -> (i32, i32) {
        (self.bearing_x, self.bearing_y)
    }

    /// Pen advance in 1/64 pixel units.
    pub fn advance(&self) -> i32 {
        self.advance
    }

    /// Pen advance rounded down to whole pixels.
    pub fn advance_px(&self) -> i32 {
        self.advance >> 6
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Outcome of a `GlyphCache::rebuild`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildStats {
    /// Slots that received a fresh rasterization.
    pub rasterized: usize,
    /// Slots whose rasterization failed and kept their previous contents.
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct GlyphCache {
    glyphs: Vec<Glyph>,
    pixel_size: Option<u32>,
}

impl GlyphCache {
    /// Creates a cache whose every slot is a zero-size glyph.
    pub fn new() -> Self {
        Self {
            glyphs: vec![Glyph::default(); GLYPH_COUNT],
            pixel_size: None,
        }
    }

    /// Pixel size of the last rebuild, if any.
    pub fn pixel_size(&self) -> Option<u32> {
        self.pixel_size
    }

    /// Rasterize every code in `0..GLYPH_COUNT` at `pixel_size`.
    ///
    /// A successful rasterization replaces the slot's mask, size, bearing and
    /// advance. A failed one is logged and leaves the slot untouched (zero-size
    /// if it was never filled); the rebuild always visits every code.
    pub fn rebuild(&mut self, driver: &dyn FontDriver, pixel_size: u32) -> Result<RebuildStats> {
        if pixel_size == 0 {
            bail!("Pixel size must be positive");
        }

        debug!(
            "GlyphCache: rebuilding {} glyphs of '{}' at {}px",
            GLYPH_COUNT,
            driver.name(),
            pixel_size
        );

        let mut stats = RebuildStats::default();
        for (code, slot) in self.glyphs.iter_mut().enumerate() {
            match driver
                .rasterize(code as u8, pixel_size)
                .and_then(Glyph::try_from)
            {
                Ok(glyph) => {
                    *slot = glyph;
                    stats.rasterized += 1;
                }
                Err(e) => {
                    warn!("GlyphCache: keeping previous glyph for code {}: {:#}", code, e);
                    stats.failed += 1;
                }
            }
        }

        self.pixel_size = Some(pixel_size);
        info!(
            "GlyphCache: '{}' at {}px ready ({} rasterized, {} failed)",
            driver.name(),
            pixel_size,
            stats.rasterized,
            stats.failed
        );
        Ok(stats)
    }

    /// Get the glyph for `code`.
    ///
    /// # Returns
    /// The cached glyph, or an error if `code` is outside `0..GLYPH_COUNT`
    pub fn lookup(&self, code: u32) -> Result<&Glyph> {
        match self.glyphs.get(code as usize) {
            Some(glyph) => Ok(glyph),
            None => bail!(
                "Character code {} is outside the cached range 0..{}",
                code,
                GLYPH_COUNT
            ),
        }
    }
}

impl Default for GlyphCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::Cell;
    use test_log::test;

    // --- Mock Implementation ---

    /// Produces `size`-derived masks whose bytes encode the code, so tests
    /// can tell rasterizations apart. Codes listed in `failing` error out.
    struct MockFontDriver {
        failing: Vec<u8>,
        calls: Cell<usize>,
    }

    impl MockFontDriver {
        fn new() -> Self {
            Self {
                failing: Vec::new(),
                calls: Cell::new(0),
            }
        }

        fn failing_on(codes: &[u8]) -> Self {
            Self {
                failing: codes.to_vec(),
                calls: Cell::new(0),
            }
        }
    }

    impl FontDriver for MockFontDriver {
        fn rasterize(&self, code: u8, pixel_size: u32) -> Result<GlyphBitmap> {
            self.calls.set(self.calls.get() + 1);
            if self.failing.contains(&code) {
                return Err(anyhow!("MockFontDriver: refusing code {}", code));
            }
            let width = pixel_size as usize / 2 + code as usize % 3;
            let height = pixel_size as usize;
            Ok(GlyphBitmap {
                coverage: (0..width * height)
                    .map(|i| (i as u8).wrapping_add(code))
                    .collect(),
                width,
                height,
                bearing_x: 1,
                bearing_y: height as i32 - 2,
                advance: (width as i32 + 2) << 6,
            })
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    // --- Test Cases ---

    #[test]
    fn test_new_cache_has_empty_entry_for_every_code() -> Result<()> {
        let cache = GlyphCache::new();
        assert_eq!(cache.pixel_size(), None);
        for code in 0..GLYPH_COUNT as u32 {
            let glyph = cache.lookup(code)?;
            assert!(glyph.is_empty());
            assert!(glyph.coverage().is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_rebuild_visits_every_code() -> Result<()> {
        let driver = MockFontDriver::new();
        let mut cache = GlyphCache::new();
        let stats = cache.rebuild(&driver, 12)?;

        assert_eq!(driver.calls.get(), GLYPH_COUNT);
        assert_eq!(
            stats,
            RebuildStats {
                rasterized: GLYPH_COUNT,
                failed: 0
            }
        );
        assert_eq!(cache.pixel_size(), Some(12));

        let glyph = cache.lookup(b'A' as u32)?;
        assert_eq!(glyph.height(), 12);
        assert_eq!(glyph.width(), 6 + 65 % 3);
        assert_eq!(glyph.coverage().len(), glyph.width() * glyph.height());
        Ok(())
    }

    #[test]
    fn test_rebuild_at_new_size_replaces_masks() -> Result<()> {
        let driver = MockFontDriver::new();
        let mut cache = GlyphCache::new();
        cache.rebuild(&driver, 8)?;
        cache.rebuild(&driver, 20)?;

        for code in 0..GLYPH_COUNT as u32 {
            let glyph = cache.lookup(code)?;
            let expected = driver.rasterize(code as u8, 20)?;
            assert_eq!(glyph.width(), expected.width);
            assert_eq!(glyph.height(), expected.height);
            assert_eq!(glyph.coverage(), expected.coverage.as_slice());
        }
        Ok(())
    }

    #[test]
    fn test_rebuild_same_size_is_idempotent() -> Result<()> {
        let driver = MockFontDriver::new();
        let mut cache = GlyphCache::new();
        cache.rebuild(&driver, 16)?;
        let first: Vec<Glyph> = (0..GLYPH_COUNT as u32)
            .map(|c| cache.lookup(c).cloned())
            .collect::<Result<_>>()?;
        cache.rebuild(&driver, 16)?;
        for (code, glyph) in first.iter().enumerate() {
            assert_eq!(cache.lookup(code as u32)?, glyph);
        }
        Ok(())
    }

    #[test]
    fn test_failed_code_keeps_previous_glyph() -> Result<()> {
        let mut cache = GlyphCache::new();
        cache.rebuild(&MockFontDriver::new(), 10)?;
        let before = cache.lookup(b'B' as u32)?.clone();

        let failing = MockFontDriver::failing_on(&[b'B']);
        let stats = cache.rebuild(&failing, 14)?;

        assert_eq!(failing.calls.get(), GLYPH_COUNT);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.rasterized, GLYPH_COUNT - 1);
        assert_eq!(cache.lookup(b'B' as u32)?, &before);
        assert_eq!(cache.lookup(b'C' as u32)?.height(), 14);
        Ok(())
    }

    #[test]
    fn test_failed_code_without_history_stays_empty() -> Result<()> {
        let mut cache = GlyphCache::new();
        cache.rebuild(&MockFontDriver::failing_on(&[0, b'x']), 10)?;
        assert!(cache.lookup(0)?.is_empty());
        assert!(cache.lookup(b'x' as u32)?.is_empty());
        assert!(!cache.lookup(b'y' as u32)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_zero_pixel_size_is_rejected() {
        let mut cache = GlyphCache::new();
        let err = cache.rebuild(&MockFontDriver::new(), 0).unwrap_err();
        assert!(err.to_string().contains("Pixel size must be positive"));
        assert_eq!(cache.pixel_size(), None);
    }

    #[test]
    fn test_lookup_out_of_range_fails() {
        let cache = GlyphCache::new();
        let err = cache.lookup(GLYPH_COUNT as u32).unwrap_err();
        assert!(err.to_string().contains("outside the cached range"));
        assert!(cache.lookup(0x263A).is_err());
    }

    #[test]
    fn test_coverage_at_indexes_rows_from_top() -> Result<()> {
        let glyph = Glyph::try_from(GlyphBitmap {
            coverage: vec![1, 2, 3, 4, 5, 6],
            width: 3,
            height: 2,
            ..GlyphBitmap::default()
        })?;
        assert_eq!(glyph.coverage_at(0, 0), 1);
        assert_eq!(glyph.coverage_at(2, 0), 3);
        assert_eq!(glyph.coverage_at(1, 1), 5);
        assert_eq!(glyph.coverage_at(3, 0), 0);
        assert_eq!(glyph.coverage_at(0, 2), 0);
        Ok(())
    }

    #[test]
    fn test_mask_length_must_match_dimensions() {
        let err = Glyph::try_from(GlyphBitmap {
            coverage: vec![255; 3],
            width: 2,
            height: 2,
            ..GlyphBitmap::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("holds 3 bytes, expected 2x2"));
    }

    #[test]
    fn test_short_mask_from_driver_counts_as_failure() -> Result<()> {
        struct ShortMaskDriver;

        impl FontDriver for ShortMaskDriver {
            fn rasterize(&self, code: u8, _pixel_size: u32) -> Result<GlyphBitmap> {
                let len = if code == b'Q' { 3 } else { 4 };
                Ok(GlyphBitmap {
                    coverage: vec![255; len],
                    width: 2,
                    height: 2,
                    ..GlyphBitmap::default()
                })
            }

            fn name(&self) -> &str {
                "short"
            }
        }

        let mut cache = GlyphCache::new();
        let stats = cache.rebuild(&ShortMaskDriver, 2)?;
        assert_eq!(stats.failed, 1);
        assert!(cache.lookup(b'Q' as u32)?.is_empty());
        assert_eq!(cache.lookup(b'R' as u32)?.coverage().len(), 4);
        Ok(())
    }
}
