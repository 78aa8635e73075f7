//! Font loading, glyph rasterization, and the per-size glyph cache.
//!
//! ```text
//! FontDriver  →  GlyphCache (rebuild per pixel size)  →  Font::glyph(code)
//! (fontdue /                                              (used by layout
//!  headless)                                               and blit)
//! ```

pub mod engine;
pub mod font;
pub mod font_driver;
pub mod fontdue_font_driver;
pub mod glyph_cache;
pub mod headless_font_driver;

pub use engine::RasterEngine;
pub use font::{Font, DEFAULT_PIXEL_SIZE};
pub use font_driver::{FontDriver, GlyphBitmap};
pub use glyph_cache::{Glyph, GlyphCache, RebuildStats, GLYPH_COUNT};
