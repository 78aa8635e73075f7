//! Shared rasterizer engine context.
//!
//! Every `Font` keeps a clone of the `RasterEngine` that loaded it. The engine
//! state is created with the first handle and torn down when the last handle
//! (the caller's or any font's) is dropped. The count is an `Arc`, so handles
//! may be cloned and dropped from any thread; fonts themselves are not shared.

use crate::rasterizer::font::Font;
use crate::rasterizer::fontdue_font_driver::FontdueFontDriver;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug)]
struct EngineState {
    /// Settings applied to every face parsed through this engine.
    scale: f32,
}

impl Drop for EngineState {
    fn drop(&mut self) {
        info!("RasterEngine: last handle released, engine torn down");
    }
}

/// Reference-counted handle to the rasterizer engine.
#[derive(Debug, Clone)]
pub struct RasterEngine {
    state: Arc<EngineState>,
}

impl RasterEngine {
    /// Initializes a new engine context.
    pub fn new() -> Self {
        Self::with_scale(40.0)
    }

    /// Initializes an engine that pre-scales outlines for `scale` px, the
    /// size fontdue optimizes its internal geometry for.
    pub fn with_scale(scale: f32) -> Self {
        info!("RasterEngine: initialized (outline scale {})", scale);
        Self {
            state: Arc::new(EngineState { scale }),
        }
    }

    /// Number of live handles to this engine, including those held by fonts.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.state)
    }

    fn font_settings(&self) -> fontdue::FontSettings {
        fontdue::FontSettings {
            scale: self.state.scale,
            ..fontdue::FontSettings::default()
        }
    }

    /// Load a font file. The returned font is already rasterized at
    /// `DEFAULT_PIXEL_SIZE`; call `Font::set_pixel_size` to change it.
    pub fn load_font(&self, path: impl AsRef<Path>) -> Result<Font> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font file '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.load_font_bytes(&bytes, &name)
    }

    /// Load a font from in-memory file contents.
    pub fn load_font_bytes(&self, bytes: &[u8], name: &str) -> Result<Font> {
        let driver = FontdueFontDriver::from_bytes(bytes, self.font_settings(), name)?;
        info!("RasterEngine: loaded font '{}'", name);
        Font::new(self.clone(), Box::new(driver))
    }
}

impl Default for RasterEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::headless_font_driver::HeadlessFontDriver;
    use test_log::test;

    #[test]
    fn test_fonts_hold_engine_handles() -> Result<()> {
        let engine = RasterEngine::new();
        assert_eq!(engine.handle_count(), 1);

        let font_a = Font::new(engine.clone(), Box::new(HeadlessFontDriver::new()))?;
        let font_b = Font::new(engine.clone(), Box::new(HeadlessFontDriver::new()))?;
        assert_eq!(engine.handle_count(), 3);

        drop(font_a);
        assert_eq!(engine.handle_count(), 2);
        drop(font_b);
        assert_eq!(engine.handle_count(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_font_file_reports_path() {
        let engine = RasterEngine::new();
        let err = engine
            .load_font("/nonexistent/dir/font.ttf")
            .err()
            .expect("missing file must fail");
        assert!(err
            .to_string()
            .contains("Failed to read font file '/nonexistent/dir/font.ttf'"));
        // A failed load must not leak a handle.
        assert_eq!(engine.handle_count(), 1);
    }

    #[test]
    fn test_corrupt_font_bytes_fail() {
        let engine = RasterEngine::new();
        assert!(engine.load_font_bytes(&[0u8; 64], "zeros").is_err());
        assert_eq!(engine.handle_count(), 1);
    }
}
