// src/canvas.rs

//! The `PixelBuffer` compositing target.
//!
//! Pixels are stored row-major with row 0 at the *bottom* of the image: a
//! larger `y` is visually higher. The blitter relies on this when it flips
//! glyph masks (which the rasterizer produces top row first), and `save`
//! flips it back to the top-row-first order image files use.

use crate::color::Rgba;
use anyhow::{bail, Context, Result};
use image::{imageops, DynamicImage, ImageFormat, RgbaImage};
use log::debug;
use std::io::Cursor;
use std::path::Path;

/// A mutable 2-D grid of RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Allocates a `width` x `height` buffer of transparent black pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        Self {
            pixels: vec![color; width * height],
            width,
            height,
        }
    }

    /// Wraps existing pixel storage. `pixels.len()` must equal `width * height`.
    pub fn from_pixels(pixels: Vec<Rgba>, width: usize, height: usize) -> Result<Self> {
        if pixels.len() != width * height {
            bail!(
                "Pixel storage holds {} pixels, expected {}x{} = {}",
                pixels.len(),
                width,
                height,
                width * height
            );
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Reads the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index_of(x, y).map(|idx| self.pixels[idx])
    }

    /// Writes the pixel at `(x, y)`. Returns false, writing nothing, when the
    /// coordinate lies outside the buffer.
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) -> bool {
        match self.index_of(x, y) {
            Some(idx) => {
                self.pixels[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Pixels in storage order (bottom row first).
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Copies the buffer out as packed RGBA bytes in storage order.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_bytes()).collect()
    }

    /// Converts to an `image` buffer with the usual top-row-first layout,
    /// so storage row `height - 1` becomes image row 0.
    pub fn to_image(&self) -> Result<RgbaImage> {
        let mut image =
            RgbaImage::from_raw(self.width as u32, self.height as u32, self.to_rgba_bytes())
                .context("Pixel storage does not match the buffer dimensions")?;
        imageops::flip_vertical_in_place(&mut image);
        Ok(image)
    }

    /// Encodes the buffer in `format`. Formats without an alpha channel
    /// (PNM) receive the RGB channels only.
    pub fn encode(&self, format: ImageFormat) -> Result<Vec<u8>> {
        let image = DynamicImage::ImageRgba8(self.to_image()?);
        let image = match format {
            ImageFormat::Pnm => DynamicImage::ImageRgb8(image.to_rgb8()),
            _ => image,
        };
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, format).with_context(|| {
            format!(
                "Failed to encode {}x{} buffer as {:?}",
                self.width, self.height, format
            )
        })?;
        Ok(bytes.into_inner())
    }

    /// Writes the buffer to `path`, choosing the format from its extension
    /// (`.ppm`, `.png`).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)
            .with_context(|| format!("Unsupported image extension in '{}'", path.display()))?;
        let bytes = self.encode(format)?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write image file '{}'", path.display()))?;
        debug!(
            "Saved {}x{} buffer to '{}'",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }
}
