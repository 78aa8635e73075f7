// src/lib.rs

//! Renders single-line ASCII text into an in-memory RGBA buffer.
//!
//! A `Font` rasterizes the codes `0..128` once per pixel size into a glyph
//! cache; `layout::draw_text` then blends cached coverage masks onto a
//! caller-owned `PixelBuffer`.

pub mod blit;
pub mod canvas;
pub mod color;
pub mod config;
pub mod layout;
pub mod rasterizer;

pub use blit::{draw_glyph, Point};
pub use canvas::PixelBuffer;
pub use color::{Color, NamedColor, Rgba};
pub use layout::{draw_text, draw_text_with_pen, measure_text};
pub use rasterizer::{Font, Glyph, GlyphCache, RasterEngine};
