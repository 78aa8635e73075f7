// src/layout.rs

//! Single-line text layout: walks a string, blits each cached glyph at the
//! pen position and advances the pen horizontally.

use crate::blit::{draw_glyph, Point};
use crate::canvas::PixelBuffer;
use crate::color::Rgba;
use crate::rasterizer::Font;
use anyhow::Result;
use log::{debug, trace};

/// Draw `text` starting at `start`. See `draw_text_with_pen`.
pub fn draw_text(
    buffer: &mut PixelBuffer,
    font: &Font,
    text: &str,
    start: Point,
    color: Rgba,
) -> Result<u32> {
    let mut pen = start;
    draw_text_with_pen(buffer, font, text, &mut pen, color)
}

/// Draw `text` at `pen`, leaving `pen` where the next character would go.
///
/// Characters are drawn in order with no wrapping; `pen.y` never changes.
/// After each glyph the pen moves right by `advance >> 6` pixels. Once it
/// reaches the buffer's width the remaining characters are dropped and one
/// extra clipping signal is recorded.
///
/// # Returns
/// The summed clipping signal of every `draw_glyph` call plus the
/// early-stop increment. Zero means everything fit. An error is returned,
/// before anything is drawn, if `text` contains a character outside the
/// font's cached code range.
pub fn draw_text_with_pen(
    buffer: &mut PixelBuffer,
    font: &Font,
    text: &str,
    pen: &mut Point,
    color: Rgba,
) -> Result<u32> {
    let glyphs = text
        .chars()
        .map(|ch| font.glyph(ch as u32))
        .collect::<Result<Vec<_>>>()?;

    let width = buffer.width() as i64;
    let mut clipped = 0u32;
    for (drawn, glyph) in glyphs.iter().enumerate() {
        clipped += draw_glyph(buffer, glyph, *pen, color);
        pen.x = pen.x.saturating_add(glyph.advance_px());

        if pen.x as i64 >= width {
            let dropped = glyphs.len() - drawn - 1;
            debug!(
                "draw_text: pen reached x={} (width {}), dropping {} remaining characters",
                pen.x, width, dropped
            );
            clipped += 1;
            break;
        }
    }

    trace!(
        "draw_text: {:?} with '{}' ended at {:?} (clip signal {})",
        text,
        font.name(),
        pen,
        clipped
    );
    Ok(clipped)
}

/// Total horizontal advance of `text` in whole pixels, summing
/// `advance >> 6` per character exactly as drawing would.
pub fn measure_text(font: &Font, text: &str) -> Result<i32> {
    text.chars()
        .map(|ch| font.glyph(ch as u32).map(|g| g.advance_px()))
        .sum()
}
