// src/blit.rs

//! Draws one glyph's coverage mask onto a `PixelBuffer`.

use crate::canvas::PixelBuffer;
use crate::color::Rgba;
use crate::rasterizer::Glyph;
use log::trace;

/// An integer position in buffer space (y grows upward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Blend `glyph` onto `buffer` with its bottom-left corner at `position`.
///
/// The glyph covers `[x, x + width) x [y, y + height)`. Mask row 0 (the top
/// of the glyph) lands on the highest destination row, since the buffer
/// stores rows bottom-up. Each in-bounds pixel is lerped towards `color` by
/// the mask coverage.
///
/// # Returns
/// A coarse clipping signal, zero when the glyph fit entirely:
/// - 1 if `position` has a negative coordinate,
/// - 1 for every destination row above the buffer's last row,
/// - 1 for every glyph column right of the buffer's last column, counted
///   again on every row, in range or not.
///
/// Treat a nonzero value as "something was clipped", not as a pixel count.
pub fn draw_glyph(buffer: &mut PixelBuffer, glyph: &Glyph, position: Point, color: Rgba) -> u32 {
    let mut clipped = 0u32;
    if position.x < 0 || position.y < 0 {
        clipped += 1;
    }

    let height = buffer.height() as i64;
    let width = buffer.width() as i64;

    for row in 0..glyph.height() {
        let y = position.y as i64 + row as i64;
        if y >= height {
            clipped += 1;
        }
        let row_in_range = (0..height).contains(&y);
        let mask_row = glyph.height() - 1 - row;

        for col in 0..glyph.width() {
            let x = position.x as i64 + col as i64;
            if x >= width {
                clipped += 1;
            }
            if !row_in_range || x < 0 || x >= width {
                continue;
            }
            let (x, y) = (x as i32, y as i32);
            if let Some(existing) = buffer.get(x, y) {
                let coverage = glyph.coverage_at(col, mask_row);
                buffer.set(x, y, existing.lerp(color, coverage));
            }
        }
    }

    if clipped > 0 {
        trace!(
            "draw_glyph: {}x{} glyph at ({}, {}) clipped (signal {})",
            glyph.width(),
            glyph.height(),
            position.x,
            position.y,
            clipped
        );
    }
    clipped
}
