// src/color.rs

//! Defines the `Rgba` pixel type, the `NamedColor` palette, and the linear
//! coverage blend used when compositing glyphs.

use serde::{Deserialize, Serialize};

/// RGBA color in 32-bit format (8 bits per channel, straight alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black. This is what a freshly allocated buffer holds.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to RGBA byte array
    pub fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linearly interpolates every channel (alpha included) towards `target`
    /// by `coverage / 255`.
    ///
    /// This is a plain lerp, not premultiplied "over" compositing: a
    /// destination with alpha 0 is blended exactly like an opaque one.
    /// Coverage 255 yields `target` exactly, coverage 0 yields `self`.
    pub fn lerp(self, target: Rgba, coverage: u8) -> Rgba {
        Rgba {
            r: lerp_channel(self.r, target.r, coverage),
            g: lerp_channel(self.g, target.g, coverage),
            b: lerp_channel(self.b, target.b, coverage),
            a: lerp_channel(self.a, target.a, coverage),
        }
    }
}

// existing + coverage/255 * (target - existing), with the sum truncated.
fn lerp_channel(existing: u8, target: u8, coverage: u8) -> u8 {
    let t = coverage as f32 / 255.0;
    let existing = existing as f32;
    (existing + t * (target as f32 - existing)) as u8
}

impl From<NamedColor> for Rgba {
    fn from(named: NamedColor) -> Self {
        named.to_rgba()
    }
}

/// A small palette of named colors, mostly for configuration files and the
/// demo binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Transparent,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl NamedColor {
    /// Returns the opaque sRGB value for this color (`Transparent` excepted).
    pub fn to_rgba(&self) -> Rgba {
        match self {
            NamedColor::Transparent => Rgba::TRANSPARENT,
            NamedColor::Black => Rgba::opaque(0, 0, 0),
            NamedColor::Red => Rgba::opaque(255, 0, 0),
            NamedColor::Green => Rgba::opaque(0, 255, 0),
            NamedColor::Yellow => Rgba::opaque(255, 255, 0),
            NamedColor::Blue => Rgba::opaque(0, 0, 255),
            NamedColor::Magenta => Rgba::opaque(255, 0, 255),
            NamedColor::Cyan => Rgba::opaque(0, 255, 255),
            NamedColor::White => Rgba::opaque(255, 255, 255),
        }
    }
}

/// A color as it may be written in a configuration file: either a palette
/// name (`"green"`) or explicit channels (`{"r":1,"g":2,"b":3,"a":255}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(NamedColor),
    Rgba(Rgba),
}

impl Default for Color {
    fn default() -> Self {
        Color::Named(NamedColor::Transparent)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        match color {
            Color::Named(named) => named.to_rgba(),
            Color::Rgba(rgba) => rgba,
        }
    }
}
