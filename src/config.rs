// src/config.rs

//! Configuration for the `glyph-blit` demo renderer.
//!
//! The structs here are deserialized from a JSON file. Every section is
//! `#[serde(default)]`, so a partial file (or none at all) yields a usable
//! configuration.

use crate::color::{Color, NamedColor};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration for one render.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Font selection and size.
    pub font: FontConfig,
    /// Destination buffer settings.
    pub canvas: CanvasConfig,
    /// What to draw and where.
    pub text: TextConfig,
    /// Where to write the result.
    pub output: OutputConfig,
}

impl Config {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration JSON")
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }
}

// --- Font Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    /// Path to a TrueType/OpenType file. When `None`, the headless block
    /// font is used.
    pub path: Option<PathBuf>,
    /// Pixel size to rasterize the glyph cache at.
    pub pixel_size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            path: None,
            pixel_size: 12,
        }
    }
}

// --- Canvas Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: usize,
    pub height: usize,
    /// Color the buffer is cleared to before drawing.
    pub background: Color,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            width: 150,
            height: 100,
            background: Color::Named(NamedColor::Transparent),
        }
    }
}

// --- Text Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextConfig {
    /// Single-line ASCII text to draw.
    pub content: String,
    /// Pen start, in buffer coordinates (y grows upward).
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

impl Default for TextConfig {
    fn default() -> Self {
        TextConfig {
            content: "Hello, World!".to_string(),
            x: 40,
            y: 40,
            color: Color::Named(NamedColor::Green),
        }
    }
}

// --- Output Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Image file to write; the extension picks the format (`.ppm`, `.png`).
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: PathBuf::from("out.ppm"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use test_log::test;

    #[test]
    fn test_empty_object_yields_defaults() -> Result<()> {
        let config = Config::from_json_str("{}")?;
        assert_eq!(config, Config::default());
        assert_eq!(config.canvas.width, 150);
        assert_eq!(config.canvas.height, 100);
        assert_eq!(config.font.pixel_size, 12);
        assert_eq!(config.output.path, PathBuf::from("out.ppm"));
        assert_eq!(config.text.content, "Hello, World!");
        assert_eq!((config.text.x, config.text.y), (40, 40));
        Ok(())
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() -> Result<()> {
        let config = Config::from_json_str(
            r#"{
                "font": { "path": "fonts/mono.ttf", "pixel_size": 32 },
                "text": { "content": "Hi", "color": { "r": 1, "g": 2, "b": 3, "a": 255 } }
            }"#,
        )?;
        assert_eq!(config.font.path, Some(PathBuf::from("fonts/mono.ttf")));
        assert_eq!(config.font.pixel_size, 32);
        assert_eq!(config.text.content, "Hi");
        assert_eq!(config.text.x, 40);
        assert_eq!(Rgba::from(config.text.color), Rgba::new(1, 2, 3, 255));
        assert_eq!(config.canvas, CanvasConfig::default());
        Ok(())
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = Config::from_json_str("{ not json").unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration JSON"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Config::load("/nonexistent/glyph-blit.json").unwrap_err();
        assert!(err
            .to_string()
            .contains("Failed to read config file '/nonexistent/glyph-blit.json'"));
    }
}
