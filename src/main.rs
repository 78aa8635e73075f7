// src/main.rs

use anyhow::Context;
use glyph_blit::config::Config;
use glyph_blit::rasterizer::headless_font_driver::HeadlessFontDriver;
use glyph_blit::{draw_text, Font, PixelBuffer, Point, RasterEngine, Rgba};
use log::{info, warn};

/// Main entry point for `glyph-blit`.
///
/// Usage: `glyph-blit [config.json]`
fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => Config::load(&path)?,
        None => {
            info!("No config file given, using defaults.");
            Config::default()
        }
    };
    info!("Configuration: {:?}", config);

    let engine = RasterEngine::new();
    let mut font = match &config.font.path {
        Some(path) => engine
            .load_font(path)
            .with_context(|| format!("Failed to load font '{}'", path.display()))?,
        None => {
            warn!("No font path configured, falling back to the headless block font");
            Font::new(engine.clone(), Box::new(HeadlessFontDriver::new()))?
        }
    };
    font.set_pixel_size(config.font.pixel_size)
        .context("Failed to rasterize glyph cache")?;

    let mut buffer = PixelBuffer::filled(
        config.canvas.width,
        config.canvas.height,
        config.canvas.background.into(),
    );
    let start = Point::new(config.text.x, config.text.y);
    let color: Rgba = config.text.color.into();

    let clipped = draw_text(&mut buffer, &font, &config.text.content, start, color)
        .context("Failed to draw text")?;
    if clipped > 0 {
        warn!(
            "Text {:?} was clipped (signal {}); the buffer is {}x{}",
            config.text.content,
            clipped,
            buffer.width(),
            buffer.height()
        );
    }

    buffer.save(&config.output.path)?;
    info!("Wrote '{}'", config.output.path.display());

    Ok(())
}
