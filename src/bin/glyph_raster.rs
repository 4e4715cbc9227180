//! glyph-raster: render a line of text from a TrueType font to PNG.
//!
//! Run: `glyph-raster --font DejaVuSans.ttf --text "Hello" --output hello.png`
//!
//! Set `RUST_LOG=debug` to see font loading and skipped glyphs.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use trueno_glyph::prelude::*;

/// glyph-raster: scanline glyph rasterizer
#[derive(Parser, Debug)]
#[command(name = "glyph-raster")]
#[command(version)]
#[command(about = "Rasterize a line of text from a TrueType font to PNG", long_about = None)]
struct Cli {
    /// TrueType font file
    #[arg(short, long)]
    font: PathBuf,

    /// Text to render
    #[arg(short, long)]
    text: String,

    /// Font size in pixels (overrides config)
    #[arg(short, long)]
    size: Option<f32>,

    /// Pixels per design unit (overrides the size-derived scale)
    #[arg(long)]
    scale: Option<f32>,

    /// Glyph color as #rrggbb or #rrggbbaa
    #[arg(long)]
    color: Option<String>,

    /// Background color as #rrggbb or #rrggbbaa
    #[arg(long)]
    background: Option<String>,

    /// Output width in pixels; defaults to the measured line width
    /// unless a config file sets it
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels; defaults to the font size unless a config
    /// file sets it
    #[arg(long)]
    height: Option<u32>,

    /// Config file path (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "glyphs.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let font = TrueTypeFont::open(&cli.font)
        .with_context(|| format!("failed to load font {}", cli.font.display()))?;

    let config = build_config(&cli, &font)?;
    log::info!(
        "rendering {:?} at {}px into {}x{}",
        cli.text,
        config.font_size_px,
        config.width,
        config.height
    );

    let buffer = render_text(&font, &cli.text, &config)
        .context("failed to render text")?;
    PngEncoder::write_to_file(&buffer, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    println!("{}", cli.output.display());
    Ok(())
}

/// Layer command-line overrides over the config file (or defaults).
fn build_config(cli: &Cli, font: &TrueTypeFont) -> Result<RasterConfig> {
    let mut config = match &cli.config {
        Some(path) => RasterConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RasterConfig::default(),
    };

    if let Some(size) = cli.size {
        config.font_size_px = size;
    }
    if cli.scale.is_some() {
        config.font_scale = cli.scale;
    }
    if let Some(color) = &cli.color {
        config.foreground = color.parse()?;
    }
    if let Some(color) = &cli.background {
        config.background = color.parse()?;
    }

    // without a config file the buffer is sized to fit the line
    if cli.config.is_none() {
        let scale = config.scale_for(font.units_per_em());
        config.width = measure_line(font, &cli.text, scale).max(1) as u32;
        config.height = config.font_size_px.ceil().max(1.0) as u32;
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }

    config.validate()?;
    Ok(config)
}
