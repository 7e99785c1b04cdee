use anyhow::Result;
use clap::Parser;
use lm_core::config::{self, AppConfig};
use lm_core::traits::GlyphRasterizer;
use lm_glyph::bitmap::BitmapRasterizer;
use lm_glyph::font::FontRasterizer;

pub mod cli;
pub mod command;
pub mod shell;

fn main() -> Result<()> {
    // 1. Parse the CLI
    let cli = cli::Cli::parse();

    // 2. Initialize logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Load the config, apply CLI overrides
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(resolution) = cli.resolution {
        config.resolution = resolution;
    }
    if let Some(charset) = &cli.charset {
        config.charset.clone_from(charset);
    }
    if let Some(font) = &cli.font {
        config.font_path = Some(font.clone());
    }
    config.validate()?;

    // 4. Load the source image
    let image = lm_image::decode::load_image(&cli.image)?;

    // 5. Pick the glyph rasterizer
    let rasterizer: Box<dyn GlyphRasterizer> = match &config.font_path {
        Some(path) => Box::new(FontRasterizer::from_file(path, config.glyph_size)?),
        None => Box::new(BitmapRasterizer::new()),
    };

    // 6. Run the shell
    shell::Shell::new(image, config, rasterizer).run()
}
