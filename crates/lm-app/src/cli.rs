use std::path::PathBuf;

use clap::Parser;

/// lumart, an interactive image-to-ASCII art shell.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source image (PNG, JPEG, BMP, GIF).
    pub image: PathBuf,

    /// TOML configuration file. Defaults apply when absent.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Initial resolution (character columns). Overrides the config file.
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Seed character set. Overrides the config file.
    #[arg(long)]
    pub charset: Option<String>,

    /// Font file (TTF/OTF) for glyph brightness. Built-in bitmap glyphs are
    /// used when absent.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
