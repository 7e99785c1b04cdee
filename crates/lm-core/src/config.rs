use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Shell startup configuration. Serializable as TOML; every field has a sane
/// default so a partial (or absent) file is fine.
///
/// # Example
/// ```
/// use lm_core::config::AppConfig;
/// let config = AppConfig::default();
/// assert_eq!(config.resolution, 2);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AppConfig {
    /// Seed character set, one entry per distinct character.
    #[serde(default = "default_charset")]
    pub charset: String,
    /// Initial output resolution (columns of the character grid).
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    /// Where rendered art goes.
    #[serde(default)]
    pub output: OutputMode,
    /// Target file for HTML output.
    #[serde(default = "default_html_path")]
    pub html_path: PathBuf,
    /// Monospace font named in the HTML output.
    #[serde(default = "default_html_font")]
    pub html_font: String,
    /// Side of the square glyph grid used by the font rasterizer, in pixels.
    #[serde(default = "default_glyph_size")]
    pub glyph_size: u32,
    /// Optional font file; when set, glyph brightness comes from real glyph
    /// outlines instead of the built-in bitmap table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

fn default_charset() -> String {
    "0123456789".to_owned()
}

fn default_resolution() -> u32 {
    2
}

fn default_html_path() -> PathBuf {
    PathBuf::from("output.html")
}

fn default_html_font() -> String {
    "Courier New".to_owned()
}

fn default_glyph_size() -> u32 {
    16
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            charset: default_charset(),
            resolution: default_resolution(),
            output: OutputMode::default(),
            html_path: default_html_path(),
            html_font: default_html_font(),
            glyph_size: default_glyph_size(),
            font_path: None,
        }
    }
}

impl AppConfig {
    /// Check value ranges after deserialization or CLI overrides.
    ///
    /// # Errors
    /// Returns `CoreError::Config` when a field is out of range.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.resolution == 0 {
            return Err(CoreError::Config("resolution must be at least 1".to_owned()));
        }
        if self.charset.is_empty() {
            return Err(CoreError::Config("charset must not be empty".to_owned()));
        }
        if self.glyph_size == 0 {
            return Err(CoreError::Config("glyph_size must be at least 1".to_owned()));
        }
        Ok(())
    }
}

/// Output destination for rendered art.
///
/// # Example
/// ```
/// use lm_core::config::OutputMode;
/// let mode = OutputMode::default();
/// assert!(matches!(mode, OutputMode::Console));
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum OutputMode {
    /// Rows to stdout.
    #[default]
    Console,
    /// Standalone HTML page.
    Html,
}

/// Load a configuration from a TOML file.
///
/// A missing file is not an error: defaults are returned and a warning is
/// logged. A present but malformed file is an error.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        log::warn!("config {} not found, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("TOML parse error in {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.charset, "0123456789");
        assert_eq!(config.glyph_size, 16);
        assert_eq!(config.output, OutputMode::Console);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str("resolution = 8").unwrap();
        assert_eq!(config.resolution, 8);
        assert_eq!(config.charset, "0123456789");
        assert_eq!(config.html_font, "Courier New");
    }

    #[test]
    fn toml_round_trip() {
        let config = AppConfig {
            charset: " .:#@".to_owned(),
            resolution: 4,
            output: OutputMode::Html,
            ..AppConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.charset, " .:#@");
        assert_eq!(back.resolution, 4);
        assert_eq!(back.output, OutputMode::Html);
    }

    #[test]
    fn zero_resolution_rejected() {
        let config = AppConfig {
            resolution: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_charset_rejected() {
        let config = AppConfig {
            charset: String::new(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
