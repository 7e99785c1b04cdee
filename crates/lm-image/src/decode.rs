use std::path::Path;

use anyhow::{Context, Result};
use lm_core::frame::PixelImage;

/// Decode an image file into an RGB pixel grid.
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use lm_image::decode::load_image;
/// let image = load_image(Path::new("cat.jpeg")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<PixelImage> {
    let decoded = image::open(path).with_context(|| format!("cannot load {}", path.display()))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    log::debug!("loaded {} ({width}×{height})", path.display());
    PixelImage::from_raw(width, height, rgb.into_raw())
        .with_context(|| format!("decoded buffer mismatch for {}", path.display()))
}
