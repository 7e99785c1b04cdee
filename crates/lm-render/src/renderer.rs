use lm_core::frame::{CharGrid, PixelImage};
use lm_core::traits::GlyphRasterizer;
use lm_image::tiler::brightness_grid;
use lm_match::error::MatchError;
use lm_match::matcher::BrightnessMatcher;
use lm_match::rounding::Rounding;

use crate::error::RenderError;

/// Convert `image` into a character grid: build a matcher from `charset`,
/// aggregate per-tile luminance at `resolution` columns, and pick the best
/// character for every tile.
///
/// Pure in its inputs: the same image, charset, resolution, rounding, and
/// rasterizer always produce the same grid.
///
/// # Errors
/// Returns `RenderError::Charset` for fewer than 2 distinct characters and
/// `RenderError::Tiling` when the padded image cannot be evenly partitioned.
pub fn render<R: GlyphRasterizer>(
    image: &PixelImage,
    charset: &[char],
    resolution: u32,
    rounding: Rounding,
    rasterizer: R,
) -> Result<CharGrid, RenderError> {
    let mut matcher = BrightnessMatcher::new(charset, rasterizer);
    matcher.set_rounding(rounding);
    render_with(&matcher, image, resolution)
}

/// Like [`render`], but against an already-built matcher. The shell keeps a
/// live matcher across commands (incremental renormalization on add/remove)
/// and renders with it directly.
///
/// # Errors
/// Same surface as [`render`].
pub fn render_with<R: GlyphRasterizer>(
    matcher: &BrightnessMatcher<R>,
    image: &PixelImage,
    resolution: u32,
) -> Result<CharGrid, RenderError> {
    if matcher.len() < 2 {
        return Err(MatchError::InsufficientCharset {
            count: matcher.len(),
        }
        .into());
    }

    let brightness = brightness_grid(image, resolution)?;
    let mut grid = CharGrid::new(brightness.rows, brightness.cols);
    for row in 0..brightness.rows {
        for col in 0..brightness.cols {
            let ch = matcher.best_match(brightness.get(row, col))?;
            grid.set(row, col, ch);
        }
    }
    log::debug!(
        "rendered {}×{} cells from {}×{} pixels",
        grid.cols,
        grid.rows,
        image.width,
        image.height
    );
    Ok(grid)
}
