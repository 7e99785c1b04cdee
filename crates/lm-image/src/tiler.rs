use lm_core::frame::{BrightnessGrid, PixelImage};
use rayon::prelude::*;

use crate::error::TileError;

/// One square sub-region of a padded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Left edge, in pixels.
    pub x: u32,
    /// Top edge, in pixels.
    pub y: u32,
    /// Side length, in pixels.
    pub side: u32,
}

/// Pad an image to power-of-two dimensions with white, original centered.
///
/// Width and height are padded independently, each to the smallest power of
/// two that fits. An odd difference puts the extra pixel at the right/bottom
/// edge. The input is never mutated; already power-of-two images come back
/// unchanged.
///
/// # Example
/// ```
/// use lm_core::frame::PixelImage;
/// use lm_image::tiler::pad;
/// let padded = pad(&PixelImage::blank(3, 5));
/// assert_eq!((padded.width, padded.height), (4, 8));
/// ```
#[must_use]
pub fn pad(image: &PixelImage) -> PixelImage {
    let new_w = image.width.next_power_of_two();
    let new_h = image.height.next_power_of_two();
    if new_w == image.width && new_h == image.height {
        return image.clone();
    }

    let x_off = (new_w - image.width) / 2;
    let y_off = (new_h - image.height) / 2;

    let mut padded = PixelImage::blank(new_w, new_h);
    for y in 0..image.height {
        for x in 0..image.width {
            padded.set_pixel(x + x_off, y + y_off, image.pixel(x, y));
        }
    }
    log::debug!(
        "padded {}×{} to {new_w}×{new_h}",
        image.width,
        image.height
    );
    padded
}

/// Split a padded image into `resolution` columns of square tiles, row-major.
///
/// # Errors
/// Returns `TileError::Dimension` if `resolution` is 0, the width is not
/// divisible by `resolution`, or the height is not divisible by the
/// resulting tile side.
pub fn tiles(padded: &PixelImage, resolution: u32) -> Result<Vec<Tile>, TileError> {
    let side = tile_side(padded, resolution)?;
    let rows = padded.height / side;

    let mut out = Vec::with_capacity((rows * resolution) as usize);
    for row in 0..rows {
        for col in 0..resolution {
            out.push(Tile {
                x: col * side,
                y: row * side,
                side,
            });
        }
    }
    Ok(out)
}

fn tile_side(padded: &PixelImage, resolution: u32) -> Result<u32, TileError> {
    let err = TileError::Dimension {
        width: padded.width,
        height: padded.height,
        resolution,
    };
    if resolution == 0 || padded.width % resolution != 0 {
        return Err(err);
    }
    let side = padded.width / resolution;
    if side == 0 || padded.height % side != 0 {
        return Err(err);
    }
    Ok(side)
}

/// Average luminance of one tile, normalized to [0.0, 1.0].
///
/// # Example
/// ```
/// use lm_core::frame::PixelImage;
/// use lm_image::tiler::{average_luminance, Tile};
/// let white = PixelImage::blank(4, 4);
/// let tile = Tile { x: 0, y: 0, side: 4 };
/// assert_eq!(average_luminance(&white, tile), 1.0);
/// ```
#[must_use]
pub fn average_luminance(image: &PixelImage, tile: Tile) -> f64 {
    let mut total = 0.0;
    for y in tile.y..tile.y + tile.side {
        for x in tile.x..tile.x + tile.side {
            total += image.luminance(x, y);
        }
    }
    total / (f64::from(tile.side) * f64::from(tile.side)) / 255.0
}

/// Pad `image`, split it into `resolution` columns of square tiles, and
/// aggregate each tile's average luminance. Tile rows are computed in
/// parallel.
///
/// # Errors
/// Returns `TileError::Dimension` when the padded image cannot be evenly
/// partitioned (see [`tiles`]).
pub fn brightness_grid(image: &PixelImage, resolution: u32) -> Result<BrightnessGrid, TileError> {
    let padded = pad(image);
    let grid_tiles = tiles(&padded, resolution)?;
    let rows = grid_tiles.len() / resolution as usize;

    let values: Vec<f64> = grid_tiles
        .par_iter()
        .map(|&tile| average_luminance(&padded, tile))
        .collect();

    Ok(BrightnessGrid::from_values(rows, resolution as usize, values))
}
