use thiserror::Error;

/// Errors originating from the tiling module.
#[derive(Error, Debug)]
pub enum TileError {
    /// The padded image cannot be split into `resolution` columns of
    /// equal-sized square tiles.
    #[error("image {width}×{height} cannot be split into {resolution} square tile columns")]
    Dimension {
        /// Padded image width.
        width: u32,
        /// Padded image height.
        height: u32,
        /// Requested column count.
        resolution: u32,
    },
}
