/// Image intake for lumart: file decoding, power-of-two padding, and
/// square-tile luminance aggregation.

pub mod decode;
pub mod error;
pub mod tiler;

pub use decode::load_image;
pub use error::TileError;
pub use tiler::{average_luminance, brightness_grid, pad, tiles, Tile};
