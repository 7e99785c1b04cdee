/// Glyph rasterization for lumart.
///
/// Two `GlyphRasterizer` implementations: a dependency-free bitmap table
/// and a font-backed software rasterizer.

pub mod bitmap;
pub mod error;
pub mod font;

pub use bitmap::BitmapRasterizer;
pub use error::GlyphError;
pub use font::FontRasterizer;
