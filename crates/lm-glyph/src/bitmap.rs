use std::collections::HashMap;

use lm_core::glyph::GlyphBitmap;
use lm_core::traits::GlyphRasterizer;

/// Glyph grid side for the built-in table.
pub const BITMAP_SIZE: usize = 5;

/// Built-in 5×5 glyphs, one byte per row, low 5 bits used (MSB = leftmost).
const GLYPH_TABLE: &[(char, [u8; 5])] = &[
    (' ', [0b00000, 0b00000, 0b00000, 0b00000, 0b00000]),
    ('.', [0b00000, 0b00000, 0b00000, 0b00100, 0b00000]),
    (',', [0b00000, 0b00000, 0b00000, 0b00110, 0b00100]),
    (':', [0b00000, 0b00100, 0b00000, 0b00100, 0b00000]),
    (';', [0b00100, 0b00000, 0b00100, 0b01000, 0b00000]),
    ('-', [0b00000, 0b00000, 0b11111, 0b00000, 0b00000]),
    ('=', [0b00000, 0b11111, 0b00000, 0b11111, 0b00000]),
    ('+', [0b00100, 0b00100, 0b11111, 0b00100, 0b00100]),
    ('*', [0b00100, 0b10101, 0b01110, 0b10101, 0b00100]),
    ('/', [0b00001, 0b00010, 0b00100, 0b01000, 0b10000]),
    ('\\', [0b10000, 0b01000, 0b00100, 0b00010, 0b00001]),
    ('|', [0b00100, 0b00100, 0b00100, 0b00100, 0b00100]),
    ('o', [0b00000, 0b01110, 0b10001, 0b01110, 0b00000]),
    ('#', [0b01010, 0b11111, 0b01010, 0b11111, 0b01010]),
    ('%', [0b11001, 0b11010, 0b00100, 0b01011, 0b10011]),
    ('@', [0b01110, 0b10011, 0b10101, 0b10111, 0b01110]),
    ('0', [0b01110, 0b10001, 0b10001, 0b10001, 0b01110]),
    ('1', [0b00100, 0b01100, 0b00100, 0b00100, 0b00100]),
    ('2', [0b11110, 0b00001, 0b01110, 0b10000, 0b11111]),
    ('3', [0b11110, 0b00001, 0b00111, 0b00001, 0b11110]),
    ('4', [0b00010, 0b00110, 0b01010, 0b11111, 0b00010]),
    ('5', [0b11111, 0b10000, 0b11110, 0b00001, 0b11110]),
    ('6', [0b01110, 0b10000, 0b11110, 0b10001, 0b01110]),
    ('7', [0b11111, 0b00001, 0b00010, 0b00100, 0b00100]),
    ('8', [0b11111, 0b10001, 0b01110, 0b10001, 0b11111]),
    ('9', [0b01110, 0b10001, 0b01111, 0b00001, 0b01110]),
];

/// Built-in rasterizer: a hardcoded bitmap table for common characters plus
/// a density estimate for everything else. Needs no font file, so the shell
/// can always run with it.
///
/// # Example
/// ```
/// use lm_glyph::bitmap::BitmapRasterizer;
/// use lm_core::traits::GlyphRasterizer;
/// let raster = BitmapRasterizer::new();
/// assert_eq!(raster.rasterize(' ').ink_ratio(), 0.0);
/// ```
pub struct BitmapRasterizer {
    glyphs: HashMap<char, GlyphBitmap>,
}

impl BitmapRasterizer {
    /// Build the rasterizer, decoding the bitmap table once.
    #[must_use]
    pub fn new() -> Self {
        let mut glyphs = HashMap::with_capacity(GLYPH_TABLE.len());
        for &(ch, rows) in GLYPH_TABLE {
            glyphs.insert(ch, decode_rows(rows));
        }
        Self { glyphs }
    }
}

impl Default for BitmapRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphRasterizer for BitmapRasterizer {
    fn rasterize(&self, ch: char) -> GlyphBitmap {
        self.glyphs
            .get(&ch)
            .cloned()
            .unwrap_or_else(|| estimated(ch))
    }
}

fn decode_rows(rows: [u8; 5]) -> GlyphBitmap {
    let mut bm = GlyphBitmap::new(BITMAP_SIZE, BITMAP_SIZE);
    for (y, &row) in rows.iter().enumerate() {
        for x in 0..BITMAP_SIZE {
            bm.set(x, y, (row >> (BITMAP_SIZE - 1 - x)) & 1 == 1);
        }
    }
    bm
}

/// Approximate glyph for a character outside the table: ink cells spread
/// evenly over the grid, count chosen by character class.
fn estimated(ch: char) -> GlyphBitmap {
    let density = match ch {
        'a'..='z' => 11,
        'A'..='Z' => 14,
        '0'..='9' => 12,
        _ => 7,
    };
    let mut bm = GlyphBitmap::new(BITMAP_SIZE, BITMAP_SIZE);
    let cells = BITMAP_SIZE * BITMAP_SIZE;
    // stride 7 is coprime with 25, so the walk visits distinct cells
    for k in 0..density {
        let idx = (k * 7 + 3) % cells;
        bm.set(idx % BITMAP_SIZE, idx / BITMAP_SIZE, true);
    }
    bm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_is_blank() {
        let raster = BitmapRasterizer::new();
        assert_eq!(raster.rasterize(' ').ink_ratio(), 0.0);
    }

    #[test]
    fn dot_has_single_ink_cell() {
        let raster = BitmapRasterizer::new();
        assert_eq!(raster.rasterize('.').ink_ratio(), 1.0 / 25.0);
    }

    #[test]
    fn hash_is_denser_than_dot() {
        let raster = BitmapRasterizer::new();
        assert!(raster.rasterize('#').ink_ratio() > raster.rasterize('.').ink_ratio());
    }

    #[test]
    fn rasterize_is_deterministic() {
        let raster = BitmapRasterizer::new();
        for ch in [' ', '.', '@', '5', 'q', 'Z', '~'] {
            assert_eq!(raster.rasterize(ch), raster.rasterize(ch));
        }
    }

    #[test]
    fn fallback_density_by_class() {
        let raster = BitmapRasterizer::new();
        let lower = raster.rasterize('q').ink_ratio();
        let upper = raster.rasterize('Q').ink_ratio();
        assert_eq!(lower, 11.0 / 25.0);
        assert_eq!(upper, 14.0 / 25.0);
    }

    #[test]
    fn fallback_cells_are_distinct() {
        let raster = BitmapRasterizer::new();
        let bm = raster.rasterize('Z');
        let ink = bm.bits.iter().filter(|&&b| b).count();
        assert_eq!(ink, 14);
    }
}
