use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, point};
use lm_core::glyph::GlyphBitmap;
use lm_core::traits::GlyphRasterizer;

use crate::error::GlyphError;

/// Font-backed rasterizer: renders each character into a square boolean
/// grid via ab_glyph software outlines. Printable ASCII is pre-rasterized
/// at construction; anything else is rasterized on demand.
///
/// Coverage ≥ 0.5 counts as ink. Characters without a glyph in the font
/// rasterize blank.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use lm_glyph::font::FontRasterizer;
/// let raster = FontRasterizer::from_file(Path::new("mono.ttf"), 16).unwrap();
/// ```
pub struct FontRasterizer {
    font: FontVec,
    size: u32,
    cache: HashMap<char, GlyphBitmap>,
}

impl FontRasterizer {
    /// Load a TTF/OTF from disk and pre-rasterize printable ASCII.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid font.
    pub fn from_file(path: &Path, size: u32) -> Result<Self, GlyphError> {
        let data = std::fs::read(path).map_err(|source| GlyphError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let font = FontVec::try_from_vec(data)?;

        let mut raster = Self {
            font,
            size,
            cache: HashMap::new(),
        };
        raster.cache_range(' '..='~');
        log::debug!(
            "font {} loaded, {} glyphs pre-rasterized at {size}px",
            path.display(),
            raster.cache.len()
        );
        Ok(raster)
    }

    fn cache_range(&mut self, range: RangeInclusive<char>) {
        for ch in range {
            let bm = self.outline(ch);
            self.cache.insert(ch, bm);
        }
    }

    fn outline(&self, ch: char) -> GlyphBitmap {
        let size = self.size as usize;
        let mut bm = GlyphBitmap::new(size, size);

        // glyph_id 0 = .notdef; render it blank rather than a "?" box
        let gid = self.font.glyph_id(ch);
        if gid.0 == 0 {
            return bm;
        }

        let scale = PxScale::from(self.size as f32);
        let ascent_px = self.font.ascent_unscaled() * scale.y / self.font.height_unscaled();
        let glyph = gid.with_scale_and_position(scale, point(0.0, ascent_px));

        if let Some(outline) = self.font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            #[allow(clippy::cast_possible_wrap)]
            outline.draw(|x, y, v| {
                let px = (x as i32 + bounds.min.x as i32).max(0) as usize;
                let py = (y as i32 + bounds.min.y as i32).max(0) as usize;
                if px < size && py < size && v >= 0.5 {
                    bm.set(px, py, true);
                }
            });
        }
        bm
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn rasterize(&self, ch: char) -> GlyphBitmap {
        self.cache
            .get(&ch)
            .cloned()
            .unwrap_or_else(|| self.outline(ch))
    }
}
