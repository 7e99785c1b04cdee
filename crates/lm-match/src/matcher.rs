use std::collections::HashMap;

use lm_core::traits::GlyphRasterizer;

use crate::error::MatchError;
use crate::rounding::Rounding;

/// Normalized brightness assigned to a set with no usable span: a single
/// member, or several members whose glyphs share one raw brightness.
const DEGENERATE_NORMALIZED: f64 = 0.5;

/// Brightness record for one character in the set.
#[derive(Clone, Copy, Debug)]
pub struct CharEntry {
    /// Fraction of ink cells in the character's glyph, in [0, 1]. Fixed for
    /// as long as the character stays in the set.
    pub raw: f64,
    /// `raw` rescaled to [0, 1] against the set's current raw extrema.
    pub normalized: f64,
}

/// Owns the active character set and answers brightness → character queries.
///
/// Every member carries a raw brightness (computed once, via the owned
/// rasterizer) and a normalized brightness rescaled against the set's raw
/// min/max. Mutations keep the normalized values consistent: an insertion
/// inside the current raw range touches only the new entry, while an
/// insertion extending the range, or any removal, renormalizes the whole
/// set.
pub struct BrightnessMatcher<R> {
    rasterizer: R,
    entries: HashMap<char, CharEntry>,
    min_raw: f64,
    max_raw: f64,
    rounding: Rounding,
}

impl<R: GlyphRasterizer> BrightnessMatcher<R> {
    /// Build a matcher seeded with `charset` (duplicates collapse).
    pub fn new(charset: &[char], rasterizer: R) -> Self {
        let mut matcher = Self {
            rasterizer,
            entries: HashMap::with_capacity(charset.len()),
            min_raw: f64::MAX,
            max_raw: f64::MIN,
            rounding: Rounding::default(),
        };
        for &ch in charset {
            if matcher.entries.contains_key(&ch) {
                continue;
            }
            let raw = matcher.rasterizer.rasterize(ch).ink_ratio();
            matcher.entries.insert(ch, CharEntry { raw, normalized: 0.0 });
            matcher.min_raw = matcher.min_raw.min(raw);
            matcher.max_raw = matcher.max_raw.max(raw);
        }
        matcher.renormalize_all();
        matcher
    }

    /// Add `ch` to the set. No-op if already present.
    ///
    /// If the new raw brightness sits inside the current raw range only the
    /// new entry is normalized; if it extends the range every entry is.
    ///
    /// Returns whether the set changed.
    pub fn add_char(&mut self, ch: char) -> bool {
        if self.entries.contains_key(&ch) {
            return false;
        }

        let raw = self.rasterizer.rasterize(ch).ink_ratio();

        if self.entries.is_empty() {
            self.min_raw = raw;
            self.max_raw = raw;
            self.entries.insert(
                ch,
                CharEntry {
                    raw,
                    normalized: DEGENERATE_NORMALIZED,
                },
            );
            return true;
        }

        if raw >= self.min_raw && raw <= self.max_raw {
            // extrema untouched, only this entry needs a value
            let normalized = self.normalize(raw);
            self.entries.insert(ch, CharEntry { raw, normalized });
            return true;
        }

        self.entries.insert(ch, CharEntry { raw, normalized: 0.0 });
        self.renormalize_all();
        true
    }

    /// Remove `ch` from the set. No-op if absent.
    ///
    /// Always renormalizes: the removed character may have carried an
    /// extremum, so the insertion fast path does not apply.
    ///
    /// Returns whether the set changed.
    pub fn remove_char(&mut self, ch: char) -> bool {
        if self.entries.remove(&ch).is_none() {
            return false;
        }
        self.renormalize_all();
        true
    }

    /// Best character for `target` brightness under the active rounding
    /// policy.
    ///
    /// # Errors
    /// Returns `MatchError::InsufficientCharset` when the set holds fewer
    /// than 2 characters.
    pub fn best_match(&self, target: f64) -> Result<char, MatchError> {
        let count = self.entries.len();
        if count < 2 {
            return Err(MatchError::InsufficientCharset { count });
        }
        self.rounding
            .select(
                target,
                self.entries.iter().map(|(&ch, e)| (ch, e.normalized)),
            )
            .ok_or(MatchError::InsufficientCharset { count })
    }

    /// Swap the rounding policy. Takes effect on the next `best_match`.
    pub fn set_rounding(&mut self, rounding: Rounding) {
        self.rounding = rounding;
    }

    /// Active rounding policy.
    #[must_use]
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Member characters, ascending by code point.
    #[must_use]
    pub fn chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.entries.keys().copied().collect();
        chars.sort_unstable();
        chars
    }

    /// Brightness record for `ch`, if present.
    #[must_use]
    pub fn entry(&self, ch: char) -> Option<CharEntry> {
        self.entries.get(&ch).copied()
    }

    /// Whether `ch` is in the set.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.entries.contains_key(&ch)
    }

    /// Number of characters in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn normalize(&self, raw: f64) -> f64 {
        let span = self.max_raw - self.min_raw;
        if span <= f64::EPSILON {
            return DEGENERATE_NORMALIZED;
        }
        (raw - self.min_raw) / span
    }

    fn renormalize_all(&mut self) {
        self.min_raw = f64::MAX;
        self.max_raw = f64::MIN;
        for entry in self.entries.values() {
            self.min_raw = self.min_raw.min(entry.raw);
            self.max_raw = self.max_raw.max(entry.raw);
        }

        let span = self.max_raw - self.min_raw;
        if self.entries.len() == 1 || span <= f64::EPSILON {
            for entry in self.entries.values_mut() {
                entry.normalized = DEGENERATE_NORMALIZED;
            }
            return;
        }

        let min = self.min_raw;
        for entry in self.entries.values_mut() {
            entry.normalized = (entry.raw - min) / span;
        }
        log::trace!(
            "renormalized {} entries over raw span [{:.4}, {:.4}]",
            self.entries.len(),
            self.min_raw,
            self.max_raw
        );
    }
}

#[cfg(test)]
mod tests {
    use lm_core::glyph::GlyphBitmap;

    use super::*;

    /// Deterministic stand-in: ink count fixed per character over a
    /// 20-cell grid.
    struct StubRasterizer;

    fn ink_cells(ch: char) -> usize {
        match ch {
            '.' => 0,
            ':' => 5,
            '+' => 10,
            'x' => 14,
            '#' | '@' => 20,
            _ => 8,
        }
    }

    impl GlyphRasterizer for StubRasterizer {
        fn rasterize(&self, ch: char) -> GlyphBitmap {
            let mut bm = GlyphBitmap::new(20, 1);
            for x in 0..ink_cells(ch) {
                bm.set(x, 0, true);
            }
            bm
        }
    }

    fn matcher(chars: &[char]) -> BrightnessMatcher<StubRasterizer> {
        BrightnessMatcher::new(chars, StubRasterizer)
    }

    fn normalized(m: &BrightnessMatcher<StubRasterizer>, ch: char) -> f64 {
        m.entry(ch).map(|e| e.normalized).unwrap_or(f64::NAN)
    }

    #[test]
    fn normalized_values_span_unit_interval() {
        let m = matcher(&['.', ':', '+', '#']);
        assert_eq!(normalized(&m, '.'), 0.0);
        assert_eq!(normalized(&m, '#'), 1.0);
        assert_eq!(normalized(&m, ':'), 0.25);
        assert_eq!(normalized(&m, '+'), 0.5);
    }

    #[test]
    fn duplicate_seed_characters_collapse() {
        let m = matcher(&['.', '#', '.', '#']);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn singleton_normalizes_to_half() {
        let m = matcher(&['+']);
        assert_eq!(normalized(&m, '+'), 0.5);
    }

    #[test]
    fn equal_raw_set_normalizes_to_half() {
        let m = matcher(&['#', '@']);
        assert_eq!(normalized(&m, '#'), 0.5);
        assert_eq!(normalized(&m, '@'), 0.5);
    }

    #[test]
    fn inside_range_add_leaves_others_untouched() {
        let mut m = matcher(&['.', '#']);
        assert!(m.add_char('+'));
        assert_eq!(normalized(&m, '.'), 0.0);
        assert_eq!(normalized(&m, '#'), 1.0);
        assert_eq!(normalized(&m, '+'), 0.5);
    }

    #[test]
    fn range_extending_add_renormalizes_everything() {
        let mut m = matcher(&[':', '+']);
        assert_eq!(normalized(&m, ':'), 0.0);
        assert_eq!(normalized(&m, '+'), 1.0);

        m.add_char('.');
        assert_eq!(normalized(&m, '.'), 0.0);
        assert_eq!(normalized(&m, ':'), 0.5);
        assert_eq!(normalized(&m, '+'), 1.0);
    }

    #[test]
    fn add_is_idempotent() {
        let mut m = matcher(&['.', '#']);
        assert!(!m.add_char('.'));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn remove_of_absent_char_is_noop() {
        let mut m = matcher(&['.', '#']);
        assert!(!m.remove_char('?'));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn add_then_remove_round_trips() {
        let mut m = matcher(&[':', '+', 'x']);
        let before: Vec<(char, f64)> = m
            .chars()
            .into_iter()
            .map(|ch| (ch, normalized(&m, ch)))
            .collect();

        assert!(m.add_char('.'));
        assert!(m.remove_char('.'));

        assert_eq!(m.chars(), vec![':', '+', 'x']);
        for (ch, value) in before {
            assert!(
                (normalized(&m, ch) - value).abs() < 1e-12,
                "normalized brightness of {ch:?} drifted"
            );
        }
    }

    #[test]
    fn removing_an_extremum_renormalizes() {
        let mut m = matcher(&['.', ':', '#']);
        m.remove_char('#');
        assert_eq!(normalized(&m, '.'), 0.0);
        assert_eq!(normalized(&m, ':'), 1.0);
    }

    #[test]
    fn removing_down_to_one_entry_degenerates_to_half() {
        let mut m = matcher(&['.', '#']);
        m.remove_char('.');
        assert_eq!(normalized(&m, '#'), 0.5);
    }

    #[test]
    fn best_match_requires_two_characters() {
        let m = matcher(&['+']);
        assert!(matches!(
            m.best_match(0.5),
            Err(MatchError::InsufficientCharset { count: 1 })
        ));

        let empty = matcher(&[]);
        assert!(empty.best_match(0.5).is_err());
    }

    #[test]
    fn best_match_is_idempotent() {
        let m = matcher(&['.', ':', '+', '#']);
        let first = m.best_match(0.3).unwrap();
        assert_eq!(m.best_match(0.3).unwrap(), first);
    }

    #[test]
    fn scenario_two_char_set_under_each_policy() {
        let mut m = matcher(&['.', '#']);
        assert_eq!(normalized(&m, '.'), 0.0);
        assert_eq!(normalized(&m, '#'), 1.0);

        assert_eq!(m.best_match(0.3).unwrap(), '.');
        m.set_rounding(Rounding::Up);
        assert_eq!(m.best_match(0.3).unwrap(), '#');
        m.set_rounding(Rounding::Down);
        assert_eq!(m.best_match(0.3).unwrap(), '.');
    }

    #[test]
    fn tie_break_ignores_insertion_order() {
        // '#' and '@' share a raw brightness; '@' has the higher code point
        let a = matcher(&['.', '#', '@']);
        let b = matcher(&['.', '@', '#']);
        assert_eq!(a.best_match(1.0).unwrap(), '@');
        assert_eq!(b.best_match(1.0).unwrap(), '@');
    }

    #[test]
    fn chars_lists_sorted() {
        let m = matcher(&['#', '.', ':']);
        assert_eq!(m.chars(), vec!['#', '.', ':']);
    }
}
