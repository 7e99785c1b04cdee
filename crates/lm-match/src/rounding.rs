use std::str::FromStr;

use crate::error::ParseRoundingError;

/// Selection rule for brightness → character queries.
///
/// Every variant is deterministic for a fixed set of entries and target:
/// ties on equal difference always resolve to the numerically larger code
/// point, so the result never depends on map iteration order.
///
/// # Example
/// ```
/// use lm_match::rounding::Rounding;
/// let entries = [('.', 0.0), ('#', 1.0)];
/// assert_eq!(Rounding::Closest.select(0.3, entries), Some('.'));
/// assert_eq!(Rounding::Up.select(0.3, entries), Some('#'));
/// assert_eq!(Rounding::Down.select(0.3, entries), Some('.'));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rounding {
    /// Smallest absolute difference.
    #[default]
    Closest,
    /// Dimmest character at least as bright as the target.
    Up,
    /// Brightest character not exceeding the target.
    Down,
}

impl Rounding {
    /// Pick the character matching `target` out of `(char, brightness)`
    /// entries. Returns `None` only for an empty entry set.
    ///
    /// `Up` and `Down` constrain the sign of `brightness - target`; when no
    /// entry satisfies the constraint (target outside the entries' span),
    /// they fall back to the nearest achievable extreme. The candidate seed
    /// is always the first entry satisfying the constraint, never the first
    /// entry seen.
    pub fn select<I>(self, target: f64, entries: I) -> Option<char>
    where
        I: IntoIterator<Item = (char, f64)>,
    {
        match self {
            Self::Closest => {
                let mut best: Option<(char, f64)> = None;
                for (ch, brightness) in entries {
                    let diff = (brightness - target).abs();
                    best = Some(match best {
                        Some((bc, bd)) if diff > bd || (diff == bd && ch < bc) => (bc, bd),
                        _ => (ch, diff),
                    });
                }
                best.map(|(ch, _)| ch)
            }
            Self::Up => {
                let mut best: Option<(char, f64)> = None;
                let mut brightest: Option<(char, f64)> = None;
                for (ch, brightness) in entries {
                    let diff = brightness - target;
                    if diff >= 0.0 {
                        best = Some(match best {
                            Some((bc, bd)) if diff > bd || (diff == bd && ch < bc) => (bc, bd),
                            _ => (ch, diff),
                        });
                    }
                    brightest = Some(match brightest {
                        Some((bc, bb)) if brightness < bb || (brightness == bb && ch < bc) => {
                            (bc, bb)
                        }
                        _ => (ch, brightness),
                    });
                }
                best.or(brightest).map(|(ch, _)| ch)
            }
            Self::Down => {
                let mut best: Option<(char, f64)> = None;
                let mut dimmest: Option<(char, f64)> = None;
                for (ch, brightness) in entries {
                    let diff = brightness - target;
                    if diff <= 0.0 {
                        let dist = -diff;
                        best = Some(match best {
                            Some((bc, bd)) if dist > bd || (dist == bd && ch < bc) => (bc, bd),
                            _ => (ch, dist),
                        });
                    }
                    dimmest = Some(match dimmest {
                        Some((bc, bb)) if brightness > bb || (brightness == bb && ch < bc) => {
                            (bc, bb)
                        }
                        _ => (ch, brightness),
                    });
                }
                best.or(dimmest).map(|(ch, _)| ch)
            }
        }
    }
}

impl FromStr for Rounding {
    type Err = ParseRoundingError;

    /// Accepts the shell tokens `abs`, `up`, `down`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abs" => Ok(Self::Closest),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(ParseRoundingError(s.to_owned())),
        }
    }
}
