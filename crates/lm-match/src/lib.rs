/// Brightness matching engine for lumart.
///
/// Maintains a character set with raw and normalized brightness per member
/// and answers brightness → character queries under a selectable rounding
/// policy.

pub mod error;
pub mod matcher;
pub mod rounding;

pub use error::{MatchError, ParseRoundingError};
pub use matcher::{BrightnessMatcher, CharEntry};
pub use rounding::Rounding;
