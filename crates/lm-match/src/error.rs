use thiserror::Error;

/// Errors originating from the matching module.
#[derive(Error, Debug)]
pub enum MatchError {
    /// A brightness query needs at least 2 distinct characters to pick from.
    #[error("charset has {count} characters, at least 2 are required")]
    InsufficientCharset {
        /// Current character count.
        count: usize,
    },
}

/// Unrecognized rounding method token.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown rounding method: {0}")]
pub struct ParseRoundingError(pub String);
