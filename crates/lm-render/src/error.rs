use lm_image::TileError;
use lm_match::MatchError;
use thiserror::Error;

/// Errors a render can surface.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Character set too small for matching.
    #[error(transparent)]
    Charset(#[from] MatchError),

    /// Image cannot be partitioned at the requested resolution.
    #[error(transparent)]
    Tiling(#[from] TileError),
}
