use thiserror::Error;

/// Errors originating from the glyph module.
#[derive(Error, Debug)]
pub enum GlyphError {
    /// Font file cannot be read from disk.
    #[error("cannot read font file {path}")]
    Read {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Font data is not a parseable TTF/OTF.
    #[error("invalid font data")]
    InvalidFont(#[from] ab_glyph::InvalidFont),
}
