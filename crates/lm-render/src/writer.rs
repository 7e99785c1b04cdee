use std::io::Write;

use anyhow::{Context, Result};
use lm_core::frame::CharGrid;

/// Puts a rendered character grid somewhere a human can see it.
///
/// Implemented by: `ConsoleWriter`, `HtmlWriter`.
pub trait ArtWriter {
    /// Write the whole grid.
    ///
    /// # Errors
    /// Returns an error when the destination cannot be written.
    fn write(&mut self, grid: &CharGrid) -> Result<()>;
}

/// Writes the grid to stdout, one line per row.
///
/// # Example
/// ```
/// use lm_core::frame::CharGrid;
/// use lm_render::writer::{ArtWriter, ConsoleWriter};
/// let mut writer = ConsoleWriter;
/// writer.write(&CharGrid::new(1, 3)).unwrap();
/// ```
pub struct ConsoleWriter;

impl ArtWriter for ConsoleWriter {
    fn write(&mut self, grid: &CharGrid) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for row in 0..grid.rows {
            let line: String = grid.row(row).iter().collect();
            writeln!(out, "{line}").context("cannot write to stdout")?;
        }
        Ok(())
    }
}
