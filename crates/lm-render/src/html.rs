use std::path::PathBuf;

use anyhow::{Context, Result};
use lm_core::frame::CharGrid;

use crate::writer::ArtWriter;

/// Writes the grid as a standalone HTML page with a monospace `<pre>` block.
///
/// The page is rewritten from scratch on every call.
pub struct HtmlWriter {
    path: PathBuf,
    font: String,
}

impl HtmlWriter {
    /// Writer targeting `path`, naming `font` in the page style.
    #[must_use]
    pub fn new(path: PathBuf, font: &str) -> Self {
        Self {
            path,
            font: font.to_owned(),
        }
    }
}

impl ArtWriter for HtmlWriter {
    fn write(&mut self, grid: &CharGrid) -> Result<()> {
        std::fs::write(&self.path, render_html(grid, &self.font))
            .with_context(|| format!("cannot write {}", self.path.display()))?;
        log::info!("wrote {}", self.path.display());
        Ok(())
    }
}

/// Render a grid into a full HTML document.
///
/// Cell characters are HTML-escaped; rows map to lines of a `<pre>` block so
/// the grid keeps its shape in any browser.
#[must_use]
pub fn render_html(grid: &CharGrid, font: &str) -> String {
    let mut body = String::with_capacity(grid.cells.len() + 256);
    for row in 0..grid.rows {
        for &ch in grid.row(row) {
            match ch {
                '&' => body.push_str("&amp;"),
                '<' => body.push_str("&lt;"),
                '>' => body.push_str("&gt;"),
                _ => body.push(ch),
            }
        }
        body.push('\n');
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>lumart</title>\n\
         </head>\n<body style=\"background-color:#ffffff\">\n\
         <pre style=\"font-family:'{font}',monospace;font-size:8px;letter-spacing:2px\">\n\
         {body}</pre>\n</body>\n</html>\n"
    )
}
