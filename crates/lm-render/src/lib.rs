/// Rendering for lumart: the pad → tile → match pipeline producing a
/// character grid, and the writers that put a grid somewhere.

pub mod error;
pub mod html;
pub mod renderer;
pub mod writer;

pub use error::RenderError;
pub use html::HtmlWriter;
pub use renderer::{render, render_with};
pub use writer::{ArtWriter, ConsoleWriter};
