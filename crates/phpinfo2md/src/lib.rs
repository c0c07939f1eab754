//! Converts a saved `phpinfo()` page into a Markdown document.
//!
//! The pipeline is [`extract_blocks`] followed by [`render_markdown`];
//! [`convert`] runs both and applies the output options.

mod block;
mod dom;
mod error;
mod extract;
mod render;
mod sanitize;

pub use block::{Block, HeadingLevel, Row, Table};
pub use error::{ConvertError, ConvertResult};
pub use extract::extract_blocks;
pub use render::{render_markdown, HIDE_EMPTY_CELLS_STYLE};
pub use sanitize::sanitize_cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append a style rule hiding empty table cells.
    pub hide_empty_cells: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            hide_empty_cells: true,
        }
    }
}

/// Converts raw page bytes into Markdown.
///
/// Fails with [`ConvertError::EmptyInput`] for empty input and
/// [`ConvertError::NoContent`] when nothing renderable was found.
pub fn convert(input: &[u8], options: &RenderOptions) -> ConvertResult<String> {
    let blocks = extract_blocks(input)?;
    let mut markdown = render_markdown(&blocks);

    if markdown.is_empty() {
        return Err(ConvertError::NoContent);
    }

    if options.hide_empty_cells {
        markdown.push_str(HIDE_EMPTY_CELLS_STYLE);
    }

    Ok(markdown)
}
