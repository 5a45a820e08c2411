//! Document assembly.
//!
//! Walks the cells in order, threading the open-fence flag from one
//! fragment to the next.

use crate::classify::classify;
use crate::notebook::{Cell, Notebook};
use crate::options::RenderOptions;
use crate::render::{Fragment, render_cell};

/// A rendered Markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    /// Concatenated fragments
    pub markdown: String,

    /// The document ends inside an interactive snippet whose fence was never
    /// closed. The text is left as rendered.
    pub fence_open: bool,
}

impl Assembly {
    fn push(mut self, fragment: Fragment) -> Self {
        self.markdown.push_str(&fragment.text);
        self.fence_open = fragment.fence_open;
        self
    }
}

/// Render every visible cell of a notebook into one Markdown document.
pub fn assemble(notebook: &Notebook, options: &RenderOptions) -> Assembly {
    assemble_cells(&notebook.cells, options)
}

/// Render a sequence of cells into one Markdown document.
pub fn assemble_cells(cells: &[Cell], options: &RenderOptions) -> Assembly {
    cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.has_tag(&options.hide_tag))
        .fold(Assembly::default(), |assembly, (index, cell)| {
            match classify(cell, options.file_snippet_detection) {
                Some(class) => {
                    tracing::debug!("cell {} rendered as {:?}", index, class);
                    let fragment = render_cell(cell, class, assembly.fence_open);
                    assembly.push(fragment)
                }
                None => {
                    tracing::debug!("cell {} has no content, skipped", index);
                    assembly
                }
            }
        })
}
