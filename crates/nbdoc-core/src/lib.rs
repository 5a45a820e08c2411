//! Notebook to Markdown conversion for nbdoc.
//!
//! Turns a Jupyter notebook into a single Markdown document for a
//! documentation site, and extracts its file snippets as standalone examples.
//!
//! # Architecture
//!
//! ```text
//! notebook.ipynb ──► Notebook ──► classify ──► render ──► assemble ──► notebook.md
//!                                                 │                        │
//!                                                 ▼                        ▼
//!                                          extract_output             Formatter
//!                                                                    (prettier)
//! ```
//!
//! Cells are rendered strictly in document order: a run of interactive
//! snippets shares one code fence, which the next non-interactive cell closes.

mod assemble;
mod classify;
mod convert;
mod error;
mod formatter;
mod notebook;
mod options;
mod output;
mod render;
mod snippets;

pub use assemble::{Assembly, assemble, assemble_cells};
pub use classify::{CellClass, FileSnippetDetection, classify};
pub use convert::{
    ConversionReport, convert_file, convert_files, default_markdown_path, find_notebooks,
};
pub use error::{NbdocError, NbdocResult};
pub use formatter::Formatter;
pub use notebook::{Cell, CellKind, CellMetadata, Notebook, Output, OutputData, OutputText};
pub use options::{
    DEFAULT_EXAMPLE_PREFIX, DEFAULT_HIDE_TAG, DEFAULT_TAG_PREFIX, ExtractOptions, RenderOptions,
};
pub use output::extract_output;
pub use render::{
    Fragment, render_cell, render_file_snippet, render_interactive, render_markdown, render_shell,
};
pub use snippets::{
    Extraction, ExtractionReport, Snippet, edited_notebook_path, extract_examples,
    extract_snippets,
};
