//! Configuration for rendering and example extraction.

use std::path::PathBuf;

use crate::classify::FileSnippetDetection;

/// Tag that removes a cell from the rendered document.
pub const DEFAULT_HIDE_TAG: &str = "to_hide";

/// Tag prefix naming the example files extracted after it.
pub const DEFAULT_TAG_PREFIX: &str = "ex_";

/// File name prefix used when no example tag precedes a snippet.
pub const DEFAULT_EXAMPLE_PREFIX: &str = "example";

/// Configuration for notebook rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Cells carrying this tag are skipped entirely
    pub hide_tag: String,

    /// How `%%` cells are recognised as file snippets
    pub file_snippet_detection: FileSnippetDetection,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            hide_tag: DEFAULT_HIDE_TAG.to_string(),
            file_snippet_detection: FileSnippetDetection::default(),
        }
    }
}

/// Configuration for example extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Tags starting with this name an example prefix
    pub tag_prefix: String,

    /// Prefix used when no tag names one
    pub default_prefix: String,

    /// Point `! python <file>.py` shell cells at the extracted file
    pub rewrite_shell_cells: bool,

    /// Write the edited notebook to `<stem>.<suffix>.ipynb` instead of in place
    pub output_suffix: Option<String>,

    /// Directory for extracted files (the current directory when `None`)
    pub output_dir: Option<PathBuf>,

    /// How `%%` cells are recognised as file snippets
    pub file_snippet_detection: FileSnippetDetection,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            default_prefix: DEFAULT_EXAMPLE_PREFIX.to_string(),
            rewrite_shell_cells: false,
            output_suffix: None,
            output_dir: None,
            file_snippet_detection: FileSnippetDetection::default(),
        }
    }
}
