//! Output extraction.
//!
//! Collapses the textual outputs of a cell into the single block of text that
//! is printed under its prompt.

use crate::classify::CellClass;
use crate::notebook::{Cell, Output, OutputText};

/// Marker identifying a Python traceback in captured output.
pub const TRACEBACK_MARKER: &str = "Traceback ";

/// Extract the text to render under a cell.
///
/// Outputs are concatenated in order. When the result contains a traceback,
/// only the last line of the last textual output is kept, which is the
/// exception message. The result is trimmed and ends in exactly one newline,
/// or is empty when the cell printed nothing at all.
///
/// File snippets never show output.
pub fn extract_output(cell: &Cell, class: CellClass) -> String {
    if class == CellClass::FileSnippet {
        return String::new();
    }

    let texts: Vec<OutputText<'_>> = cell.outputs().iter().filter_map(Output::text).collect();
    let mut out: String = texts.iter().map(OutputText::joined).collect();

    if out.contains(TRACEBACK_MARKER) {
        out = texts
            .last()
            .and_then(|text| text.lines().last())
            .cloned()
            .unwrap_or_default();
    }

    if out.is_empty() {
        String::new()
    } else {
        format!("{}\n", out.trim())
    }
}
