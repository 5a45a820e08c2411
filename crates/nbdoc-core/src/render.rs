//! Cell → Markdown rendering.
//!
//! Each renderer receives whether the previous fragment left a code fence
//! open and closes it first when needed. Only interactive snippets leave
//! their fence open, so a run of them renders as one continuous block.

use crate::classify::CellClass;
use crate::notebook::Cell;
use crate::output::extract_output;

/// Code fence delimiter.
pub const FENCE: &str = "```";

/// Prompt for a new interactive statement.
pub const PROMPT: &str = ">>> ";

/// Prompt for a continuation line.
pub const CONTINUATION: &str = "... ";

/// Rendered Markdown for one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Markdown text
    pub text: String,
    /// Whether the text ends inside an open code fence
    pub fence_open: bool,
}

impl Fragment {
    fn closed(text: String) -> Self {
        Self {
            text,
            fence_open: false,
        }
    }

    fn open(text: String) -> Self {
        Self {
            text,
            fence_open: true,
        }
    }
}

/// Dispatch a classified cell to its renderer.
pub fn render_cell(cell: &Cell, class: CellClass, fence_open: bool) -> Fragment {
    match class {
        CellClass::Markdown => render_markdown(cell, fence_open),
        CellClass::Shell => render_shell(cell, fence_open),
        CellClass::FileSnippet => render_file_snippet(cell, fence_open),
        CellClass::Interactive => render_interactive(cell, fence_open),
    }
}

fn close_fence(fence_open: bool) -> String {
    if fence_open {
        format!("{FENCE}\n")
    } else {
        String::new()
    }
}

/// Markdown prose, trimmed and followed by a blank line.
pub fn render_markdown(cell: &Cell, fence_open: bool) -> Fragment {
    let body = cell.source.concat();
    Fragment::closed(format!("{}{}\n\n", close_fence(fence_open), body.trim()))
}

/// Source listing of a file snippet, without its magic line.
pub fn render_file_snippet(cell: &Cell, fence_open: bool) -> Fragment {
    let body = cell.source.get(1..).unwrap_or_default().concat();
    Fragment::closed(format!(
        "{}{FENCE}python\n{}\n{FENCE}\n",
        close_fence(fence_open),
        body
    ))
}

/// Shell command shown as a `>` prompt followed by its output.
pub fn render_shell(cell: &Cell, fence_open: bool) -> Fragment {
    let command = cell
        .source
        .first()
        .map(|line| line.trim_start_matches('!').trim())
        .unwrap_or_default();
    let output = extract_output(cell, CellClass::Shell);
    Fragment::closed(format!(
        "{}{FENCE}\n> {}\n\n{}{FENCE}\n",
        close_fence(fence_open),
        command,
        output
    ))
}

/// Interactive prompt session. Leaves the fence open.
pub fn render_interactive(cell: &Cell, fence_open: bool) -> Fragment {
    let lines: String = cell
        .source
        .iter()
        .filter_map(|line| prompt_line(line))
        .collect();
    let opening = if fence_open {
        String::new()
    } else {
        format!("{FENCE}python\n")
    };
    let body = format!("{}{}", opening, lines);
    let output = extract_output(cell, CellClass::Interactive);
    Fragment::open(format!("{}\n{}", body.trim(), output))
}

/// Prefix a source line with the matching interpreter prompt.
///
/// Blank and indented lines continue the previous statement. A top-level
/// `pass` is interpreter filler and is dropped.
fn prompt_line(line: &str) -> Option<String> {
    if line.trim().is_empty() || line.starts_with(char::is_whitespace) {
        Some(format!("{CONTINUATION}{line}"))
    } else if line.trim_end() == "pass" {
        None
    } else {
        Some(format!("{PROMPT}{line}"))
    }
}
