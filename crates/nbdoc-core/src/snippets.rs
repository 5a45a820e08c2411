//! Example extraction.
//!
//! Pulls file-snippet cells out of a notebook into standalone numbered
//! source files, e.g. `loops01.py`, `loops02.py`, `example01.py`.
//!
//! The prefix comes from the nearest tag at or before the snippet that starts
//! with the configured tag prefix (`ex_loops` → `loops`). Numbering restarts
//! whenever the prefix changes. Shell cells that run a script can optionally
//! be pointed at the file extracted just before them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::{CellClass, classify};
use crate::error::{NbdocError, NbdocResult};
use crate::notebook::{Cell, Notebook};
use crate::options::ExtractOptions;

/// Shell command prefix that is eligible for rewriting.
const PYTHON_COMMAND: &str = "! python";

/// Extension of extracted files.
const SNIPPET_EXTENSION: &str = ".py";

/// An extracted source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// File name, e.g. `example01.py`
    pub filename: String,
    /// File contents
    pub contents: String,
}

/// Result of extracting snippets from one notebook in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Extracted files, in document order
    pub snippets: Vec<Snippet>,
    /// Number of shell cells pointed at an extracted file
    pub rewritten_shell_cells: usize,
}

/// Result of extracting snippets from a notebook file.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// Paths of the written snippet files
    pub files: Vec<PathBuf>,
    /// Number of shell cells pointed at an extracted file
    pub rewritten_shell_cells: usize,
    /// Where the (possibly edited) notebook was written
    pub notebook_path: PathBuf,
}

/// Find the example prefix in effect for the last of `cells`.
fn example_prefix(cells: &[Cell], options: &ExtractOptions) -> String {
    cells
        .iter()
        .rev()
        .find_map(|cell| {
            cell.tags()
                .iter()
                .find_map(|tag| tag.strip_prefix(options.tag_prefix.as_str()))
        })
        .unwrap_or(options.default_prefix.as_str())
        .to_string()
}

fn snippet_filename(prefix: &str, number: u32) -> String {
    format!("{}{:02}{}", prefix, number, SNIPPET_EXTENSION)
}

/// Stamp the file name as the snippet's header comment.
fn stamp_header(source: &mut Vec<String>, filename: &str) {
    let header = format!("# {}\n", filename);
    if source.get(1).is_some_and(|line| line.starts_with('#')) {
        source[1] = header;
    } else {
        source.insert(1.min(source.len()), header);
    }
}

/// Point `! python <script>.py <args>` at `filename`, keeping the arguments.
fn rewrite_shell_command(line: &str, filename: &str) -> Option<String> {
    if !line.starts_with(PYTHON_COMMAND) {
        return None;
    }
    if !line
        .split_whitespace()
        .any(|word| word.ends_with(SNIPPET_EXTENSION))
    {
        return None;
    }
    let (_, rest) = line.split_once(SNIPPET_EXTENSION)?;
    Some(format!("{} {}{}", PYTHON_COMMAND, filename, rest))
}

/// Extract snippets from a notebook, editing its cells in place.
pub fn extract_snippets(notebook: &mut Notebook, options: &ExtractOptions) -> Extraction {
    let mut extraction = Extraction::default();
    let mut number: u32 = 0;
    let first = notebook.cells.len().min(1);
    let mut previous_prefix = example_prefix(&notebook.cells[..first], options);
    let mut prefix = previous_prefix.clone();

    for index in 0..notebook.cells.len() {
        let class = classify(&notebook.cells[index], options.file_snippet_detection);

        match class {
            Some(CellClass::FileSnippet) => {
                prefix = example_prefix(&notebook.cells[..=index], options);
                if prefix == previous_prefix {
                    number += 1;
                } else {
                    number = 1;
                    previous_prefix = prefix.clone();
                }

                let filename = snippet_filename(&prefix, number);
                let source = &mut notebook.cells[index].source;
                stamp_header(source, &filename);
                tracing::debug!("cell {} extracted as {}", index, filename);

                extraction.snippets.push(Snippet {
                    contents: source[1..].concat(),
                    filename,
                });
            }
            Some(CellClass::Shell) if options.rewrite_shell_cells && number > 0 => {
                let filename = snippet_filename(&prefix, number);
                let source = &mut notebook.cells[index].source;
                if let Some(rewritten) = rewrite_shell_command(&source[0], &filename) {
                    tracing::debug!("cell {} now runs {}", index, filename);
                    source[0] = rewritten;
                    extraction.rewritten_shell_cells += 1;
                }
            }
            _ => {}
        }
    }

    extraction
}

/// Default path of the edited notebook.
pub fn edited_notebook_path(path: &Path, output_suffix: Option<&str>) -> PathBuf {
    match output_suffix {
        Some(suffix) if !suffix.is_empty() => path.with_extension(format!("{}.ipynb", suffix)),
        _ => path.to_path_buf(),
    }
}

/// Extract snippets from a notebook file.
///
/// Snippet files are written to `options.output_dir` (the current directory
/// by default) and the edited notebook is written back next to the input.
pub fn extract_examples(
    path: impl AsRef<Path>,
    options: &ExtractOptions,
) -> NbdocResult<ExtractionReport> {
    let path = path.as_ref();
    let mut notebook = Notebook::read_from_file(path)?;
    let extraction = extract_snippets(&mut notebook, options);

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    if !extraction.snippets.is_empty() {
        fs::create_dir_all(&output_dir).map_err(|e| NbdocError::write(&output_dir, e))?;
    }

    let mut files = Vec::with_capacity(extraction.snippets.len());
    for snippet in &extraction.snippets {
        let file = output_dir.join(&snippet.filename);
        fs::write(&file, &snippet.contents).map_err(|e| NbdocError::write(&file, e))?;
        files.push(file);
    }

    let notebook_path = edited_notebook_path(path, options.output_suffix.as_deref());
    notebook.write_to_file(&notebook_path)?;

    tracing::info!(
        "Extracted {} examples from {} ({} shell cells rewritten)",
        files.len(),
        path.display(),
        extraction.rewritten_shell_cells
    );

    Ok(ExtractionReport {
        files,
        rewritten_shell_cells: extraction.rewritten_shell_cells,
        notebook_path,
    })
}
