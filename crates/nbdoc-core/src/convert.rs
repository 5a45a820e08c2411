//! File-level conversion: notebook in, Markdown out.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::assemble::assemble;
use crate::error::{NbdocError, NbdocResult};
use crate::formatter::Formatter;
use crate::notebook::Notebook;
use crate::options::RenderOptions;

/// Outcome of converting one file in a batch.
#[derive(Debug)]
pub struct ConversionReport {
    /// Input notebook
    pub input: PathBuf,
    /// Written Markdown file, or why conversion failed
    pub result: NbdocResult<PathBuf>,
}

/// Get the default `.md` path for a notebook.
pub fn default_markdown_path(notebook_path: impl AsRef<Path>) -> PathBuf {
    notebook_path.as_ref().with_extension("md")
}

/// Convert a notebook file to Markdown.
///
/// Writes to `output`, or next to the input with a `.md` extension. When a
/// formatter is given it is run on the written file; its failure is logged,
/// not returned.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    options: &RenderOptions,
    formatter: Option<&Formatter>,
) -> NbdocResult<PathBuf> {
    let input = input.as_ref();
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_markdown_path(input));

    let notebook = Notebook::read_from_file(input)?;
    let assembly = assemble(&notebook, options);
    if assembly.fence_open {
        tracing::warn!(
            "{} ends inside a code snippet; the Markdown fence is not closed",
            input.display()
        );
    }

    fs::write(&output, &assembly.markdown).map_err(|e| NbdocError::write(&output, e))?;

    tracing::info!(
        "Converted {} → {} ({} cells)",
        input.display(),
        output.display(),
        notebook.cells.len()
    );

    if let Some(formatter) = formatter {
        formatter.run_detached(&output);
    }

    Ok(output)
}

/// Convert many notebooks, in parallel across files.
///
/// Each file is converted independently; a failure is reported for that file
/// and does not stop the others. Reports are returned in input order.
pub fn convert_files(
    inputs: &[PathBuf],
    options: &RenderOptions,
    formatter: Option<&Formatter>,
) -> Vec<ConversionReport> {
    inputs
        .par_iter()
        .map(|input| ConversionReport {
            input: input.clone(),
            result: convert_file(input, None, options, formatter),
        })
        .collect()
}

/// List the notebooks (`*.ipynb`) directly inside a directory, sorted.
pub fn find_notebooks(dir: impl AsRef<Path>) -> NbdocResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut notebooks = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| NbdocError::read(dir, e))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "ipynb") {
            notebooks.push(path);
        }
    }
    notebooks.sort();
    Ok(notebooks)
}
