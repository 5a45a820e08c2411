//! Examples command implementation for nbdoc CLI.
//!
//! Extracts file snippets from notebooks into numbered example files.

use std::path::PathBuf;

use nbdoc_core::{ExtractOptions, extract_examples};

use crate::colors;

/// Execute the examples command.
pub fn execute(notebooks: &[PathBuf], options: &ExtractOptions) -> anyhow::Result<()> {
    println!(
        "\n{}nbdoc Examples{} - Extracting file snippets",
        colors::BOLD,
        colors::RESET
    );
    println!("{}", "─".repeat(50));

    for notebook in notebooks {
        if !notebook.exists() {
            anyhow::bail!("Notebook not found: {}", notebook.display());
        }

        let report = extract_examples(notebook, options)?;

        println!(
            "  {}{}{}",
            colors::CYAN,
            notebook.display(),
            colors::RESET
        );
        for file in &report.files {
            println!("    {}✓{} {}", colors::GREEN, colors::RESET, file.display());
        }
        if report.files.is_empty() {
            println!("    {}no file snippets{}", colors::DIM, colors::RESET);
        }
        if report.rewritten_shell_cells > 0 {
            println!(
                "    {} shell cells rewritten → {}",
                report.rewritten_shell_cells,
                report.notebook_path.display()
            );
        }
    }

    Ok(())
}
