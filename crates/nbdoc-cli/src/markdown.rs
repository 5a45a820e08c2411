//! Md command implementation for nbdoc CLI.
//!
//! Converts notebooks to Markdown, once or on every save.

use std::path::{Path, PathBuf};
use std::time::Instant;

use nbdoc_core::{Formatter, RenderOptions, convert_file, convert_files, default_markdown_path};

use crate::colors;
use crate::watcher::{FileEvent, FileWatcher};

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn print_header(title: &str) {
    println!(
        "\n{}nbdoc {}{} - Converting to Markdown",
        colors::BOLD,
        title,
        colors::RESET
    );
    println!("{}", "─".repeat(50));
}

/// Execute the md command.
pub fn execute(
    notebooks: &[PathBuf],
    output: Option<&Path>,
    options: &RenderOptions,
    formatter: Option<&Formatter>,
) -> anyhow::Result<()> {
    if output.is_some() && notebooks.len() > 1 {
        anyhow::bail!("--output can only be used with a single notebook");
    }

    print_header("Md");
    let start = Instant::now();

    if let [notebook] = notebooks {
        convert_one(notebook, output, options, formatter)?;
        return Ok(());
    }

    let reports = convert_files(notebooks, options, formatter);
    let mut failed = 0;
    for report in &reports {
        match &report.result {
            Ok(written) => println!(
                "  {} → {} {}✓{}",
                file_name(&report.input),
                file_name(written),
                colors::GREEN,
                colors::RESET
            ),
            Err(e) => {
                failed += 1;
                println!(
                    "  {} {}✗{} {}",
                    file_name(&report.input),
                    colors::RED,
                    colors::RESET,
                    e
                );
            }
        }
    }

    println!("{}", "─".repeat(50));
    println!(
        "Converted {} of {} notebooks in {:.2}ms",
        reports.len() - failed,
        reports.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    if failed > 0 {
        anyhow::bail!("{} of {} notebooks failed to convert", failed, reports.len());
    }

    Ok(())
}

/// Convert a single notebook, printing progress.
fn convert_one(
    notebook: &Path,
    output: Option<&Path>,
    options: &RenderOptions,
    formatter: Option<&Formatter>,
) -> anyhow::Result<()> {
    if !notebook.exists() {
        anyhow::bail!("Notebook not found: {}", notebook.display());
    }

    let start = Instant::now();
    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_markdown_path(notebook));

    print!("  {} → {} ... ", file_name(notebook), file_name(&target));
    colors::flush_stdout();

    convert_file(notebook, Some(target.as_path()), options, formatter)?;

    println!(
        "{}✓{} ({:.2}ms)",
        colors::GREEN,
        colors::RESET,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}

/// Convert a notebook, then convert it again whenever it changes.
pub async fn watch(
    notebooks: &[PathBuf],
    output: Option<&Path>,
    options: &RenderOptions,
    formatter: Option<&Formatter>,
) -> anyhow::Result<()> {
    let [notebook] = notebooks else {
        anyhow::bail!("--watch needs exactly one notebook");
    };
    if !notebook.exists() {
        anyhow::bail!("Notebook not found: {}", notebook.display());
    }
    let abs_path = notebook.canonicalize()?;

    print_header("Watch");
    println!(
        "{}Watching{} {} for changes...",
        colors::CYAN,
        colors::RESET,
        notebook.display()
    );
    println!("{}Press Ctrl+C to stop.{}\n", colors::DIM, colors::RESET);

    // Initial conversion
    convert_one(&abs_path, output, options, formatter)?;

    let mut watcher = FileWatcher::new(&abs_path)
        .map_err(|e| anyhow::anyhow!("Failed to create file watcher: {}", e))?;

    loop {
        tokio::select! {
            event = watcher.recv() => match event {
                Some(FileEvent::Modified(path)) => {
                    println!(
                        "\n{}{} changed, converting...{}",
                        colors::YELLOW,
                        file_name(&path),
                        colors::RESET
                    );
                    if let Err(e) = convert_one(&abs_path, output, options, formatter) {
                        eprintln!("{}Error:{} {}", colors::RED, colors::RESET, e);
                    }
                }
                Some(FileEvent::Removed(path)) => {
                    eprintln!(
                        "\n{}Warning:{} Notebook file removed: {}",
                        colors::YELLOW,
                        colors::RESET,
                        path.display()
                    );
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
