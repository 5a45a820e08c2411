//! Integration tests for notebook → Markdown conversion.
//!
//! Tests the full pipeline against a fixture notebook covering every cell
//! class, plus example extraction on the same notebook.

use std::fs;
use std::path::{Path, PathBuf};

use nbdoc_core::{
    CellClass, ExtractOptions, FileSnippetDetection, Formatter, Notebook, RenderOptions,
    assemble, classify, convert_file, convert_files, extract_examples, extract_output,
};
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Copy the tutorial fixture into a fresh temporary directory.
fn tutorial_in_temp() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let path = temp.path().join("tutorial.ipynb");
    fs::copy(fixture("tutorial.ipynb"), &path).expect("Failed to copy fixture");
    (temp, path)
}

fn tutorial() -> Notebook {
    Notebook::read_from_file(fixture("tutorial.ipynb")).expect("Fixture should parse")
}

fn cells_of(notebook: &Notebook, class: CellClass) -> Vec<usize> {
    notebook
        .cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| classify(cell, FileSnippetDetection::Strict) == Some(class))
        .map(|(i, _)| i)
        .collect()
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_tutorial_renders_expected_markdown() {
    let expected = fs::read_to_string(fixture("tutorial.expected.md")).unwrap();
    let assembly = assemble(&tutorial(), &RenderOptions::default());

    assert_eq!(assembly.markdown, expected);
    assert!(assembly.fence_open, "Tutorial ends inside an interactive run");
}

#[test]
fn test_shell_outputs() {
    let notebook = tutorial();
    let shells = cells_of(&notebook, CellClass::Shell);
    let outputs: Vec<String> = shells
        .iter()
        .map(|&i| extract_output(&notebook.cells[i], CellClass::Shell))
        .collect();

    assert_eq!(outputs[0], "hello\n");
    assert_eq!(
        outputs[1],
        "File \"<string>\", line 1\n    print(-)\n           ^\nSyntaxError: invalid syntax\n"
    );
    assert_eq!(outputs[2], "Printing the input as integer number:  38\n");
    assert_eq!(
        outputs[3],
        "ValueError: invalid literal for int() with base 10: '-'\n"
    );
}

#[test]
fn test_file_snippets_hide_their_output() {
    let notebook = tutorial();
    let files = cells_of(&notebook, CellClass::FileSnippet);

    assert_eq!(files.len(), 2);
    for i in files {
        assert!(!notebook.cells[i].outputs().is_empty());
        assert_eq!(extract_output(&notebook.cells[i], CellClass::FileSnippet), "");
    }
}

#[test]
fn test_hidden_cell_is_absent() {
    let assembly = assemble(&tutorial(), &RenderOptions::default());
    assert!(!assembly.markdown.contains("secret"));
}

#[test]
fn test_loose_detection_matches_strict_on_writefile_cells() {
    let notebook = tutorial();
    let strict = assemble(&notebook, &RenderOptions::default());
    let loose = assemble(
        &notebook,
        &RenderOptions {
            file_snippet_detection: FileSnippetDetection::Loose,
            ..Default::default()
        },
    );
    assert_eq!(strict, loose);
}

// =============================================================================
// File Pipeline
// =============================================================================

#[test]
fn test_convert_file_writes_markdown_next_to_input() {
    let (_temp, path) = tutorial_in_temp();

    let written = convert_file(&path, None, &RenderOptions::default(), None).unwrap();

    assert_eq!(written, path.with_extension("md"));
    assert_eq!(
        fs::read_to_string(&written).unwrap(),
        fs::read_to_string(fixture("tutorial.expected.md")).unwrap()
    );
}

#[test]
fn test_convert_file_custom_output() {
    let (temp, path) = tutorial_in_temp();
    let output = temp.path().join("docs.md");

    let written =
        convert_file(&path, Some(output.as_path()), &RenderOptions::default(), None).unwrap();

    assert_eq!(written, output);
    assert!(output.exists());
    assert!(!path.with_extension("md").exists());
}

#[test]
fn test_convert_file_survives_missing_formatter() {
    let (_temp, path) = tutorial_in_temp();
    let formatter = Formatter::new("nbdoc-no-such-formatter", Vec::new());

    let written = convert_file(&path, None, &RenderOptions::default(), Some(&formatter));
    assert!(written.is_ok());
}

#[test]
fn test_convert_file_rejects_malformed_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.ipynb");
    fs::write(&path, r#"{"cells": [{"cell_type": "code"}]}"#).unwrap();

    assert!(convert_file(&path, None, &RenderOptions::default(), None).is_err());
}

#[test]
fn test_convert_file_missing_input() {
    let temp = TempDir::new().unwrap();
    let result = convert_file(
        temp.path().join("missing.ipynb"),
        None,
        &RenderOptions::default(),
        None,
    );
    assert!(matches!(result, Err(nbdoc_core::NbdocError::ReadError { .. })));
}

#[test]
fn test_convert_files_reports_each_file() {
    let (temp, good) = tutorial_in_temp();
    let bad = temp.path().join("bad.ipynb");
    fs::write(&bad, "not json").unwrap();

    let reports = convert_files(&[good.clone(), bad.clone()], &RenderOptions::default(), None);

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].input, good);
    assert!(reports[0].result.is_ok());
    assert_eq!(reports[1].input, bad);
    assert!(reports[1].result.is_err());
}

// =============================================================================
// Example Extraction
// =============================================================================

#[test]
fn test_extract_examples_from_tutorial() {
    let (temp, path) = tutorial_in_temp();
    let options = ExtractOptions {
        rewrite_shell_cells: true,
        output_dir: Some(temp.path().to_path_buf()),
        ..Default::default()
    };

    let report = extract_examples(&path, &options).unwrap();

    assert_eq!(
        report.files,
        vec![
            temp.path().join("example01.py"),
            temp.path().join("paths01.py")
        ]
    );
    assert_eq!(report.rewritten_shell_cells, 3);
    assert_eq!(report.notebook_path, path);

    assert_eq!(
        fs::read_to_string(temp.path().join("paths01.py")).unwrap(),
        "# paths01.py\nfrom pathlib import Path\ncwd = Path().cwd()\nprint(cwd)"
    );

    let edited = Notebook::read_from_file(&path).unwrap();
    let shells: Vec<&str> = edited
        .cells
        .iter()
        .filter(|c| classify(c, FileSnippetDetection::Strict) == Some(CellClass::Shell))
        .map(|c| c.source[0].as_str())
        .collect();
    assert_eq!(
        shells,
        [
            "! python -c \"print('hello')\"",
            "! python -c \"print(-)\"",
            "! python example01.py 38",
            "! python example01.py -",
            "! python paths01.py",
        ]
    );
}
