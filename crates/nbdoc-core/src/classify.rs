//! Cell classification.
//!
//! Every renderable cell falls into exactly one [`CellClass`]. The class is
//! computed once per cell and then drives a single exhaustive match.

use crate::notebook::{Cell, CellKind};

/// Prefix of a shell command line.
pub const SHELL_PREFIX: &str = "!";

/// Prefix of a cell magic line.
pub const MAGIC_PREFIX: &str = "%%";

/// What a cell renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellClass {
    /// Markdown prose, emitted as-is
    Markdown,
    /// `!command` line, emitted as a prompt plus its output
    Shell,
    /// `%%writefile`-style cell, emitted as a standalone source listing
    FileSnippet,
    /// Any other code, emitted as an interactive prompt session
    Interactive,
}

/// How strictly `%%` cells are recognised as file snippets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileSnippetDetection {
    /// `%%` first line followed by a second line starting with `#`
    #[default]
    Strict,
    /// `%%` first line alone
    Loose,
}

impl FileSnippetDetection {
    fn matches(self, source: &[String]) -> bool {
        let Some(first) = source.first() else {
            return false;
        };
        if !first.starts_with(MAGIC_PREFIX) {
            return false;
        }
        match self {
            FileSnippetDetection::Loose => true,
            FileSnippetDetection::Strict => source.get(1).is_some_and(|l| l.starts_with('#')),
        }
    }
}

/// Classify a cell. Returns `None` for cells that render nothing: code cells
/// without source and raw cells.
pub fn classify(cell: &Cell, detection: FileSnippetDetection) -> Option<CellClass> {
    match cell.cell_type {
        CellKind::Markdown => Some(CellClass::Markdown),
        CellKind::Raw => None,
        CellKind::Code => {
            let first = cell.source.first()?;
            let class = if first.starts_with(SHELL_PREFIX) {
                CellClass::Shell
            } else if detection.matches(&cell.source) {
                CellClass::FileSnippet
            } else {
                CellClass::Interactive
            };
            Some(class)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_of(source: &[&str]) -> Option<CellClass> {
        classify(&Cell::code(source.iter().copied()), FileSnippetDetection::Strict)
    }

    #[test]
    fn test_markdown_cell() {
        let cell = Cell::markdown(["# Title"]);
        assert_eq!(classify(&cell, FileSnippetDetection::Strict), Some(CellClass::Markdown));
    }

    #[test]
    fn test_empty_markdown_cell_is_still_markdown() {
        let cell = Cell::markdown(Vec::<String>::new());
        assert_eq!(classify(&cell, FileSnippetDetection::Loose), Some(CellClass::Markdown));
    }

    #[test]
    fn test_empty_code_cell_renders_nothing() {
        assert_eq!(class_of(&[]), None);
    }

    #[test]
    fn test_shell_cell() {
        assert_eq!(class_of(&["!ls -la"]), Some(CellClass::Shell));
        assert_eq!(class_of(&["! python script.py 38"]), Some(CellClass::Shell));
    }

    #[test]
    fn test_file_snippet_strict() {
        assert_eq!(
            class_of(&["%%writefile script.py\n", "# script.py\n", "x = 1"]),
            Some(CellClass::FileSnippet)
        );
        // Other cell magics fall through to interactive snippets.
        assert_eq!(class_of(&["%%time\n", "x = 1"]), Some(CellClass::Interactive));
        assert_eq!(class_of(&["%%writefile a.py"]), Some(CellClass::Interactive));
    }

    #[test]
    fn test_file_snippet_loose() {
        let cell = Cell::code(["%%time\n", "x = 1"]);
        assert_eq!(
            classify(&cell, FileSnippetDetection::Loose),
            Some(CellClass::FileSnippet)
        );
    }

    #[test]
    fn test_interactive_cell() {
        assert_eq!(class_of(&["x = 1\n", "x"]), Some(CellClass::Interactive));
        assert_eq!(class_of(&["%timeit x"]), Some(CellClass::Interactive));
    }

    #[test]
    fn test_raw_cell_renders_nothing() {
        let mut cell = Cell::markdown(["raw"]);
        cell.cell_type = CellKind::Raw;
        assert_eq!(classify(&cell, FileSnippetDetection::Strict), None);
    }

    #[test]
    fn test_code_classes_partition() {
        use CellClass::{FileSnippet, Interactive, Shell};
        use FileSnippetDetection::{Loose, Strict};

        let cases: &[(&[&str], CellClass, CellClass)] = &[
            (&["!echo"], Shell, Shell),
            (&["!%%odd"], Shell, Shell),
            (&["%%writefile x.py\n", "# x.py\n"], FileSnippet, FileSnippet),
            (&["%%bash\n", "echo hi"], Interactive, FileSnippet),
            (&["print(1)"], Interactive, Interactive),
            (&["\n"], Interactive, Interactive),
        ];
        for (source, strict, loose) in cases {
            let cell = Cell::code(source.iter().copied());
            assert_eq!(classify(&cell, Strict), Some(*strict), "strict: {:?}", source);
            assert_eq!(classify(&cell, Loose), Some(*loose), "loose: {:?}", source);
        }
    }
}
