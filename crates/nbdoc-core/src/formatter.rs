//! External Markdown formatter.
//!
//! After a document is written it can be handed to a formatter (prettier by
//! default) for whitespace normalization. Formatting is best effort: a
//! missing program or a failed run is logged and never fails a conversion.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{NbdocError, NbdocResult};

/// Formatter invoked as `<program> <args...> <file>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    /// Program name or path
    pub program: String,

    /// Arguments placed before the file path
    pub args: Vec<String>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            program: "prettier".to_string(),
            args: vec!["--write".to_string()],
        }
    }
}

impl Formatter {
    /// Create a formatter for an arbitrary program.
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = String>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Locate the program in PATH.
    fn locate(&self) -> NbdocResult<PathBuf> {
        which::which(&self.program)
            .map_err(|_| NbdocError::Formatter(format!("{} not found in PATH", self.program)))
    }

    /// Run the formatter on a file.
    pub fn run(&self, file: &Path) -> NbdocResult<()> {
        let program = self.locate()?;
        let status = Command::new(&program)
            .args(&self.args)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| NbdocError::Formatter(format!("Failed to run {}: {}", self.program, e)))?;

        if !status.success() {
            return Err(NbdocError::Formatter(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        Ok(())
    }

    /// Run the formatter, logging instead of failing.
    pub fn run_detached(&self, file: &Path) {
        match self.run(file) {
            Ok(()) => tracing::debug!("Formatted {} with {}", file.display(), self.program),
            Err(e) => tracing::warn!("Skipping formatting of {}: {}", file.display(), e),
        }
    }
}
