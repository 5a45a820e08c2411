//! File watcher for detecting notebook changes.
//!
//! Watches an `.ipynb` file and reports when it is saved or removed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify_debouncer_mini::{DebounceEventResult, new_debouncer, notify::RecursiveMode};
use tokio::sync::mpsc;

/// File change event.
#[derive(Debug, Clone)]
pub enum FileEvent {
    /// Notebook was written.
    Modified(PathBuf),
    /// Notebook was removed.
    Removed(PathBuf),
}

/// File watcher handle.
pub struct FileWatcher {
    /// Debouncer handle (kept alive to maintain watcher).
    _debouncer: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
    /// Receiver for file events.
    rx: mpsc::UnboundedReceiver<FileEvent>,
}

impl FileWatcher {
    /// Create a watcher for a single notebook file.
    pub fn new(notebook: impl AsRef<Path>) -> anyhow::Result<Self> {
        let target = notebook.as_ref().to_path_buf();
        let watch_dir = target.parent().unwrap_or(Path::new(".")).to_path_buf();

        let (tx, rx) = mpsc::unbounded_channel();

        let mut debouncer = new_debouncer(
            Duration::from_millis(200),
            move |result: DebounceEventResult| {
                let Ok(events) = result else {
                    return;
                };
                for event in events {
                    // Writes of the generated .md land in the same directory.
                    if event.path != target {
                        continue;
                    }

                    let file_event = if event.path.exists() {
                        FileEvent::Modified(event.path.clone())
                    } else {
                        FileEvent::Removed(event.path.clone())
                    };

                    let _ = tx.send(file_event);
                }
            },
        )?;

        debouncer
            .watcher()
            .watch(&watch_dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _debouncer: debouncer,
            rx,
        })
    }

    /// Receive the next file event.
    pub async fn recv(&mut self) -> Option<FileEvent> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_watcher_creation() {
        let temp = TempDir::new().unwrap();
        let notebook = temp.path().join("test.ipynb");
        fs::write(&notebook, r#"{"cells": []}"#).unwrap();

        let watcher = FileWatcher::new(&notebook);
        assert!(watcher.is_ok());
    }
}
