//! Jupyter notebook (.ipynb) model.
//!
//! Only the fields the renderer reads are typed. Everything else is kept in
//! flattened maps so a notebook can be read, edited and written back intact.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{NbdocError, NbdocResult};

/// A Jupyter notebook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    /// Notebook cells, in document order
    pub cells: Vec<Cell>,

    /// Notebook metadata, format version and anything else
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Type of cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// Markdown prose
    Markdown,
    /// Code, possibly with outputs
    Code,
    /// Raw cell, never rendered
    Raw,
}

/// A Jupyter cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Cell type
    pub cell_type: CellKind,

    /// Cell source (lines, each normally ending in `\n`)
    #[serde(deserialize_with = "multiline")]
    pub source: Vec<String>,

    /// Cell metadata
    #[serde(default)]
    pub metadata: CellMetadata,

    /// Cell outputs (code cells only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Output>>,

    /// Other cell fields (`id`, `execution_count`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cell metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellMetadata {
    /// Tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Other metadata keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cell output.
///
/// Kept loose on purpose: only `stream` and `execute_result` outputs carry
/// text the renderer uses, every other output type passes through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    /// Output type (`stream`, `execute_result`, `display_data`, `error`, ...)
    pub output_type: String,

    /// Stream text
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_multiline"
    )]
    pub text: Option<Vec<String>>,

    /// Rich output data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<OutputData>,

    /// Other output fields (`name`, `metadata`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Output data with multiple representations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputData {
    /// Plain text
    #[serde(
        rename = "text/plain",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_multiline"
    )]
    pub text_plain: Option<Vec<String>>,

    /// Other MIME representations
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Textual content of an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputText<'a> {
    /// Text written to stdout/stderr
    Stream(&'a [String]),
    /// Plain-text representation of an evaluated expression
    Result(&'a [String]),
}

impl<'a> OutputText<'a> {
    /// The raw lines of this output.
    pub fn lines(&self) -> &'a [String] {
        match *self {
            OutputText::Stream(lines) | OutputText::Result(lines) => lines,
        }
    }

    /// The lines joined into one string.
    pub fn joined(&self) -> String {
        self.lines().concat()
    }
}

/// Source text in either of the two shapes nbformat allows.
#[derive(Deserialize)]
#[serde(untagged)]
enum MultilineText {
    Lines(Vec<String>),
    Joined(String),
}

impl From<MultilineText> for Vec<String> {
    fn from(text: MultilineText) -> Self {
        match text {
            MultilineText::Lines(lines) => lines,
            MultilineText::Joined(text) => split_lines(&text),
        }
    }
}

fn multiline<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    MultilineText::deserialize(deserializer).map(Into::into)
}

fn optional_multiline<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Option::<MultilineText>::deserialize(deserializer).map(|text| text.map(Into::into))
}

/// Split text into lines that keep their trailing `\n`.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(String::from).collect()
}

impl Notebook {
    /// Parse a notebook from its JSON text.
    pub fn from_json(json: &str) -> NbdocResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a notebook from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> NbdocResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| NbdocError::read(path, e))?;
        Self::from_json(&content)
    }

    /// Serialize with the 4-space indent notebooks are usually stored with.
    pub fn to_json_pretty(&self) -> NbdocResult<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| NbdocError::InvalidNotebook(e.to_string()))
    }

    /// Write the notebook to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> NbdocResult<()> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|e| NbdocError::write(path, e))
    }
}

impl Cell {
    /// Create a markdown cell.
    pub fn markdown<S: Into<String>>(source: impl IntoIterator<Item = S>) -> Self {
        Self::new(CellKind::Markdown, source, None)
    }

    /// Create a code cell without outputs.
    pub fn code<S: Into<String>>(source: impl IntoIterator<Item = S>) -> Self {
        Self::new(CellKind::Code, source, Some(Vec::new()))
    }

    fn new<S: Into<String>>(
        cell_type: CellKind,
        source: impl IntoIterator<Item = S>,
        outputs: Option<Vec<Output>>,
    ) -> Self {
        Self {
            cell_type,
            source: source.into_iter().map(Into::into).collect(),
            metadata: CellMetadata::default(),
            outputs,
            extra: Map::new(),
        }
    }

    /// Attach tags to the cell.
    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.metadata.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Append an output to the cell.
    pub fn with_output(mut self, output: Output) -> Self {
        self.outputs.get_or_insert_with(Vec::new).push(output);
        self
    }

    /// Tags attached to the cell, empty when absent.
    pub fn tags(&self) -> &[String] {
        self.metadata.tags.as_deref().unwrap_or_default()
    }

    /// Whether the cell carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }

    /// Outputs attached to the cell, empty when absent.
    pub fn outputs(&self) -> &[Output] {
        self.outputs.as_deref().unwrap_or_default()
    }
}

impl Output {
    /// Create a stdout stream output.
    pub fn stream(text: &str) -> Self {
        Self {
            output_type: "stream".to_string(),
            text: Some(split_lines(text)),
            data: None,
            extra: Map::from_iter([("name".to_string(), Value::from("stdout"))]),
        }
    }

    /// Create an execute result output with a plain-text representation.
    pub fn execute_result(text: &str) -> Self {
        Self {
            output_type: "execute_result".to_string(),
            text: None,
            data: Some(OutputData {
                text_plain: Some(split_lines(text)),
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }

    /// Textual content of the output, `None` for non-textual output types.
    pub fn text(&self) -> Option<OutputText<'_>> {
        match self.output_type.as_str() {
            "stream" => Some(OutputText::Stream(self.text.as_deref().unwrap_or_default())),
            "execute_result" => Some(OutputText::Result(
                self.data
                    .as_ref()
                    .and_then(|d| d.text_plain.as_deref())
                    .unwrap_or_default(),
            )),
            _ => None,
        }
    }
}
