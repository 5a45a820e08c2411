//! nbdoc CLI - Jupyter notebooks to Markdown documentation.

mod colors;
mod examples;
mod markdown;
mod watcher;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nbdoc_core::{
    DEFAULT_EXAMPLE_PREFIX, DEFAULT_HIDE_TAG, DEFAULT_TAG_PREFIX, ExtractOptions,
    FileSnippetDetection, Formatter, RenderOptions,
};

#[derive(Parser)]
#[command(name = "nbdoc")]
#[command(about = "Render Jupyter notebooks as Markdown documentation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert notebooks to Markdown
    Md {
        /// Notebooks to convert (default: every .ipynb in the current directory)
        notebooks: Vec<PathBuf>,

        /// Output path (single notebook only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not run the external formatter on written files
        #[arg(long)]
        no_format: bool,

        /// Formatter program run on each written file
        #[arg(long, default_value = "prettier")]
        formatter: String,

        /// Arguments passed to the formatter before the file path
        #[arg(long = "formatter-arg", default_values = ["--write"], allow_hyphen_values = true)]
        formatter_args: Vec<String>,

        /// Treat every `%%` cell as a file snippet, not only `%%` + `# name` cells
        #[arg(long)]
        loose_file_snippets: bool,

        /// Tag that hides a cell from the output
        #[arg(long, default_value = DEFAULT_HIDE_TAG)]
        hide_tag: String,

        /// Watch the notebook and convert again on changes (single notebook only)
        #[arg(short, long)]
        watch: bool,
    },

    /// Extract file snippets into numbered example files
    Examples {
        /// Notebooks to process (default: every .ipynb in the current directory)
        notebooks: Vec<PathBuf>,

        /// Point `! python <file>.py` shell cells at the extracted file
        #[arg(long)]
        rewrite_shell: bool,

        /// Write edited notebooks to `<name>.<suffix>.ipynb` instead of in place
        #[arg(long)]
        suffix: Option<String>,

        /// Tag prefix naming the examples that follow it
        #[arg(long, default_value = DEFAULT_TAG_PREFIX)]
        tag_prefix: String,

        /// File name prefix used when no tag names one
        #[arg(long, default_value = DEFAULT_EXAMPLE_PREFIX)]
        default_prefix: String,

        /// Directory for extracted files
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Treat every `%%` cell as a file snippet, not only `%%` + `# name` cells
        #[arg(long)]
        loose_file_snippets: bool,
    },
}

fn detection(loose: bool) -> FileSnippetDetection {
    if loose {
        FileSnippetDetection::Loose
    } else {
        FileSnippetDetection::Strict
    }
}

/// Use the given notebooks, or every notebook in the current directory.
fn resolve_notebooks(notebooks: Vec<PathBuf>) -> anyhow::Result<Vec<PathBuf>> {
    if !notebooks.is_empty() {
        return Ok(notebooks);
    }
    let found = nbdoc_core::find_notebooks(std::env::current_dir()?)?;
    if found.is_empty() {
        anyhow::bail!("No notebooks given and no .ipynb files in the current directory");
    }
    Ok(found)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Md {
            notebooks,
            output,
            no_format,
            formatter,
            formatter_args,
            loose_file_snippets,
            hide_tag,
            watch,
        } => {
            let options = RenderOptions {
                hide_tag,
                file_snippet_detection: detection(loose_file_snippets),
            };
            let formatter = (!no_format).then(|| Formatter::new(formatter, formatter_args));
            let notebooks = resolve_notebooks(notebooks)?;

            if watch {
                markdown::watch(&notebooks, output.as_deref(), &options, formatter.as_ref())
                    .await?;
            } else {
                markdown::execute(&notebooks, output.as_deref(), &options, formatter.as_ref())?;
            }
        }

        Commands::Examples {
            notebooks,
            rewrite_shell,
            suffix,
            tag_prefix,
            default_prefix,
            out_dir,
            loose_file_snippets,
        } => {
            let options = ExtractOptions {
                tag_prefix,
                default_prefix,
                rewrite_shell_cells: rewrite_shell,
                output_suffix: suffix,
                output_dir: out_dir,
                file_snippet_detection: detection(loose_file_snippets),
            };
            let notebooks = resolve_notebooks(notebooks)?;
            examples::execute(&notebooks, &options)?;
        }
    }

    Ok(())
}
