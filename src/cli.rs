use crate::constants::{DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_FILES};
use crate::context::types::Mode;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "context-crafter")]
#[command(
    about = "Package a project folder into LLM-ready prompt text, split into parts \
             that fit a token budget, and copy it to the clipboard."
)]
pub struct Cli {
    /// Project folder to package.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Project name shown in the tree summary (defaults to the folder name).
    #[arg(long = "name")]
    pub name: Option<String>,

    /// Layout: `intelligent` adds a directory tree and sorts files; `raw`
    /// keeps discovery order.
    #[arg(long = "mode", value_enum, default_value_t = Mode::Intelligent)]
    pub mode: Mode,

    /// Extra gitignore-style patterns; later patterns win, `!` re-includes.
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<String>,

    /// Do not read the project's root .gitignore.
    #[arg(long = "no-gitignore")]
    pub no_gitignore: bool,

    /// Maximum file size in bytes before skipping files.
    #[arg(short = 's', long = "max-size", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_size: u64,

    /// Refuse projects with more eligible files than this.
    #[arg(long = "max-files", default_value_t = DEFAULT_MAX_FILES)]
    pub max_files: usize,

    /// Print the output to stdout.
    #[arg(short = 'o', long = "stdout")]
    pub stdout: bool,

    /// Do not copy to clipboard.
    #[arg(short = 'n', long = "no-clipboard")]
    pub no_clipboard: bool,

    /// Print the processed output as JSON.
    #[arg(long = "json", conflicts_with = "stream")]
    pub json: bool,

    /// Copy parts one by one from an interactive prompt.
    #[arg(long = "stream", conflicts_with = "chunk_index")]
    pub stream: bool,

    /// Which part to print/copy (0-based).
    #[arg(short = 'k', long = "chunk-index")]
    pub chunk_index: Option<usize>,

    /// Remember copied parts across runs in this JSON file.
    #[arg(long = "progress-file")]
    pub progress_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}
