use crate::cli::Cli;
use crate::constants::{DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_FILES};
use crate::context::gather::CollectOptions;
use crate::context::types::Mode;
use clap::Parser;
use std::path::PathBuf;

/// Application configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub name: Option<String>,
    pub mode: Mode,
    pub exclude: Vec<String>,
    pub use_gitignore: bool,
    pub max_size: u64,
    pub max_files: usize,
    pub stdout: bool,
    pub no_clipboard: bool,
    pub json: bool,
    pub stream: bool,
    pub chunk_index: Option<usize>,
    pub progress_file: Option<PathBuf>,
    pub verbose: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            name: None,
            mode: Mode::default(),
            exclude: Vec::new(),
            use_gitignore: true,
            max_size: DEFAULT_MAX_FILE_SIZE,
            max_files: DEFAULT_MAX_FILES,
            stdout: false,
            no_clipboard: false,
            json: false,
            stream: false,
            chunk_index: None,
            progress_file: None,
            verbose: 0,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            root: cli.path,
            name: cli.name,
            mode: cli.mode,
            exclude: cli.exclude,
            use_gitignore: !cli.no_gitignore,
            max_size: cli.max_size,
            max_files: cli.max_files,
            stdout: cli.stdout,
            no_clipboard: cli.no_clipboard,
            json: cli.json,
            stream: cli.stream,
            chunk_index: cli.chunk_index,
            progress_file: cli.progress_file,
            verbose: cli.verbose,
        }
    }
}

impl Config {
    /// Parse CLI arguments into a Config
    pub fn from_cli() -> Self {
        Cli::parse().into()
    }

    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            max_file_size: self.max_size,
            max_files: self.max_files,
            use_gitignore: self.use_gitignore,
            extra_patterns: self.exclude.clone(),
        }
    }
}
