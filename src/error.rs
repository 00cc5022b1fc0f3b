//! Error types for assembly and collection

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the assembly engine. The engine is atomic: an
/// error means no output was produced at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("no files left to assemble after applying ignore rules")]
    EmptyProject,

    #[error("invalid input path {path:?}: {reason}")]
    InvalidInput { path: String, reason: String },
}

/// Failures while gathering files from disk, before the engine runs.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("project has more than {limit} files; narrow it down with ignore patterns")]
    TooManyFiles { limit: usize },

    #[error("{} exceeds {limit} bytes", path.display())]
    FileTooLarge { path: PathBuf, limit: u64 },

    #[error("{} appears to be a binary file", .0.display())]
    Binary(PathBuf),

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] ignore::Error),
}
