pub mod cli;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod io;
pub mod output;
pub mod tokenizer;
pub mod ui;

// Flat re-exports of the engine surface
pub use context::chunker;
pub use context::engine::{Engine, process_project};
pub use context::gather;
pub use context::ignore::{IgnoreMatcher, is_ignored};
pub use context::language::classify;
pub use context::types::{Chunk, FilePayload, Fragment, Mode, Part, ProcessedOutput};
pub use error::{EngineError, FetchError};
