//! The assembly pipeline: validate, filter, format, estimate, pack.

use crate::constants::MAX_TOKENS_PER_CHUNK;
use crate::context::chunker;
use crate::context::format::{render_document, render_parts, select_files};
use crate::context::ignore::IgnoreMatcher;
use crate::context::types::{FilePayload, Mode, ProcessedOutput};
use crate::error::EngineError;
use crate::tokenizer::count as count_tokens;
use tracing::debug;

/// Stateless assembler. Holds only its chunk budget, so one instance can
/// serve any number of calls, concurrently or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    max_tokens_per_chunk: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            max_tokens_per_chunk: MAX_TOKENS_PER_CHUNK,
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom chunk budget; `0` disables chunking.
    pub fn with_max_tokens(max_tokens_per_chunk: usize) -> Self {
        Self {
            max_tokens_per_chunk,
        }
    }

    pub fn max_tokens_per_chunk(&self) -> usize {
        self.max_tokens_per_chunk
    }

    /// Assemble `files` into chunked output.
    ///
    /// `ignore_patterns` are applied after the built-in baseline. Fails
    /// without producing anything if a path is malformed or if no file
    /// survives filtering.
    pub fn process_project<S: AsRef<str>>(
        &self,
        files: &[FilePayload],
        project_name: &str,
        ignore_patterns: &[S],
        mode: Mode,
    ) -> Result<ProcessedOutput, EngineError> {
        for file in files {
            validate_path(&file.path)?;
        }

        let matcher = IgnoreMatcher::new(ignore_patterns);
        let selected = select_files(files, &matcher);
        debug!(
            "{} of {} files kept after {} ignore rules",
            selected.len(),
            files.len(),
            matcher.rules().len()
        );
        if selected.is_empty() {
            return Err(EngineError::EmptyProject);
        }

        let parts = render_parts(&selected, project_name, mode);
        let token_estimate = count_tokens(&render_document(&parts));
        let chunks = chunker::pack(parts, self.max_tokens_per_chunk);
        debug!(
            "packed ~{token_estimate} tokens into {} chunk(s) of at most {}",
            chunks.len(),
            self.max_tokens_per_chunk
        );

        Ok(ProcessedOutput {
            is_chunked: chunks.len() > 1,
            chunks,
            token_estimate,
        })
    }
}

/// [`Engine::process_project`] with the default chunk budget.
pub fn process_project<S: AsRef<str>>(
    files: &[FilePayload],
    project_name: &str,
    ignore_patterns: &[S],
    mode: Mode,
) -> Result<ProcessedOutput, EngineError> {
    Engine::default().process_project(files, project_name, ignore_patterns, mode)
}

/// Paths must be relative, forward-slash separated, and free of empty,
/// `.` or `..` segments.
pub fn validate_path(path: &str) -> Result<(), EngineError> {
    let reason = if path.is_empty() {
        "path is empty"
    } else if path.starts_with('/') {
        "path must be relative"
    } else if path.contains('\\') {
        "path must use forward slashes"
    } else if path.contains(['\0', '\n', '\r']) {
        "path contains a control character"
    } else if path.split('/').any(|seg| seg.is_empty()) {
        "path has an empty segment"
    } else if path.split('/').any(|seg| seg == "." || seg == "..") {
        "path has a relative segment"
    } else {
        return Ok(());
    };
    Err(EngineError::InvalidInput {
        path: path.to_string(),
        reason: reason.to_string(),
    })
}
