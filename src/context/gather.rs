//! Reads a local project folder into [`FilePayload`]s.
//!
//! This is the upstream side of the engine: all file-system access and all
//! tolerance for unreadable files lives here.

use crate::constants::{DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_FILES};
use crate::context::ignore::IgnoreMatcher;
use crate::context::types::FilePayload;
use crate::error::FetchError;
use ignore::WalkBuilder;
use path_slash::PathExt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Limits and rule sources for one collection run.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub max_file_size: u64,
    pub max_files: usize,
    /// Read the root-level `.gitignore` and merge its lines.
    pub use_gitignore: bool,
    /// User ignore patterns; these win over `.gitignore` lines.
    pub extra_patterns: Vec<String>,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_files: DEFAULT_MAX_FILES,
            use_gitignore: true,
            extra_patterns: Vec::new(),
        }
    }
}

/// Files read from a folder, plus the merged patterns the engine should
/// apply to them.
#[derive(Debug, Clone)]
pub struct CollectedProject {
    pub name: String,
    pub files: Vec<FilePayload>,
    pub patterns: Vec<String>,
}

/// Pattern lines from `<root>/.gitignore`, without blanks and comments.
/// A missing or unreadable file yields no patterns.
pub fn read_ignore_file(root: &Path) -> Vec<String> {
    let path = root.join(".gitignore");
    let Ok(text) = fs::read_to_string(&path) else {
        return Vec::new();
    };
    let lines: Vec<String> = text
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect();
    debug!("loaded {} patterns from {}", lines.len(), path.display());
    lines
}

/// Ignore-file lines first, then user patterns, so user rules take
/// precedence under last-match-wins.
pub fn merge_patterns(
    discovered: &[String],
    user: &[String],
) -> Vec<String> {
    discovered.iter().chain(user).cloned().collect()
}

/// Walk `root` and read every file the merged rules keep.
///
/// Unreadable, binary and oversized files are skipped with a warning.
/// Exceeding `max_files` is an error, never a truncated result.
pub fn collect_project(
    root: &Path,
    opts: &CollectOptions,
) -> Result<CollectedProject, FetchError> {
    if !root.is_dir() {
        return Err(FetchError::NotADirectory(root.to_path_buf()));
    }
    let root = dunce::canonicalize(root).map_err(|source| FetchError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let discovered = if opts.use_gitignore {
        read_ignore_file(&root)
    } else {
        Vec::new()
    };
    let patterns = merge_patterns(&discovered, &opts.extra_patterns);
    let matcher = Arc::new(IgnoreMatcher::new(&patterns));

    let prune_root = root.clone();
    let prune_matcher = Arc::clone(&matcher);
    let walker = WalkBuilder::new(&root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            match relative_slash_path(&prune_root, entry.path()) {
                Some(rel) if is_dir => !prune_matcher.is_dir_pruned(&rel),
                _ => true,
            }
        })
        .build();

    let mut files = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                warn!("could not process entry in {}: {e}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let Some(rel) = relative_slash_path(&root, entry.path()) else {
            continue;
        };
        if matcher.is_ignored(&rel) {
            continue;
        }
        if files.len() >= opts.max_files {
            return Err(FetchError::TooManyFiles {
                limit: opts.max_files,
            });
        }
        match read_file(entry.path(), opts.max_file_size) {
            Ok(content) => files.push(FilePayload::new(rel, content)),
            Err(e) => warn!("skipping: {e}"),
        }
    }

    debug!("collected {} files from {}", files.len(), root.display());
    Ok(CollectedProject {
        name,
        files,
        patterns,
    })
}

fn relative_slash_path(
    root: &Path,
    path: &Path,
) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    if rel.as_os_str().is_empty() {
        return None;
    }
    Some(rel.to_slash_lossy().into_owned())
}

/// Read one file as UTF-8 text, enforcing a maximum size.
pub fn read_file(
    path: &Path,
    max_size: u64,
) -> Result<String, FetchError> {
    let io_err = |source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(path).map_err(io_err)?;
    if metadata.len() > max_size {
        return Err(FetchError::FileTooLarge {
            path: path.to_path_buf(),
            limit: max_size,
        });
    }
    let bytes = fs::read(path).map_err(io_err)?;
    String::from_utf8(bytes).map_err(|_| FetchError::Binary(PathBuf::from(path)))
}
