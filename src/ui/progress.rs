//! Which chunks of an output have been copied so far.
//!
//! This is caller state. The engine never reads it; it is keyed to an
//! output by chunk count, token estimate and a hash of the rendered chunks.

use crate::context::types::ProcessedOutput;
use anyhow::{Context, Result};
use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyProgress {
    pub chunk_count: usize,
    pub token_estimate: usize,
    /// blake3 hex digest of the rendered chunks.
    #[serde(default)]
    pub fingerprint: String,
    pub copied: Vec<bool>,
    /// Chunk the "copy next" action targets.
    pub current: usize,
    pub last_copied: Option<usize>,
}

impl CopyProgress {
    pub fn for_output(output: &ProcessedOutput) -> Self {
        Self {
            chunk_count: output.chunk_count(),
            token_estimate: output.token_estimate,
            fingerprint: fingerprint(output),
            copied: vec![false; output.chunk_count()],
            current: 0,
            last_copied: None,
        }
    }

    fn belongs_to(
        &self,
        output: &ProcessedOutput,
    ) -> bool {
        self.chunk_count == output.chunk_count()
            && self.token_estimate == output.token_estimate
            && self.fingerprint == fingerprint(output)
            && self.copied.len() == self.chunk_count
            && self.current < self.chunk_count.max(1)
    }

    /// Record a copy of chunk `index`. Copying the current chunk moves
    /// `current` forward. Returns `true` the first time `index` is copied.
    pub fn mark_copied(
        &mut self,
        index: usize,
    ) -> bool {
        let Some(slot) = self.copied.get_mut(index) else {
            return false;
        };
        let first = !*slot;
        *slot = true;
        if index == self.current && index + 1 < self.chunk_count {
            self.current = index + 1;
        }
        self.last_copied = Some(index);
        first
    }

    pub fn is_copied(
        &self,
        index: usize,
    ) -> bool {
        self.copied.get(index).copied().unwrap_or(false)
    }

    /// The chunk to copy next: the current one unless it is done, then the
    /// first one still pending.
    pub fn next_index(&self) -> Option<usize> {
        if !self.is_copied(self.current) && self.current < self.chunk_count {
            return Some(self.current);
        }
        self.copied.iter().position(|done| !done)
    }

    pub fn copied_count(&self) -> usize {
        self.copied.iter().filter(|done| **done).count()
    }

    pub fn all_copied(&self) -> bool {
        self.copied.iter().all(|done| *done)
    }

    /// Restore progress saved for this same output, or start fresh.
    pub fn load(
        path: &Path,
        output: &ProcessedOutput,
    ) -> Self {
        let restored = fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str::<CopyProgress>(&s).ok())
            .filter(|p| p.belongs_to(output));
        match restored {
            Some(progress) => {
                debug!(
                    "restored copy progress from {} ({} copied)",
                    path.display(),
                    progress.copied_count()
                );
                progress
            }
            None => Self::for_output(output),
        }
    }

    pub fn save(
        &self,
        path: &Path,
    ) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("failed to save copy progress to {}", path.display()))
    }
}

/// Digest of every chunk's text, in order.
pub fn fingerprint(output: &ProcessedOutput) -> String {
    let mut hasher = Hasher::new();
    for chunk in &output.chunks {
        let text = chunk.render();
        hasher.update(&(text.len() as u64).to_le_bytes());
        hasher.update(text.as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
