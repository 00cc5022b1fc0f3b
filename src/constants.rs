// Centralized magic numbers & default values
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 5_000;

/// Token budget for a single chunk of assembled output.
pub const MAX_TOKENS_PER_CHUNK: usize = 100_000;

/// Characters counted as one token by the estimator.
pub const CHARS_PER_TOKEN: usize = 4;

/// Body of the single text part emitted when there is nothing to pack.
pub const NO_CONTENT: &str = "(no content)\n";
