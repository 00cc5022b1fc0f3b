//! Gitignore-style path filtering.
//!
//! Every pattern is compiled once into a [`Rule`]. A path is resolved
//! one directory at a time, shallowest first: the last rule matching a
//! component decides it, and a component no rule matches inherits its
//! parent's state. Inside an excluded directory only an anchored negation
//! (one naming a path with a `/`) can re-include something. Paths no rule
//! matches are included.

use globset::{GlobBuilder, GlobMatcher};
use tracing::warn;

/// Exclusions applied ahead of any caller rule. A caller negation placed
/// later in the list can still re-include one of these paths.
pub const BASELINE_PATTERNS: &[&str] = &[
    // version control
    ".git/",
    ".svn/",
    ".hg/",
    // dependencies
    "node_modules/",
    "bower_components/",
    "vendor/",
    ".venv/",
    "venv/",
    "__pycache__/",
    // build output
    "target/",
    "dist/",
    "build/",
    "out/",
    ".next/",
    "coverage/",
    // lock files
    "*.lock",
    "package-lock.json",
    "pnpm-lock.yaml",
    ".DS_Store",
    // binaries and media
    "*.png",
    "*.jpg",
    "*.jpeg",
    "*.gif",
    "*.bmp",
    "*.ico",
    "*.webp",
    "*.pdf",
    "*.zip",
    "*.tar",
    "*.gz",
    "*.tgz",
    "*.bz2",
    "*.xz",
    "*.7z",
    "*.rar",
    "*.jar",
    "*.class",
    "*.exe",
    "*.dll",
    "*.so",
    "*.dylib",
    "*.o",
    "*.a",
    "*.obj",
    "*.bin",
    "*.pyc",
    "*.wasm",
    "*.woff",
    "*.woff2",
    "*.ttf",
    "*.otf",
    "*.eot",
    "*.mp3",
    "*.mp4",
    "*.mov",
    "*.avi",
    "*.wav",
    "*.sqlite",
    "*.db",
];

/// A single compiled ignore pattern.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    negated: bool,
    dir_only: bool,
    anchored: bool,
    /// Glob text before the first wildcard, without any leading `/`.
    literal_prefix: String,
    /// `None` when the glob failed to compile; such a rule never matches.
    matcher: Option<GlobMatcher>,
}

impl Rule {
    /// Compile one pattern line. Blank lines and comments are not rules.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let mut body = line;
        let negated = body.starts_with('!');
        if negated {
            body = &body[1..];
        } else if body.starts_with("\\!") || body.starts_with("\\#") {
            body = &body[1..];
        }
        let dir_only = body.ends_with('/');
        let body = body.trim_end_matches('/');
        // A slash at the start or in the middle ties the pattern to the root.
        let anchored = body.contains('/');
        let body = body.trim_start_matches('/');

        let matcher = if body.is_empty() {
            None
        } else {
            let glob = if anchored {
                body.to_string()
            } else {
                format!("**/{body}")
            };
            match GlobBuilder::new(&glob)
                .literal_separator(true)
                .backslash_escape(true)
                .build()
            {
                Ok(g) => Some(g.compile_matcher()),
                Err(e) => {
                    warn!("ignore pattern {line:?} is invalid and will never match: {e}");
                    None
                }
            }
        };

        let literal_prefix = body
            .find(['*', '?', '[', '{', '\\'])
            .map_or(body, |end| &body[..end])
            .to_string();

        Some(Rule {
            pattern: line.to_string(),
            negated,
            dir_only,
            anchored,
            literal_prefix,
            matcher,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether this rule matches `path` itself.
    fn matches(
        &self,
        path: &str,
        is_dir: bool,
    ) -> bool {
        let Some(matcher) = &self.matcher else {
            return false;
        };
        (is_dir || !self.dir_only) && matcher.is_match(path)
    }

    /// Whether this rule could match something below directory `dir`.
    fn may_match_below(
        &self,
        dir: &str,
    ) -> bool {
        if !self.anchored {
            return true;
        }
        let dir = format!("{dir}/");
        self.literal_prefix.starts_with(&dir) || dir.starts_with(&self.literal_prefix)
    }
}

/// Proper ancestor directories of a relative path, shallowest first.
fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/').map(move |(i, _)| &path[..i])
}

/// Ordered rule list evaluated last-match-wins.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    rules: Vec<Rule>,
}

impl IgnoreMatcher {
    /// Baseline rules followed by `patterns`.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut matcher = Self::without_baseline(BASELINE_PATTERNS);
        matcher.extend(patterns);
        matcher
    }

    /// Only `patterns`, no baseline.
    pub fn without_baseline<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut matcher = Self::default();
        matcher.extend(patterns);
        matcher
    }

    pub fn extend<S: AsRef<str>>(
        &mut self,
        patterns: &[S],
    ) {
        self.rules
            .extend(patterns.iter().filter_map(|p| Rule::parse(p.as_ref())));
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether the file at `path` is excluded.
    pub fn is_ignored(
        &self,
        path: &str,
    ) -> bool {
        self.decide(path, false)
    }

    /// Whether everything below directory `dir` is certainly excluded, so a
    /// walker may skip it. An excluded directory is kept open while some
    /// anchored negation could still re-include a path inside it.
    pub fn is_dir_pruned(
        &self,
        dir: &str,
    ) -> bool {
        self.decide(dir, true)
            && !self
                .rules
                .iter()
                .any(|rule| rule.negated && rule.anchored && rule.may_match_below(dir))
    }

    fn decide(
        &self,
        path: &str,
        is_dir: bool,
    ) -> bool {
        let parent_excluded =
            ancestors(path).fold(false, |excluded, dir| self.resolve(dir, true, excluded));
        self.resolve(path, is_dir, parent_excluded)
    }

    /// State of one path component given the state of its parent.
    fn resolve(
        &self,
        path: &str,
        is_dir: bool,
        parent_excluded: bool,
    ) -> bool {
        match self.rules.iter().rev().find(|rule| rule.matches(path, is_dir)) {
            Some(rule) if rule.negated => parent_excluded && !rule.anchored,
            Some(_) => true,
            None => parent_excluded,
        }
    }
}

/// Evaluate `path` against the baseline plus `rules`.
pub fn is_ignored<S: AsRef<str>>(
    path: &str,
    rules: &[S],
) -> bool {
    IgnoreMatcher::new(rules).is_ignored(path)
}
