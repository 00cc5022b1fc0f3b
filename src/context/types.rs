use serde::Serialize;

/// One source file handed to the engine. `path` is a forward-slash
/// relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub path: String,
    pub content: String,
}

impl FilePayload {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// How the document is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Files in caller order, no summary.
    Raw,
    /// Directory tree first, files in tree order.
    #[default]
    Intelligent,
}

/// Position of a fragment within a file that was split across chunks.
/// Both numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub index: usize,
    pub total: usize,
}

/// Smallest formatted unit the packer works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Part {
    Text {
        content: String,
    },
    Code {
        path: String,
        language: Option<&'static str>,
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fragment: Option<Fragment>,
    },
}

impl Part {
    pub fn text(content: impl Into<String>) -> Self {
        Part::Text {
            content: content.into(),
        }
    }

    pub fn code(
        path: impl Into<String>,
        language: Option<&'static str>,
        content: impl Into<String>,
    ) -> Self {
        Part::Code {
            path: path.into(),
            language,
            content: content.into(),
            fragment: None,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Part::Text { .. } => None,
            Part::Code { path, .. } => Some(path),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Part::Text { content } | Part::Code { content, .. } => content,
        }
    }
}

/// A budget-bounded, order-preserving slice of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub index: usize,
    pub parts: Vec<Part>,
    /// Estimated tokens of the rendered chunk text.
    pub tokens: usize,
}

/// Everything one invocation of the engine produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedOutput {
    pub chunks: Vec<Chunk>,
    #[serde(rename = "isChunked")]
    pub is_chunked: bool,
    /// Estimate over the whole unchunked document.
    pub token_estimate: usize,
}

impl ProcessedOutput {
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of distinct files present in the output.
    pub fn file_count(&self) -> usize {
        let mut last: Option<&str> = None;
        let mut n = 0;
        for path in self.chunks.iter().flat_map(|c| c.parts.iter()).filter_map(Part::path) {
            if last != Some(path) {
                n += 1;
            }
            last = Some(path);
        }
        n
    }
}
