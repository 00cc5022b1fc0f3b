// Greedy chunk packer: order-preserving, token-bounded
use crate::constants::NO_CONTENT;
use crate::context::format::{fence_for, render_code_block, render_document};
use crate::context::types::{Chunk, Fragment, Part};
use crate::tokenizer::{count as count_tokens, count_chars};
use tracing::{debug, warn};

/// Accumulates parts into chunks, closing a chunk as soon as the next part
/// would push it over budget.
struct Packer {
    max_tokens: usize,
    chunks: Vec<Chunk>,
    current: Vec<Part>,
    current_tokens: usize,
}

impl Packer {
    fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            chunks: Vec::new(),
            current: Vec::new(),
            current_tokens: 0,
        }
    }

    fn push(
        &mut self,
        part: Part,
        tokens: usize,
    ) {
        if !self.current.is_empty() && self.current_tokens + tokens > self.max_tokens {
            self.flush();
        }
        if tokens > self.max_tokens {
            warn!(
                "a single line of {} needs {tokens} tokens, over the chunk budget of {}",
                part.path().unwrap_or("the project tree"),
                self.max_tokens
            );
        }
        self.current.push(part);
        self.current_tokens += tokens;
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let parts = std::mem::take(&mut self.current);
        self.current_tokens = 0;
        self.chunks.push(make_chunk(self.chunks.len(), parts));
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }
}

fn make_chunk(
    index: usize,
    parts: Vec<Part>,
) -> Chunk {
    let tokens = count_tokens(&render_document(&parts));
    Chunk {
        index,
        parts,
        tokens,
    }
}

/// Group `parts` into chunks of at most `max_tokens` estimated tokens.
///
/// Parts keep their order and are never cut, except a part that is over
/// budget on its own: it is split on line boundaries first (see
/// [`split_oversize`]). A budget of zero disables chunking. An empty input
/// yields one chunk holding a "no content" text part.
pub fn pack(
    parts: Vec<Part>,
    max_tokens: usize,
) -> Vec<Chunk> {
    if parts.is_empty() {
        return vec![make_chunk(0, vec![Part::text(NO_CONTENT)])];
    }
    if max_tokens == 0 {
        return vec![make_chunk(0, parts)];
    }

    let mut packer = Packer::new(max_tokens);
    for part in parts {
        let tokens = part.tokens();
        if tokens <= max_tokens {
            packer.push(part, tokens);
            continue;
        }
        let pieces = split_oversize(&part, max_tokens);
        debug!(
            "split {} ({tokens} tokens) into {} pieces",
            part.path().unwrap_or("text part"),
            pieces.len()
        );
        for piece in pieces {
            let piece_tokens = piece.tokens();
            packer.push(piece, piece_tokens);
        }
    }
    packer.finish()
}

/// Break an over-budget part into consecutive pieces on line boundaries.
///
/// Code pieces are re-wrapped with the file's header and fence and labelled
/// `part i of n`; their contents concatenate back to the original content.
/// Text pieces are plain slices of the text. A part whose content cannot
/// be split (a single line) comes back unchanged.
pub fn split_oversize(
    part: &Part,
    max_tokens: usize,
) -> Vec<Part> {
    match part {
        Part::Text { content } => split_lines(content, |chars| count_chars(chars) <= max_tokens)
            .into_iter()
            .map(Part::text)
            .collect(),
        Part::Code {
            path,
            language,
            content,
            ..
        } => {
            // Size against the widest label and the whole file's fence; the
            // real wrapper of every piece can only be shorter.
            let lines = content.split_inclusive('\n').count();
            let widest = Fragment {
                index: lines,
                total: lines,
            };
            let wrapper = render_code_block(path, *language, Some(widest), &fence_for(content), "");
            let overhead = wrapper.chars().count() + 1;
            let bodies = split_lines(content, |chars| count_chars(overhead + chars) <= max_tokens);
            if bodies.len() <= 1 {
                return vec![part.clone()];
            }
            let total = bodies.len();
            bodies
                .into_iter()
                .enumerate()
                .map(|(idx, body)| Part::Code {
                    path: path.clone(),
                    language: *language,
                    content: body,
                    fragment: Some(Fragment {
                        index: idx + 1,
                        total,
                    }),
                })
                .collect()
        }
    }
}

/// Greedily gather whole lines (newline included) while `fits` accepts the
/// accumulated character count. A line that never fits stands alone.
fn split_lines(
    content: &str,
    fits: impl Fn(usize) -> bool,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut chars = 0usize;
    for line in content.split_inclusive('\n') {
        let line_chars = line.chars().count();
        if !current.is_empty() && !fits(chars + line_chars) {
            pieces.push(std::mem::take(&mut current));
            chars = 0;
        }
        current.push_str(line);
        chars += line_chars;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
