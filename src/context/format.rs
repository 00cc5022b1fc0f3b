//! Turns the included files into an ordered list of [`Part`]s.
//!
//! The document is the concatenation of every part's rendering, in order.
//! Chunking only decides where that sequence is cut.

use crate::context::ignore::IgnoreMatcher;
use crate::context::language::classify;
use crate::context::types::{Chunk, FilePayload, Fragment, Mode, Part};
use crate::tokenizer::count as count_tokens;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

impl Part {
    /// The exact text this part contributes to the document.
    pub fn render(&self) -> String {
        match self {
            Part::Text { content } => content.clone(),
            Part::Code {
                path,
                language,
                content,
                fragment,
            } => render_code_block(path, *language, *fragment, &fence_for(content), content),
        }
    }

    pub fn tokens(&self) -> usize {
        count_tokens(&self.render())
    }
}

impl Chunk {
    pub fn render(&self) -> String {
        render_document(&self.parts)
    }
}

pub fn render_document(parts: &[Part]) -> String {
    parts.iter().map(Part::render).collect()
}

/// Shortest backtick fence (at least three) that cannot close early
/// inside `content`.
pub fn fence_for(content: &str) -> String {
    let mut longest = 0usize;
    let mut run = 0usize;
    for c in content.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

pub(crate) fn render_code_block(
    path: &str,
    language: Option<&str>,
    fragment: Option<Fragment>,
    fence: &str,
    content: &str,
) -> String {
    let mut out = String::with_capacity(content.len() + path.len() + 2 * fence.len() + 32);
    out.push_str("File: ");
    out.push_str(path);
    if let Some(Fragment { index, total }) = fragment {
        out.push_str(&format!(" (part {index} of {total})"));
    }
    out.push('\n');
    out.push_str(fence);
    out.push_str(language.unwrap_or_default());
    out.push('\n');
    out.push_str(content);
    if !content.is_empty() && !content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(fence);
    out.push_str("\n\n");
    out
}

/// Keep the files no rule excludes. A repeated path keeps the slot of its
/// first occurrence and the content of its last.
pub fn select_files<'a>(
    files: &'a [FilePayload],
    matcher: &IgnoreMatcher,
) -> Vec<&'a FilePayload> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut selected: Vec<&FilePayload> = Vec::new();
    for file in files {
        if matcher.is_ignored(&file.path) {
            continue;
        }
        match slots.get(file.path.as_str()) {
            Some(&slot) => selected[slot] = file,
            None => {
                slots.insert(&file.path, selected.len());
                selected.push(file);
            }
        }
    }
    selected
}

/// Ordering used by the tree: segment by segment, a directory sorts before
/// a file, otherwise names compare byte-wise.
pub fn tree_order(
    a: &str,
    b: &str,
) -> Ordering {
    let left: Vec<&str> = a.split('/').collect();
    let right: Vec<&str> = b.split('/').collect();
    for i in 0..left.len().min(right.len()) {
        let left_dir = i + 1 < left.len();
        let right_dir = i + 1 < right.len();
        if left_dir != right_dir {
            return if left_dir {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        match left[i].cmp(right[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    left.len().cmp(&right.len())
}

#[derive(Default)]
struct DirNode<'a> {
    dirs: BTreeMap<&'a str, DirNode<'a>>,
    files: Vec<&'a str>,
}

impl<'a> DirNode<'a> {
    fn insert(
        &mut self,
        path: &'a str,
    ) {
        match path.split_once('/') {
            Some((dir, rest)) => self.dirs.entry(dir).or_default().insert(rest),
            None => self.files.push(path),
        }
    }

    fn render(
        &self,
        prefix: &str,
        out: &mut String,
    ) {
        let mut files = self.files.clone();
        files.sort_unstable();
        let total = self.dirs.len() + files.len();
        let mut seen = 0usize;
        for (name, child) in &self.dirs {
            seen += 1;
            let last = seen == total;
            out.push_str(&format!("{prefix}{}{name}/\n", connector(last)));
            let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
            child.render(&child_prefix, out);
        }
        for name in files {
            seen += 1;
            out.push_str(&format!("{prefix}{}{name}\n", connector(seen == total)));
        }
    }
}

fn connector(last: bool) -> &'static str {
    if last { "└── " } else { "├── " }
}

/// Directory-tree summary of the included paths.
pub fn render_tree(
    project_name: &str,
    paths: &[&str],
) -> String {
    let mut root = DirNode::default();
    for &path in paths {
        root.insert(path);
    }
    let name = if project_name.is_empty() {
        "."
    } else {
        project_name
    };
    let mut out = format!("Project: {name}\nFiles: {}\n\n{name}/\n", paths.len());
    root.render("", &mut out);
    out.push('\n');
    out
}

fn code_part(file: &FilePayload) -> Part {
    Part::code(file.path.clone(), classify(&file.path), file.content.clone())
}

/// Lay out already-filtered files according to `mode`.
pub fn render_parts(
    files: &[&FilePayload],
    project_name: &str,
    mode: Mode,
) -> Vec<Part> {
    match mode {
        Mode::Raw => files.iter().map(|f| code_part(f)).collect(),
        Mode::Intelligent => {
            let mut sorted = files.to_vec();
            sorted.sort_by(|a, b| tree_order(&a.path, &b.path));
            let paths: Vec<&str> = sorted.iter().map(|f| f.path.as_str()).collect();
            let mut parts = Vec::with_capacity(sorted.len() + 1);
            parts.push(Part::text(render_tree(project_name, &paths)));
            parts.extend(sorted.iter().map(|f| code_part(f)));
            parts
        }
    }
}

/// Filter `files` through `matcher` and lay them out.
pub fn format(
    files: &[FilePayload],
    project_name: &str,
    matcher: &IgnoreMatcher,
    mode: Mode,
) -> Vec<Part> {
    render_parts(&select_files(files, matcher), project_name, mode)
}
