#![allow(dead_code)]
use assert_fs::{TempDir, prelude::*};
use context_crafter::FilePayload;

/// Builds a fixture tree:
/// root/
///   src/hello.rs
///   README.md
///   bin/binary.dat            (non-UTF8)
///   deep/ignore.me            (ignored via .gitignore)
///   node_modules/pkg/index.js (baseline-ignored)
pub fn basic_fs() -> TempDir {
    let td = TempDir::new().unwrap();
    td.child("src/hello.rs")
        .write_str("fn main() { println!(\"hello\"); }\n")
        .unwrap();
    td.child("README.md").write_str("# readme\n").unwrap();
    td.child("bin/binary.dat")
        .write_binary(&[0xff, 0xfe, 0x00, 0x80])
        .unwrap();
    td.child("deep/ignore.me")
        .write_str("should be ignored\n")
        .unwrap();
    td.child("node_modules/pkg/index.js")
        .write_str("module.exports = 1;\n")
        .unwrap();
    td.child(".gitignore").write_str("# local\n/deep\n").unwrap();
    td
}

pub fn payloads(files: &[(&str, &str)]) -> Vec<FilePayload> {
    files
        .iter()
        .map(|(path, content)| FilePayload::new(*path, *content))
        .collect()
}

/// Contents of every code part for `path`, in output order, glued together.
pub fn reassemble(
    output: &context_crafter::ProcessedOutput,
    path: &str,
) -> String {
    output
        .chunks
        .iter()
        .flat_map(|c| c.parts.iter())
        .filter(|p| p.path() == Some(path))
        .map(|p| p.content())
        .collect()
}

/// Distinct code-part paths in output order.
pub fn paths_in_order(output: &context_crafter::ProcessedOutput) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    for path in output
        .chunks
        .iter()
        .flat_map(|c| c.parts.iter())
        .filter_map(|p| p.path())
    {
        if paths.last().map(String::as_str) != Some(path) {
            paths.push(path.to_string());
        }
    }
    paths
}
