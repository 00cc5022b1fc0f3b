mod common;
use assert_fs::prelude::*;
use common::basic_fs;
use context_crafter::context::gather::*;
use context_crafter::{FetchError, Mode, process_project};
use std::fs;

fn collected_paths(project: &CollectedProject) -> Vec<&str> {
    project.files.iter().map(|f| f.path.as_str()).collect()
}

#[test]
fn collect_respects_gitignore_and_baseline() {
    let td = basic_fs();
    let project = collect_project(td.path(), &CollectOptions::default()).unwrap();

    let paths = collected_paths(&project);
    assert_eq!(paths, vec![".gitignore", "README.md", "src/hello.rs"]);
    // binary file skipped, not an error
    assert!(!paths.contains(&"bin/binary.dat"));
    assert_eq!(project.patterns, vec!["/deep"]);
    assert_eq!(
        project.name,
        td.path().file_name().unwrap().to_string_lossy()
    );
}

#[test]
fn gitignore_can_be_turned_off() {
    let td = basic_fs();
    let opts = CollectOptions {
        use_gitignore: false,
        ..CollectOptions::default()
    };
    let project = collect_project(td.path(), &opts).unwrap();
    assert!(collected_paths(&project).contains(&"deep/ignore.me"));
    // the baseline still applies
    assert!(!collected_paths(&project).contains(&"node_modules/pkg/index.js"));
    assert!(project.patterns.is_empty());
}

#[test]
fn user_patterns_override_gitignore() {
    let td = basic_fs();
    let opts = CollectOptions {
        extra_patterns: vec!["!deep/ignore.me".into(), "*.md".into()],
        ..CollectOptions::default()
    };
    let project = collect_project(td.path(), &opts).unwrap();
    let paths = collected_paths(&project);
    assert!(paths.contains(&"deep/ignore.me"));
    assert!(!paths.contains(&"README.md"));
    assert_eq!(project.patterns, vec!["/deep", "!deep/ignore.me", "*.md"]);
}

#[test]
fn negation_reaches_into_baseline_directory() {
    let td = basic_fs();
    let opts = CollectOptions {
        extra_patterns: vec!["!node_modules/pkg/index.js".into()],
        ..CollectOptions::default()
    };
    let project = collect_project(td.path(), &opts).unwrap();
    assert!(collected_paths(&project).contains(&"node_modules/pkg/index.js"));
}

#[test]
fn collected_project_feeds_the_engine() {
    let td = basic_fs();
    let project = collect_project(td.path(), &CollectOptions::default()).unwrap();
    let out = process_project(&project.files, &project.name, &project.patterns, Mode::Raw).unwrap();
    assert_eq!(out.file_count(), 3);
    assert!(!out.is_chunked);
}

#[test]
fn oversized_files_are_skipped() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("small.txt").write_str("ok\n").unwrap();
    td.child("huge.txt").write_str(&"x".repeat(2048)).unwrap();
    let opts = CollectOptions {
        max_file_size: 1000,
        ..CollectOptions::default()
    };
    let project = collect_project(td.path(), &opts).unwrap();
    assert_eq!(collected_paths(&project), vec!["small.txt"]);
}

#[test]
fn too_many_files_is_an_error() {
    let td = assert_fs::TempDir::new().unwrap();
    for i in 0..5 {
        td.child(format!("f{i}.txt")).write_str("x").unwrap();
    }
    let opts = CollectOptions {
        max_files: 3,
        ..CollectOptions::default()
    };
    let err = collect_project(td.path(), &opts).unwrap_err();
    assert!(matches!(err, FetchError::TooManyFiles { limit: 3 }), "{err}");

    // ignored files do not count toward the limit
    let opts = CollectOptions {
        max_files: 3,
        extra_patterns: vec!["f[0-1].txt".into()],
        ..CollectOptions::default()
    };
    let project = collect_project(td.path(), &opts).unwrap();
    assert_eq!(project.files.len(), 3);
}

#[test]
fn file_root_is_not_a_directory() {
    let td = assert_fs::TempDir::new().unwrap();
    let file = td.child("plain.txt");
    file.write_str("x").unwrap();
    let err = collect_project(file.path(), &CollectOptions::default()).unwrap_err();
    assert!(matches!(err, FetchError::NotADirectory(_)));
    assert!(err.to_string().contains("is not a directory"), "{err}");
}

#[test]
fn read_file_skips_binary_and_too_large() {
    let dir = assert_fs::TempDir::new().unwrap();
    let bin_child = dir.child("bin.dat");
    let bin_path = bin_child.path().to_path_buf();
    fs::write(&bin_path, [0u8, 255u8, 0u8, 128u8]).unwrap();
    let err = read_file(&bin_path, 1024).unwrap_err();

    let huge_child = dir.child("huge.txt");
    let huge_path = huge_child.path().to_path_buf();
    fs::write(&huge_path, "x".repeat(2048).into_bytes()).unwrap();
    let err2 = read_file(&huge_path, 1000).unwrap_err();

    assert!(format!("{err}").contains("binary"), "{err}");
    assert!(format!("{err2}").contains("exceeds 1000"), "{err2}");
}

#[test]
fn ignore_file_lines_skip_comments() {
    let td = basic_fs();
    assert_eq!(read_ignore_file(td.path()), vec!["/deep"]);
    let empty = assert_fs::TempDir::new().unwrap();
    assert!(read_ignore_file(empty.path()).is_empty());
}

#[test]
fn unanchored_negation_stays_out_of_excluded_dirs() {
    let td = basic_fs();
    td.child(".env.example").write_str("KEY=\n").unwrap();
    td.child("node_modules/pkg/.env.example").write_str("KEY=\n").unwrap();
    let opts = CollectOptions {
        extra_patterns: vec!["!.env.example".into()],
        ..CollectOptions::default()
    };
    let project = collect_project(td.path(), &opts).unwrap();
    let paths = collected_paths(&project);
    assert!(paths.contains(&".env.example"));
    assert!(!paths.iter().any(|p| p.starts_with("node_modules/")));
}
