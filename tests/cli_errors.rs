use assert_fs::prelude::*;
use predicates::str::contains;

#[test]
fn everything_ignored_is_an_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("node_modules/a.js").write_str("x").unwrap();
    dir.child("logo.png").write_binary(&[0x89, 0x50]).unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("context-crafter")
        .current_dir(&dir)
        .args(["--stdout", "--no-clipboard", "."])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("no files left to assemble"));
}

#[test]
fn empty_folder_is_an_error() {
    let dir = assert_fs::TempDir::new().unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("context-crafter")
        .current_dir(&dir)
        .args(["--stdout", "--no-clipboard", "."])
        .assert()
        .failure()
        .stderr(contains("no files left to assemble"));
}

#[test]
fn chunk_index_out_of_range_errors() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("foo.txt").write_str("hello world").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("context-crafter")
        .current_dir(&dir)
        .args(["--chunk-index", "99", "--stdout", "--no-clipboard", "."])
        .assert()
        .failure()
        .code(3)
        .stderr(contains("chunk index 99 is out of range"));
}

#[test]
fn chunk_index_zero_prints_the_only_chunk() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("foo.txt").write_str("hello world").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("context-crafter")
        .current_dir(&dir)
        .args(["-k", "0", "--stdout", "--no-clipboard", "--mode", "raw", "."])
        .assert()
        .success()
        .stdout("File: foo.txt\n```\nhello world\n```\n\n");
}

#[test]
fn stream_conflicts_with_chunk_index() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("foo.txt").write_str("hello world").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("context-crafter")
        .current_dir(&dir)
        .args(["--stream", "--chunk-index", "0", "--no-clipboard", "."])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn stream_conflicts_with_json() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("foo.txt").write_str("hello world").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("context-crafter")
        .current_dir(&dir)
        .args(["--stream", "--json", "--no-clipboard", "."])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn unknown_mode_is_a_usage_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("foo.txt").write_str("hello world").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("context-crafter")
        .current_dir(&dir)
        .args(["--mode", "smart", "--no-clipboard", "."])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn file_instead_of_folder_errors() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("foo.txt").write_str("hello world").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("context-crafter")
        .current_dir(&dir)
        .args(["--stdout", "--no-clipboard", "foo.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("is not a directory"));
}

#[test]
fn too_many_files_errors() {
    let dir = assert_fs::TempDir::new().unwrap();
    for i in 0..4 {
        dir.child(format!("f{i}.txt")).write_str("x").unwrap();
    }

    assert_cmd::cargo::cargo_bin_cmd!("context-crafter")
        .current_dir(&dir)
        .args(["--max-files", "2", "--stdout", "--no-clipboard", "."])
        .assert()
        .failure()
        .stderr(contains("more than 2 files"));
}
