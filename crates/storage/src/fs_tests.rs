// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn write_atomic_replaces_content_and_leaves_no_tmp() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    write_atomic(&path, b"first").unwrap();
    write_atomic(&path, b"second").unwrap();

    assert_eq!(read_file(&path).unwrap(), b"second");
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn write_atomic_into_missing_dir_fails_cleanly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("config.json");

    assert!(write_atomic(&path, b"x").is_err());
    assert!(!path.exists());
}

#[test]
fn write_json_atomic_pretty_prints() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("v.json");

    write_json_atomic(&path, &serde_json::json!({"a": 1})).unwrap();

    let bytes = read_file(&path).unwrap();
    assert_eq!(serde_json::from_slice::<serde_json::Value>(&bytes).unwrap()["a"], 1);
}

#[test]
fn create_truncated_discards_previous_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("output.txt");
    std::fs::write(&path, "old run\n").unwrap();

    let mut file = create_truncated(&path).unwrap();
    file.write_all(b"new\n").unwrap();
    drop(file);

    assert_eq!(read_file(&path).unwrap(), b"new\n");
}

#[test]
fn list_dirs_skips_files_and_hidden_entries() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("zeta")).unwrap();
    std::fs::create_dir(dir.path().join("alpha")).unwrap();
    std::fs::create_dir(dir.path().join(".staging-1")).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

    assert_eq!(list_dirs(dir.path()).unwrap(), vec!["alpha", "zeta"]);
}

#[test]
fn list_dirs_missing_root_is_error() {
    let dir = tempdir().unwrap();
    assert!(list_dirs(&dir.path().join("nope")).is_err());
}

#[test]
fn remove_dir_all_removes_subtree() {
    let dir = tempdir().unwrap();
    let job = dir.path().join("job");
    std::fs::create_dir_all(job.join("nested")).unwrap();
    std::fs::write(job.join("nested").join("f"), "x").unwrap();

    remove_dir_all(&job).unwrap();

    assert!(!job.exists());
}

#[test]
fn is_dir_and_is_file_distinguish_missing_from_unreadable() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain");
    std::fs::write(&file, "x").unwrap();

    assert!(is_dir(dir.path()).unwrap());
    assert!(is_file(&file).unwrap());
    assert!(!is_dir(&file).unwrap());
    assert!(!is_file(&dir.path().join("missing")).unwrap());
    assert!(is_file(&file.join("child")).is_err());
}
