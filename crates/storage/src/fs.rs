// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Primitive file operations over job directories.
//!
//! No job semantics live here: callers translate `io::Error` into
//! [`viki_core::JobError`] with the path that failed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Raw contents of `path`. Decoding is left to the caller.
pub fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
}

/// Replace `path` with `contents` via a sibling temp file and a rename.
///
/// Readers observe either the old or the new file, never a partial write.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let tmp_path = tmp_path(path);
    let result = (|| {
        let mut file = File::create(&tmp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let json = serde_json::to_vec_pretty(value).map_err(io::Error::other)?;
    write_atomic(path, &json)
}

/// Open `path` for writing, truncating any previous content.
pub fn create_truncated(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create(true).truncate(true).open(path)
}

pub fn remove_dir_all(path: &Path) -> io::Result<()> {
    fs::remove_dir_all(path)
}

/// Whether `path` is a directory. Only a missing path reads as `false`.
pub fn is_dir(path: &Path) -> io::Result<bool> {
    metadata_or_missing(path).map(|meta| meta.is_some_and(|m| m.is_dir()))
}

/// Whether `path` is a regular file. Only a missing path reads as `false`.
pub fn is_file(path: &Path) -> io::Result<bool> {
    metadata_or_missing(path).map(|meta| meta.is_some_and(|m| m.is_file()))
}

fn metadata_or_missing(path: &Path) -> io::Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Names of the immediate subdirectories of `root`, sorted.
///
/// Dot-prefixed entries are skipped.
pub fn list_dirs(root: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
