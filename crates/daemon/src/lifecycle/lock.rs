// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process lock: the `vikid.pid` marker naming the active engine instance.
//!
//! `create`/`matches` are the advisory pid-file protocol. `acquire` is what
//! startup uses: it holds an exclusive file lock for the life of the engine,
//! so two engines can never own the same home.

use std::fs::File;
use std::io::{ErrorKind, Write};
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Reopen attempts when the marker is replaced between open and lock.
const ACQUIRE_ATTEMPTS: usize = 8;

#[derive(Debug, Error)]
pub enum LockError {
    #[error("Lock file error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to acquire lock at {}: engine already running?", path.display())]
    Held { path: PathBuf, pid: Option<u32> },
}

impl LockError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }
}

/// Result of comparing the marker with a process id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMatch {
    /// No marker file
    Missing,
    /// Marker names this process
    Current,
    /// Marker names another process (or is unreadable as a pid)
    Other,
}

impl LockMatch {
    /// `0` missing, `1` current, `-1` other.
    pub fn as_i32(self) -> i32 {
        match self {
            LockMatch::Missing => 0,
            LockMatch::Current => 1,
            LockMatch::Other => -1,
        }
    }
}

viki_core::simple_display! {
    LockMatch {
        Missing => "missing",
        Current => "current",
        Other => "other",
    }
}

#[derive(Debug, Clone)]
pub struct ProcessLock {
    path: PathBuf,
    pid: u32,
}

impl ProcessLock {
    /// Lock handle for the current process.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_pid(path, std::process::id())
    }

    pub fn with_pid(path: impl Into<PathBuf>, pid: u32) -> Self {
        Self { path: path.into(), pid }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Whether the marker exists. Failing to inspect it is an error, not `false`.
    pub fn exists(&self) -> Result<bool, LockError> {
        self.path.try_exists().map_err(|e| LockError::io(&self.path, e))
    }

    /// Write our pid to the marker, replacing whatever was there.
    pub fn create(&self) -> Result<(), LockError> {
        std::fs::write(&self.path, self.pid.to_string()).map_err(|e| LockError::io(&self.path, e))
    }

    pub fn matches(&self) -> Result<LockMatch, LockError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LockMatch::Missing),
            Err(e) => return Err(LockError::io(&self.path, e)),
        };
        Ok(match parse_pid(&text) {
            Some(pid) if pid == self.pid => LockMatch::Current,
            _ => LockMatch::Other,
        })
    }

    /// Take the exclusive lock and record our pid in the marker.
    ///
    /// The lock only counts if the locked file is still the one at `path`:
    /// a shutting-down engine unlinks its marker while holding the lock, so a
    /// handle opened just before that unlink is stale and gets reopened.
    pub fn acquire(&self) -> Result<LockGuard, LockError> {
        for _ in 0..ACQUIRE_ATTEMPTS {
            // Open without truncating: a running engine's pid must survive
            // until we actually hold the lock.
            let mut file = std::fs::OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(&self.path)
                .map_err(|e| LockError::io(&self.path, e))?;

            if let Err(e) = file.try_lock_exclusive() {
                if e.kind() == fs2::lock_contended_error().kind() {
                    return Err(self.held());
                }
                return Err(LockError::io(&self.path, e));
            }

            if !is_same_file(&file, &self.path).map_err(|e| LockError::io(&self.path, e))? {
                continue;
            }

            file.set_len(0).map_err(|e| LockError::io(&self.path, e))?;
            write!(file, "{}", self.pid).map_err(|e| LockError::io(&self.path, e))?;
            file.sync_all().map_err(|e| LockError::io(&self.path, e))?;

            return Ok(LockGuard { _file: file, path: self.path.clone() });
        }
        Err(self.held())
    }

    fn held(&self) -> LockError {
        let pid = std::fs::read_to_string(&self.path).ok().as_deref().and_then(parse_pid);
        LockError::Held { path: self.path.clone(), pid }
    }

    /// Delete the marker. A missing marker is not an error.
    pub fn remove(&self) -> Result<(), LockError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LockError::io(&self.path, e)),
        }
    }
}

/// Held exclusive lock on the marker file; released on drop.
#[derive(Debug)]
pub struct LockGuard {
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    _file: File,
    path: PathBuf,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_pid(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

/// Whether the open `file` is the file currently linked at `path`.
fn is_same_file(file: &File, path: &Path) -> std::io::Result<bool> {
    let held = file.metadata()?;
    match std::fs::metadata(path) {
        Ok(linked) => Ok(held.dev() == linked.dev() && held.ino() == linked.ino()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
