// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run scratch directories.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const SCRATCH_PREFIX: &str = "viki-";

/// A uniquely named working directory for one run.
///
/// Step scripts are materialized here and every step runs with it as the
/// current directory. The directory is removed by [`ScratchDir::cleanup`], or
/// on drop if the run unwinds before reaching cleanup.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    pub fn allocate(root: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(root)?;
        let dir = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir_in(root)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `command` as the script for step `index` and return its path.
    pub fn write_script(&self, index: usize, command: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(format!("step-{index}.sh"));
        let mut script = command.to_string();
        if !script.ends_with('\n') {
            script.push('\n');
        }
        std::fs::write(&path, script)?;
        Ok(path)
    }

    pub fn cleanup(self) -> io::Result<()> {
        self.dir.close()
    }
}

#[cfg(test)]
#[path = "scratch_tests.rs"]
mod tests;
