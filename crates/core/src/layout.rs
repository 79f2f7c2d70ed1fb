// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk layout of a viki home directory.
//!
//! ```text
//! <home>/jobs/<job-name>/config.json
//! <home>/jobs/<job-name>/output.txt
//! <home>/vikid.pid
//! <home>/viki.json
//! <home>/logs/viki.log
//! ```

use std::path::{Path, PathBuf};

pub const JOBS_DIR: &str = "jobs";
pub const LOGS_DIR: &str = "logs";
pub const CONFIG_FILENAME: &str = "config.json";
pub const OUTPUT_FILENAME: &str = "output.txt";
pub const PID_FILENAME: &str = "vikid.pid";
pub const SETTINGS_FILENAME: &str = "viki.json";
pub const LOG_FILENAME: &str = "viki.log";

/// Paths derived from a single home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeLayout {
    home: PathBuf,
}

impl HomeLayout {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn jobs_dir(&self) -> PathBuf {
        self.home.join(JOBS_DIR)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.home.join(LOGS_DIR)
    }

    pub fn pid_path(&self) -> PathBuf {
        self.home.join(PID_FILENAME)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.home.join(SETTINGS_FILENAME)
    }

    pub fn job_dir(&self, name: &str) -> PathBuf {
        self.jobs_dir().join(name)
    }

    pub fn config_path(&self, name: &str) -> PathBuf {
        self.job_dir(name).join(CONFIG_FILENAME)
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.job_dir(name).join(OUTPUT_FILENAME)
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
