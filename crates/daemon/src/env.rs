// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

use crate::lifecycle::LifecycleError;

/// Resolve the home directory: VIKI_HOME > ~/.viki
pub fn home_dir() -> Result<PathBuf, LifecycleError> {
    if let Some(dir) = std::env::var_os("VIKI_HOME").filter(|s| !s.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().ok_or(LifecycleError::NoHomeDir)?;
    Ok(home.join(".viki"))
}

/// Log filter directive override (`VIKI_LOG`)
pub fn log_filter() -> Option<String> {
    std::env::var("VIKI_LOG").ok().filter(|s| !s.is_empty())
}

/// Root for per-run scratch directories (`VIKI_SCRATCH_DIR`)
pub fn scratch_dir() -> Option<PathBuf> {
    std::env::var_os("VIKI_SCRATCH_DIR").filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Per-step timeout override. `0` disables the timeout.
pub fn step_timeout() -> Option<Option<Duration>> {
    std::env::var("VIKI_STEP_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(timeout_from_secs)
}

pub(crate) fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
