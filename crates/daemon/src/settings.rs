// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine settings file (`<home>/viki.json`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::lifecycle::LifecycleError;

/// Optional engine settings. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Kill steps that run longer than this; `0` disables the limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Settings {
    /// Contents written when a home is provisioned for the first time.
    pub fn starter() -> Self {
        Self { name: Some("viki".to_string()), ..Self::default() }
    }

    /// Read settings from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, LifecycleError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&text)
            .map_err(|source| LifecycleError::Settings { path: path.to_path_buf(), source })
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
