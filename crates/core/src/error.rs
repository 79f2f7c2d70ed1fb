// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared by the store, the runner, and the service facade.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure classes surfaced to callers of the service facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field is missing, empty, or not allowed
    InvalidArgument,
    /// The job or one of its files is absent
    NotFound,
    /// A job with the same name already exists
    AlreadyExists,
    /// The persisted definition is unreadable or malformed
    Corrupt,
    /// A run step exited non-zero (or timed out)
    StepFailed,
    /// The underlying filesystem operation failed
    StorageError,
}

crate::simple_display! {
    ErrorKind {
        InvalidArgument => "invalid_argument",
        NotFound => "not_found",
        AlreadyExists => "already_exists",
        Corrupt => "corrupt",
        StepFailed => "step_failed",
        StorageError => "storage_error",
    }
}

/// Errors from job store and job runner operations.
///
/// The `Display` strings are the human messages returned in
/// `{success: false, message}` records, so several are fixed phrases.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid job name: {0:?}")]
    InvalidName(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Job not found")]
    JobNotFound(String),

    #[error("Job file not found")]
    JobFileNotFound(String),

    #[error("Job output not found")]
    OutputNotFound(String),

    #[error("Job directory already exists")]
    AlreadyExists(String),

    #[error("Job file could not be read")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Job has no steps")]
    NoSteps(String),

    #[error("Build step failed")]
    StepFailed { step: usize, exit_code: i32 },

    #[error("Build step timed out")]
    StepTimedOut { step: usize, timeout_secs: u64 },

    #[error("Storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Exit code reported for a step killed by the step timeout.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

impl JobError {
    pub fn storage(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Storage { path: path.as_ref().to_path_buf(), source }
    }

    pub fn unreadable(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Unreadable { path: path.as_ref().to_path_buf(), source }
    }

    /// Classify this error into the public taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) | Self::InvalidName(_) | Self::InvalidArgument(_) => {
                ErrorKind::InvalidArgument
            }
            Self::JobNotFound(_) | Self::JobFileNotFound(_) | Self::OutputNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::Unreadable { .. } | Self::NoSteps(_) => ErrorKind::Corrupt,
            Self::StepFailed { .. } | Self::StepTimedOut { .. } => ErrorKind::StepFailed,
            Self::Storage { .. } => ErrorKind::StorageError,
        }
    }

    /// Exit code of the failing step, preserved verbatim for diagnostics.
    pub fn return_code(&self) -> Option<i32> {
        match self {
            Self::StepFailed { exit_code, .. } => Some(*exit_code),
            Self::StepTimedOut { .. } => Some(TIMEOUT_EXIT_CODE),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
