// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to shut the engine down first.

use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    /// Printed to stderr by `main()`; empty when already reported
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Exit with `code` without printing anything further.
    pub fn quiet(code: i32) -> Self {
        Self::new(code, String::new())
    }

    /// Map a step's exit code onto a process exit status (1..=255).
    pub fn status_for(return_code: i32) -> i32 {
        if (1..=255).contains(&return_code) {
            return_code
        } else {
            1
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
