// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured result records returned across the service boundary.
//!
//! Every operation answers `{success, message, ...payload}`; failures add an
//! `error` kind so front ends can branch without parsing the message.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, JobError};
use crate::job::JobDefinition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Response<T> {
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Self { success: true, message: message.into(), error: None, payload }
    }

    pub fn failed(err: &JobError, payload: T) -> Self {
        Self { success: false, message: err.to_string(), error: Some(err.kind()), payload }
    }
}

/// Payload for operations that return nothing beyond the status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobList {
    pub jobs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    pub name: String,
    pub config: Option<JobDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub return_code: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOutput {
    pub name: String,
    pub output: String,
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
