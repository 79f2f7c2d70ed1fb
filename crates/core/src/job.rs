// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job definitions as persisted in `config.json`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::JobError;

/// Keys owned by the store and the runner; callers can never set them.
pub const MANAGED_FIELDS: [&str; 4] = ["name", "runNumber", "lastSuccessfulRun", "lastFailedRun"];

/// A named job: a description plus an ordered list of shell steps.
///
/// Keys other than the known fields are kept in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<String>,
    #[serde(default)]
    pub run_number: u64,
    #[serde(default)]
    pub last_successful_run: u64,
    #[serde(default)]
    pub last_failed_run: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobDefinition {
    /// Build a fresh definition from a create request body.
    ///
    /// Counters start at zero and `name` is taken from the argument; any
    /// managed keys in `data` are discarded.
    pub fn from_request(name: &str, data: Value) -> Result<Self, JobError> {
        let Value::Object(mut map) = data else {
            return Err(JobError::InvalidArgument("Job data must be a JSON object".to_string()));
        };
        for key in MANAGED_FIELDS {
            map.remove(key);
        }

        let description = take_description(&mut map)?.ok_or(JobError::MissingField("description"))?;
        let steps = take_steps(&mut map)?.ok_or(JobError::MissingField("steps"))?;

        Ok(Self {
            name: name.to_string(),
            description,
            steps,
            run_number: 0,
            last_successful_run: 0,
            last_failed_run: 0,
            extra: map,
        })
    }

    /// Parse a stored `config.json`.
    ///
    /// A file without a `steps` key is reported as [`JobError::NoSteps`]; any
    /// other malformation, invalid UTF-8 included, as [`JobError::Unreadable`]. The directory name is
    /// authoritative for `name`.
    pub fn parse(name: &str, bytes: &[u8], path: &Path) -> Result<Self, JobError> {
        let map: Map<String, Value> =
            serde_json::from_slice(bytes).map_err(|e| JobError::unreadable(path, e))?;
        if !map.contains_key("steps") {
            return Err(JobError::NoSteps(name.to_string()));
        }
        let mut def: Self =
            serde_json::from_value(Value::Object(map)).map_err(|e| JobError::unreadable(path, e))?;
        def.name = name.to_string();
        Ok(def)
    }

    /// Merge a partial update into this definition.
    ///
    /// Either every field in `patch` is applied or none is.
    pub fn apply_patch(&mut self, patch: Value) -> Result<(), JobError> {
        let Value::Object(mut map) = patch else {
            return Err(JobError::InvalidArgument("Update data must be a JSON object".to_string()));
        };
        if map.is_empty() {
            return Err(JobError::InvalidArgument("No fields to update".to_string()));
        }
        if let Some(key) = MANAGED_FIELDS.iter().find(|key| map.contains_key(**key)) {
            return Err(JobError::InvalidArgument(format!("Field {key} cannot be updated")));
        }
        let nulled =
            ["description", "steps"].iter().find(|key| map.get(**key).is_some_and(Value::is_null));
        if let Some(key) = nulled {
            return Err(JobError::InvalidArgument(format!("Field {key} cannot be null")));
        }

        let mut next = self.clone();
        if let Some(description) = take_description(&mut map)? {
            next.description = description;
        }
        if let Some(steps) = take_steps(&mut map)? {
            next.steps = steps;
        }
        next.extra.extend(map);

        *self = next;
        Ok(())
    }

    /// Advance the run counters after a completed run and return the new run number.
    pub fn record_run(&mut self, succeeded: bool) -> u64 {
        self.run_number += 1;
        if succeeded {
            self.last_successful_run = self.run_number;
        } else {
            self.last_failed_run = self.run_number;
        }
        self.run_number
    }
}

/// Reject names that cannot map 1:1 onto a single directory under the jobs root.
///
/// Dot-prefixed names are reserved for staging directories.
pub fn validate_name(name: &str) -> Result<(), JobError> {
    if name.trim().is_empty() {
        return Err(JobError::MissingField("name"));
    }
    let bad = name.starts_with('.') || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(JobError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn take_description(map: &mut Map<String, Value>) -> Result<Option<String>, JobError> {
    match map.remove("description") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Err(JobError::MissingField("description")),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(JobError::InvalidArgument("Field description must be a string".to_string())),
    }
}

fn take_steps(map: &mut Map<String, Value>) -> Result<Option<Vec<String>>, JobError> {
    let items = match map.remove("steps") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(JobError::InvalidArgument(
                "Field steps must be an array of strings".to_string(),
            ))
        }
    };
    if items.is_empty() {
        return Err(JobError::MissingField("steps"));
    }
    items
        .into_iter()
        .map(|item| match item {
            Value::String(step) => Ok(step),
            _ => Err(JobError::InvalidArgument("Field steps must be an array of strings".to_string())),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
