// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job store: the bijection between job names and on-disk definitions.
//!
//! A job exists iff `<jobs>/<name>/` exists and holds a readable
//! `config.json`. The store does no locking of its own; callers serialize
//! access per job name.

use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;
use viki_core::{validate_name, HomeLayout, JobDefinition, JobError};

use crate::fs;

#[derive(Debug, Clone)]
pub struct JobStore {
    layout: HomeLayout,
}

impl JobStore {
    pub fn new(layout: HomeLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &HomeLayout {
        &self.layout
    }

    /// Names of all jobs, sorted.
    pub fn list(&self) -> Result<Vec<String>, JobError> {
        let jobs_dir = self.layout.jobs_dir();
        fs::list_dirs(&jobs_dir).map_err(|e| JobError::storage(&jobs_dir, e))
    }

    pub fn get(&self, name: &str) -> Result<JobDefinition, JobError> {
        self.require_job_dir(name)?;
        let config_path = self.layout.config_path(name);
        if !fs::is_file(&config_path).map_err(|e| JobError::storage(&config_path, e))? {
            return Err(JobError::JobFileNotFound(name.to_string()));
        }
        let bytes = fs::read_file(&config_path).map_err(|e| JobError::storage(&config_path, e))?;
        JobDefinition::parse(name, &bytes, &config_path)
    }

    /// Create a new job from a request body.
    ///
    /// The definition is written into a dot-prefixed staging directory that
    /// is renamed into place, so a failed create never leaves a job behind.
    pub fn create(&self, name: &str, data: Value) -> Result<JobDefinition, JobError> {
        validate_name(name)?;
        let job_dir = self.layout.job_dir(name);
        if job_dir.try_exists().map_err(|e| JobError::storage(&job_dir, e))? {
            return Err(JobError::AlreadyExists(name.to_string()));
        }
        let def = JobDefinition::from_request(name, data)?;

        let jobs_dir = self.layout.jobs_dir();
        std::fs::create_dir_all(&jobs_dir).map_err(|e| JobError::storage(&jobs_dir, e))?;

        let staging = jobs_dir.join(format!(".staging-{}", Uuid::new_v4()));
        let staged = std::fs::create_dir(&staging)
            .and_then(|_| fs::write_json_atomic(&staging.join(viki_core::layout::CONFIG_FILENAME), &def))
            .and_then(|_| std::fs::rename(&staging, &job_dir));

        if let Err(e) = staged {
            if let Err(cleanup) = fs::remove_dir_all(&staging) {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %staging.display(), error = %cleanup, "failed to remove staging dir");
                }
            }
            if job_dir.try_exists().unwrap_or(false) {
                return Err(JobError::AlreadyExists(name.to_string()));
            }
            return Err(JobError::storage(&job_dir, e));
        }

        info!(job = name, steps = def.steps.len(), "job created");
        Ok(def)
    }

    /// Merge `patch` into an existing job; managed fields are rejected.
    pub fn update(&self, name: &str, patch: Value) -> Result<JobDefinition, JobError> {
        let mut def = self.get(name)?;
        def.apply_patch(patch)?;
        self.write(&def)?;
        info!(job = name, "job updated");
        Ok(def)
    }

    /// Remove the job directory and everything in it.
    pub fn delete(&self, name: &str) -> Result<(), JobError> {
        let job_dir = self.require_job_dir(name)?;
        fs::remove_dir_all(&job_dir).map_err(|e| JobError::storage(&job_dir, e))?;
        info!(job = name, "job deleted");
        Ok(())
    }

    /// Output captured by the most recent run.
    pub fn read_output(&self, name: &str) -> Result<String, JobError> {
        self.require_job_dir(name)?;
        let output_path = self.layout.output_path(name);
        if !fs::is_file(&output_path).map_err(|e| JobError::storage(&output_path, e))? {
            return Err(JobError::OutputNotFound(name.to_string()));
        }
        let bytes = fs::read_file(&output_path).map_err(|e| JobError::storage(&output_path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Advance the run counters of `name` after a completed run.
    ///
    /// Only the job runner calls this; `update` refuses to touch counters.
    pub fn record_run(&self, name: &str, succeeded: bool) -> Result<JobDefinition, JobError> {
        let mut def = self.get(name)?;
        let run_number = def.record_run(succeeded);
        self.write(&def)?;
        debug!(job = name, run_number, succeeded, "run recorded");
        Ok(def)
    }

    /// Validate `name` and return its directory, or `JobNotFound`.
    fn require_job_dir(&self, name: &str) -> Result<PathBuf, JobError> {
        validate_name(name)?;
        let job_dir = self.layout.job_dir(name);
        if !fs::is_dir(&job_dir).map_err(|e| JobError::storage(&job_dir, e))? {
            return Err(JobError::JobNotFound(name.to_string()));
        }
        Ok(job_dir)
    }

    fn write(&self, def: &JobDefinition) -> Result<(), JobError> {
        let config_path = self.layout.config_path(&def.name);
        fs::write_json_atomic(&config_path, def).map_err(|e| JobError::storage(&config_path, e))
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
