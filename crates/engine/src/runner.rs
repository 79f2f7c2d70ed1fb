// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job runner: executes a job's steps in order, stopping at the first failure.
//!
//! Per invocation: allocate scratch dir → load definition → run steps →
//! record counters → remove scratch dir. The scratch dir is removed whatever
//! the outcome.

use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use viki_core::{JobDefinition, JobError};
use viki_storage::{fs, JobStore};

use crate::scratch::ScratchDir;
use crate::step::{StepCompletion, StepInvocation};

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Shell used to interpret each step script
    pub shell: PathBuf,
    /// Directory under which per-run scratch dirs are allocated
    pub scratch_root: PathBuf,
    /// Kill a step that runs longer than this
    pub step_timeout: Option<Duration>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            shell: PathBuf::from("/bin/bash"),
            scratch_root: std::env::temp_dir(),
            step_timeout: None,
        }
    }
}

/// Timing and exit code of one executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub index: usize,
    pub exit_code: i32,
    pub elapsed: Duration,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run_number: u64,
    pub return_code: i32,
    pub steps: Vec<StepRecord>,
}

#[derive(Debug, Clone)]
pub struct JobRunner {
    store: JobStore,
    config: RunnerConfig,
}

impl JobRunner {
    pub fn new(store: JobStore, config: RunnerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run every step of `name`, appending `args` to each step invocation.
    ///
    /// A step failure is returned as [`JobError::StepFailed`] (or
    /// [`JobError::StepTimedOut`]) after the failed run has been counted.
    pub async fn run(&self, name: &str, args: &[String]) -> Result<RunReport, JobError> {
        let scratch_root = &self.config.scratch_root;
        let scratch =
            ScratchDir::allocate(scratch_root).map_err(|e| JobError::storage(scratch_root, e))?;

        let result = self.run_in(&scratch, name, args).await;

        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.cleanup() {
            warn!(job = name, path = %scratch_path.display(), error = %e, "failed to remove scratch dir");
        }
        result
    }

    async fn run_in(
        &self,
        scratch: &ScratchDir,
        name: &str,
        args: &[String],
    ) -> Result<RunReport, JobError> {
        let def = self.store.get(name)?;

        let output_path = self.store.layout().output_path(name);
        let output =
            fs::create_truncated(&output_path).map_err(|e| JobError::storage(&output_path, e))?;

        info!(job = name, steps = def.steps.len(), "run started");
        let result = self.run_steps(&def, scratch, args, &output).await;
        drop(output);

        match result {
            Ok(steps) => {
                let def = self.store.record_run(name, true)?;
                info!(job = name, run_number = def.run_number, "run succeeded");
                Ok(RunReport { run_number: def.run_number, return_code: 0, steps })
            }
            Err(err @ (JobError::StepFailed { .. } | JobError::StepTimedOut { .. })) => {
                match self.store.record_run(name, false) {
                    Ok(def) => info!(job = name, run_number = def.run_number, error = %err, "run failed"),
                    Err(e) => warn!(job = name, error = %e, "failed to record failed run"),
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    async fn run_steps(
        &self,
        def: &JobDefinition,
        scratch: &ScratchDir,
        args: &[String],
        output: &File,
    ) -> Result<Vec<StepRecord>, JobError> {
        let mut records = Vec::with_capacity(def.steps.len());

        for (index, command) in def.steps.iter().enumerate() {
            let script =
                scratch.write_script(index, command).map_err(|e| JobError::storage(scratch.path(), e))?;

            debug!(job = %def.name, step = index, "step started");
            let started = Instant::now();
            let completion = StepInvocation {
                shell: &self.config.shell,
                script: &script,
                cwd: scratch.path(),
                args,
                output,
                timeout: self.config.step_timeout,
            }
            .run()
            .await
            .map_err(|e| JobError::storage(&self.config.shell, e))?;

            let outcome = match completion {
                StepCompletion::Finished(outcome) => outcome,
                StepCompletion::TimedOut => {
                    let timeout_secs = self.config.step_timeout.unwrap_or_default().as_secs();
                    warn!(job = %def.name, step = index, timeout_secs, "step timed out");
                    return Err(JobError::StepTimedOut { step: index, timeout_secs });
                }
            };

            records.push(StepRecord { index, exit_code: outcome.exit_code, elapsed: started.elapsed() });
            if !outcome.success {
                warn!(job = %def.name, step = index, exit_code = outcome.exit_code, "step failed");
                return Err(JobError::StepFailed { step: index, exit_code: outcome.exit_code });
            }
            debug!(job = %def.name, step = index, "step completed");
        }

        Ok(records)
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
