// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service facade: the operations front ends call.
//!
//! Every operation answers a [`Response`]; store and runner errors are
//! folded into `{success: false, message, error}` here and never escape.

use serde_json::Value;
use tracing::warn;
use viki_core::{Empty, JobDetail, JobError, JobList, JobOutput, Response, RunSummary};
use viki_engine::{JobLocks, JobRunner, RunnerConfig};
use viki_storage::JobStore;

use crate::lifecycle::Config;

#[derive(Clone)]
pub struct Service {
    store: JobStore,
    runner: JobRunner,
    locks: JobLocks,
}

impl Service {
    pub fn new(store: JobStore, runner_config: RunnerConfig) -> Self {
        let runner = JobRunner::new(store.clone(), runner_config);
        Self { store, runner, locks: JobLocks::new() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(JobStore::new(config.layout()), config.runner_config())
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }

    pub async fn list(&self) -> Response<JobList> {
        match self.store.list() {
            Ok(jobs) => Response::ok("Ok", JobList { jobs }),
            Err(e) => failed("list", &e, JobList::default()),
        }
    }

    pub async fn get(&self, name: &str) -> Response<JobDetail> {
        match self.store.get(name) {
            Ok(def) => Response::ok("Ok", JobDetail { name: name.to_string(), config: Some(def) }),
            Err(e) => failed(name, &e, JobDetail { name: name.to_string(), config: None }),
        }
    }

    pub async fn create(&self, name: &str, data: Value) -> Response<Empty> {
        let _guard = self.locks.lock(name).await;
        match self.store.create(name, data) {
            Ok(_) => Response::ok("Job created successfully", Empty {}),
            Err(e) => failed(name, &e, Empty {}),
        }
    }

    pub async fn update(&self, name: &str, data: Value) -> Response<Empty> {
        let _guard = self.locks.lock(name).await;
        match self.store.update(name, data) {
            Ok(_) => Response::ok("Job successfully updated", Empty {}),
            Err(e) => failed(name, &e, Empty {}),
        }
    }

    pub async fn delete(&self, name: &str) -> Response<Empty> {
        let _guard = self.locks.lock(name).await;
        match self.store.delete(name) {
            Ok(()) => Response::ok("Job deleted", Empty {}),
            Err(e) => failed(name, &e, Empty {}),
        }
    }

    /// Run `name`, appending `args` to every step.
    ///
    /// `return_code` is the failing step's exit code, or 0.
    pub async fn run(&self, name: &str, args: &[String]) -> Response<RunSummary> {
        let _guard = self.locks.lock(name).await;
        match self.runner.run(name, args).await {
            Ok(report) => Response::ok("Run successful", RunSummary { return_code: report.return_code }),
            Err(e) => {
                let return_code = e.return_code().unwrap_or(0);
                failed(name, &e, RunSummary { return_code })
            }
        }
    }

    pub async fn output(&self, name: &str) -> Response<JobOutput> {
        let _guard = self.locks.lock(name).await;
        match self.store.read_output(name) {
            Ok(output) => Response::ok("Ok", JobOutput { name: name.to_string(), output }),
            Err(e) => failed(name, &e, JobOutput { name: name.to_string(), output: String::new() }),
        }
    }
}

fn failed<T>(job: &str, err: &JobError, payload: T) -> Response<T> {
    warn!(job, kind = %err.kind(), error = %err, "operation failed");
    Response::failed(err, payload)
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
