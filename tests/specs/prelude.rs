// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub use serde_json::{json, Value};
pub use viki_core::ErrorKind;
pub use viki_daemon::{startup, Config, Daemon, LockMatch, ProcessLock, Service};

use tempfile::TempDir;

/// An engine started over a fresh temporary home.
pub struct Engine {
    pub home: TempDir,
    pub scratch: TempDir,
    pub daemon: Daemon,
}

impl Engine {
    pub fn start() -> Self {
        let home = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let mut config = Config::for_home(home.path()).unwrap();
        config.scratch_path = scratch.path().to_path_buf();
        config.step_timeout = None;
        let daemon = startup(&config).unwrap();
        Self { home, scratch, daemon }
    }

    pub fn service(&self) -> &Service {
        self.daemon.service()
    }

    pub fn job_dir(&self, name: &str) -> std::path::PathBuf {
        self.home.path().join("jobs").join(name)
    }

    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(self.scratch.path()).unwrap().count()
    }

    pub async fn create(&self, name: &str, steps: &[&str]) {
        let res = self.service().create(name, json!({"description": "spec job", "steps": steps})).await;
        assert!(res.success, "create {name}: {}", res.message);
    }
}
