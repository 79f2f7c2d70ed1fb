// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine lifecycle management: configuration, startup, shutdown.

mod lock;
mod startup;
pub use lock::{LockError, LockGuard, LockMatch, ProcessLock};
pub use startup::startup;

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};
use viki_core::layout::LOG_FILENAME;
use viki_core::HomeLayout;
use viki_engine::RunnerConfig;

use crate::env;
use crate::service::Service;
use crate::settings::Settings;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root home directory (e.g. ~/.viki)
    pub home: PathBuf,
    /// Directory holding one subdirectory per job
    pub jobs_path: PathBuf,
    /// Directory for the engine log
    pub logs_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to the settings file
    pub settings_path: PathBuf,
    /// Root for per-run scratch directories
    pub scratch_path: PathBuf,
    /// Shell used to run steps
    pub shell: PathBuf,
    pub step_timeout: Option<Duration>,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Config {
    /// Load configuration for the home named by `VIKI_HOME` (or `~/.viki`).
    pub fn load() -> Result<Self, LifecycleError> {
        Self::for_home(env::home_dir()?)
    }

    /// Configuration for an explicit home directory.
    ///
    /// Precedence: environment, then `viki.json`, then built-in defaults.
    pub fn for_home(home: impl Into<PathBuf>) -> Result<Self, LifecycleError> {
        let layout = HomeLayout::new(home);
        let settings_path = layout.settings_path();
        let settings = Settings::load(&settings_path)?;
        let defaults = RunnerConfig::default();

        let step_timeout = match env::step_timeout() {
            Some(timeout) => timeout,
            None => settings.step_timeout_secs.and_then(env::timeout_from_secs),
        };

        Ok(Self {
            jobs_path: layout.jobs_dir(),
            logs_path: layout.logs_dir(),
            lock_path: layout.pid_path(),
            scratch_path: env::scratch_dir()
                .or(settings.scratch_dir)
                .unwrap_or(defaults.scratch_root),
            shell: settings.shell.unwrap_or(defaults.shell),
            step_timeout,
            log_filter: env::log_filter()
                .or(settings.log_level)
                .unwrap_or_else(|| "info".to_string()),
            settings_path,
            home: layout.home().to_path_buf(),
        })
    }

    pub fn layout(&self) -> HomeLayout {
        HomeLayout::new(&self.home)
    }

    pub fn log_path(&self) -> PathBuf {
        self.logs_path.join(LOG_FILENAME)
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            shell: self.shell.clone(),
            scratch_root: self.scratch_path.clone(),
            step_timeout: self.step_timeout,
        }
    }

    pub fn process_lock(&self) -> ProcessLock {
        ProcessLock::new(&self.lock_path)
    }
}

/// A running engine instance: owns the process lock for its home.
pub struct Daemon {
    pub config: Config,
    lock: LockGuard,
    service: Service,
}

impl Daemon {
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Remove the marker and release the lock.
    pub fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down engine...");

        if let Err(e) = self.config.process_lock().remove() {
            warn!("Failed to remove PID file: {}", e);
        }
        drop(self.lock);

        info!("Engine shutdown complete");
        Ok(())
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error(transparent)]
    LockFailed(#[from] LockError),

    #[error("Invalid settings file {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
