// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine startup: take the lock, then provision the home.

use tracing::{info, warn};
use viki_storage::fs;

use crate::service::Service;
use crate::settings::Settings;

use super::{Config, Daemon, LifecycleError, LockGuard};

/// Start an engine over `config.home`.
///
/// Fails with [`LifecycleError::LockFailed`] when another engine owns the
/// home; nothing belonging to that engine is touched.
pub fn startup(config: &Config) -> Result<Daemon, LifecycleError> {
    std::fs::create_dir_all(&config.home)?;

    // Acquire lock FIRST: everything after this belongs to us
    let lock = config.process_lock().acquire()?;

    if let Err(e) = provision(config) {
        cleanup_on_failure(config, lock);
        return Err(e);
    }

    info!(home = %config.home.display(), pid = std::process::id(), "Engine started");

    Ok(Daemon { config: config.clone(), lock, service: Service::from_config(config) })
}

/// Create the directories and starter settings a fresh home needs.
fn provision(config: &Config) -> Result<(), LifecycleError> {
    std::fs::create_dir_all(&config.jobs_path)?;
    std::fs::create_dir_all(&config.logs_path)?;

    if !config.settings_path.exists() {
        let starter = serde_json::to_vec_pretty(&Settings::starter())
            .map_err(|source| LifecycleError::Settings { path: config.settings_path.clone(), source })?;
        fs::write_atomic(&config.settings_path, &starter)?;
        info!(path = %config.settings_path.display(), "wrote starter settings");
    }
    Ok(())
}

/// Undo startup after the lock was taken: the marker is ours to remove.
fn cleanup_on_failure(config: &Config, lock: LockGuard) {
    if let Err(e) = config.process_lock().remove() {
        warn!("Failed to remove PID file: {}", e);
    }
    drop(lock);
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
