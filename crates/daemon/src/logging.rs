// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine log: `tracing` events written to `<home>/logs/viki.log`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use viki_core::layout::LOG_FILENAME;

use crate::lifecycle::{Config, LifecycleError};

/// Install the global subscriber. Keep the returned guard alive until exit;
/// dropping it flushes buffered lines.
pub fn init(config: &Config) -> Result<WorkerGuard, LifecycleError> {
    std::fs::create_dir_all(&config.logs_path)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILENAME)
        .build(&config.logs_path)
        .map_err(|e| LifecycleError::Logging(e.to_string()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter(&config.log_filter))
        .with(fmt_layer)
        .try_init()
        .map_err(|e| LifecycleError::Logging(e.to_string()))?;

    Ok(guard)
}

/// Parse a filter directive, falling back to `info` when it is malformed.
fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
