// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `viki lock` - inspect the engine's lock file without taking it

use anyhow::Result;
use serde::Serialize;
use viki_daemon::{Config, LockMatch};

use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
struct LockReport {
    lock: i32,
    state: String,
    path: String,
}

impl LockReport {
    fn new(config: &Config, state: LockMatch) -> Self {
        Self {
            lock: state.as_i32(),
            state: state.to_string(),
            path: config.lock_path.display().to_string(),
        }
    }
}

pub fn handle(config: &Config, format: OutputFormat) -> Result<()> {
    let state = config.process_lock().matches()?;
    match format {
        OutputFormat::Text => println!("{}", state.as_i32()),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&LockReport::new(config, state))?)
        }
    }
    Ok(())
}
