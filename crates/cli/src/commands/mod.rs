// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod job;
pub mod lock;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Command {
    #[command(flatten)]
    Job(job::JobCommand),
    /// Compare the lock file with this process: 0 missing, 1 current, -1 other
    Lock,
}
