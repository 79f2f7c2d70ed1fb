// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! viki-engine: sequential execution of job steps

mod locks;
mod runner;
mod scratch;
mod step;

pub use locks::{JobGuard, JobLocks};
pub use runner::{JobRunner, RunReport, RunnerConfig, StepRecord};
pub use scratch::ScratchDir;
pub use step::{StepCompletion, StepOutcome};
