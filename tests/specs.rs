// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level behavioral specs, run against a started engine.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/engine.rs"]
mod engine;
#[path = "specs/jobs.rs"]
mod jobs;
#[path = "specs/runs.rs"]
mod runs;
