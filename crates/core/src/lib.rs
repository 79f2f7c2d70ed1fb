// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! viki-core: job definitions, home layout, and the error taxonomy

pub mod macros;

pub mod error;
pub mod job;
pub mod layout;
pub mod response;

pub use error::{ErrorKind, JobError, TIMEOUT_EXIT_CODE};
pub use job::{validate_name, JobDefinition, MANAGED_FIELDS};
pub use layout::HomeLayout;
pub use response::{Empty, JobDetail, JobList, JobOutput, Response, RunSummary};
