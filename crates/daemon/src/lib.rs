// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! viki engine library
//!
//! Startup and shutdown of an engine instance over a home directory, the
//! process lock guarding it, and the [`Service`] facade front ends call.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod lifecycle;
pub mod logging;
mod service;
pub mod settings;

pub use lifecycle::{
    startup, Config, Daemon, LifecycleError, LockError, LockGuard, LockMatch, ProcessLock,
};
pub use service::Service;
pub use settings::Settings;
