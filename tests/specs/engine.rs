// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine startup, lock ownership and shutdown.

use crate::prelude::*;

#[test]
fn started_engine_owns_the_marker() {
    let engine = Engine::start();
    let lock = engine.daemon.config.process_lock();

    assert!(lock.exists().unwrap());
    assert_eq!(lock.matches().unwrap(), LockMatch::Current);
    assert_eq!(lock.matches().unwrap().as_i32(), 1);
}

#[test]
fn marker_tri_state() {
    let engine = Engine::start();
    let path = engine.daemon.config.lock_path.clone();

    assert_eq!(ProcessLock::with_pid(&path, 1).matches().unwrap().as_i32(), -1);

    engine.daemon.shutdown().unwrap();
    assert_eq!(ProcessLock::new(&path).matches().unwrap().as_i32(), 0);
}

#[test]
fn second_engine_on_same_home_is_refused() {
    let engine = Engine::start();
    let config = engine.daemon.config.clone();

    let second = startup(&config);

    assert!(second.is_err());
    assert_eq!(config.process_lock().matches().unwrap(), LockMatch::Current);
}

#[test]
fn restart_after_shutdown() {
    let Engine { home, scratch: _scratch, daemon } = Engine::start();
    let config = daemon.config.clone();
    daemon.shutdown().unwrap();

    let again = startup(&config).unwrap();

    assert!(home.path().join("jobs").is_dir());
    again.shutdown().unwrap();
}
