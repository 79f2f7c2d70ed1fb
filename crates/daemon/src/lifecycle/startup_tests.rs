// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use super::super::{LockError, LockMatch, ProcessLock};
use super::*;
use tempfile::tempdir;

fn test_config(home: &std::path::Path) -> Config {
    let mut config = Config::for_home(home).unwrap();
    config.scratch_path = home.join("scratch");
    config
}

#[test]
fn startup_provisions_fresh_home() {
    let dir = tempdir().unwrap();
    let config = test_config(&dir.path().join("home"));

    let daemon = startup(&config).unwrap();

    assert!(config.jobs_path.is_dir());
    assert!(config.logs_path.is_dir());
    let settings: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config.settings_path).unwrap()).unwrap();
    assert_eq!(settings, serde_json::json!({"name": "viki"}));
    assert_eq!(config.process_lock().matches().unwrap(), LockMatch::Current);

    daemon.shutdown().unwrap();
}

#[test]
fn startup_keeps_existing_settings() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::write(&config.settings_path, r#"{"name":"ci","logLevel":"debug"}"#).unwrap();

    let daemon = startup(&config).unwrap();

    let text = std::fs::read_to_string(&config.settings_path).unwrap();
    assert!(text.contains("\"ci\""), "got: {text}");
    daemon.shutdown().unwrap();
}

#[test]
fn shutdown_removes_marker_and_releases_lock() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    startup(&config).unwrap().shutdown().unwrap();

    assert!(!config.lock_path.exists());
    let again = startup(&config).unwrap();
    again.shutdown().unwrap();
}

#[test]
fn startup_lock_failed_does_not_remove_existing_files() {
    // Simulate a running engine by holding the lock.
    // A second startup attempt must fail without deleting anything.
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    let _running = ProcessLock::with_pid(&config.lock_path, 12345).acquire().unwrap();

    match startup(&config) {
        Err(LifecycleError::LockFailed(LockError::Held { pid, .. })) => {
            assert_eq!(pid, Some(12345));
        }
        Err(e) => panic!("expected LockFailed, got: {e}"),
        Ok(_) => panic!("expected LockFailed, but startup succeeded"),
    }

    assert!(config.lock_path.exists(), "lock file must not be deleted on LockFailed");
    assert_eq!(std::fs::read_to_string(&config.lock_path).unwrap(), "12345");
}

#[test]
fn lock_file_not_truncated_before_lock_acquired() {
    // Opening the lock file for locking must not truncate it.
    // A running engine's PID must survive another process opening the file.
    let dir = tempdir().unwrap();
    let lock_path = dir.path().join("vikid.pid");

    let running_lock = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .unwrap();
    use fs2::FileExt;
    running_lock.lock_exclusive().unwrap();
    let mut f = &running_lock;
    writeln!(f, "99999").unwrap();

    let second = ProcessLock::with_pid(&lock_path, 1).acquire();

    assert!(matches!(second, Err(LockError::Held { pid: Some(99999), .. })));
    let content = std::fs::read_to_string(&lock_path).unwrap();
    assert_eq!(content.trim(), "99999", "lock file content must not be truncated by another open");
}

#[test]
fn failed_provisioning_removes_our_marker() {
    // A plain file where the jobs directory belongs makes provisioning fail
    // after the lock was taken.
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::write(&config.jobs_path, b"not a directory").unwrap();

    let err = startup(&config).err().unwrap();

    assert!(matches!(err, LifecycleError::Io(_)), "got: {err:?}");
    assert!(!config.lock_path.exists());
    let _next = ProcessLock::new(&config.lock_path).acquire().unwrap();
}
