// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job runner behavior through the service facade.

use crate::prelude::*;

#[tokio::test]
async fn run_missing_job() {
    let engine = Engine::start();

    let res = engine.service().run("nope", &[]).await;

    assert!(!res.success);
    assert_eq!(res.message, "Job not found");
}

#[tokio::test]
async fn all_steps_succeed_in_order() {
    let engine = Engine::start();
    engine.create("build", &["echo one; exit 0", "echo two; exit 0"]).await;

    let res = engine.service().run("build", &[]).await;
    assert!(res.success, "{}", res.message);
    assert_eq!(res.payload.return_code, 0);

    let output = engine.service().output("build").await.payload.output;
    let one = output.find("one\n").unwrap();
    let two = output.find("two\n").unwrap();
    assert!(one < two, "got: {output}");
}

#[tokio::test]
async fn first_failure_stops_the_run() {
    let engine = Engine::start();
    engine.create("build", &["echo A", "exit 1", "echo B"]).await;

    let res = engine.service().run("build", &[]).await;

    assert!(!res.success);
    assert_eq!(res.message, "Build step failed");
    assert_eq!(res.payload.return_code, 1);
    let output = engine.service().output("build").await.payload.output;
    assert!(output.contains("A\n"));
    assert!(!output.contains("echo B"));
}

#[tokio::test]
async fn steps_do_not_share_shell_state() {
    let engine = Engine::start();
    engine.create("build", &["export SECRET=1; cd /", "echo \"secret=[${SECRET:-}]\""]).await;

    engine.service().run("build", &[]).await;

    let output = engine.service().output("build").await.payload.output;
    assert!(output.contains("secret=[]"), "got: {output}");
}

#[tokio::test]
async fn scratch_dirs_do_not_outlive_runs() {
    let engine = Engine::start();
    engine.create("ok", &["touch artifact"]).await;
    engine.create("bad", &["touch artifact", "false"]).await;

    engine.service().run("ok", &[]).await;
    engine.service().run("bad", &[]).await;

    assert_eq!(engine.scratch_entries(), 0);
}

#[tokio::test]
async fn counters_track_outcomes() {
    let engine = Engine::start();
    engine.create("build", &["test \"$1\" = pass"]).await;

    engine.service().run("build", &["pass".to_string()]).await;
    engine.service().run("build", &["fail".to_string()]).await;
    engine.service().run("build", &["pass".to_string()]).await;

    let def = engine.service().get("build").await.payload.config.unwrap();
    assert_eq!(def.run_number, 3);
    assert_eq!(def.last_successful_run, 3);
    assert_eq!(def.last_failed_run, 2);
}

#[tokio::test]
async fn corrupt_definition_is_reported() {
    let engine = Engine::start();
    engine.create("build", &["true"]).await;
    std::fs::write(engine.job_dir("build").join("config.json"), "{").unwrap();

    let res = engine.service().run("build", &[]).await;

    assert_eq!(res.message, "Job file could not be read");
    assert_eq!(res.error, Some(ErrorKind::Corrupt));
}
