// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job store behavior through the service facade.

use crate::prelude::*;

#[tokio::test]
async fn create_injects_managed_fields() {
    let engine = Engine::start();

    let res = engine
        .service()
        .create("build", json!({"description": "d", "steps": ["make"], "runNumber": 7, "name": "other"}))
        .await;
    assert!(res.success);

    let text = std::fs::read_to_string(engine.job_dir("build").join("config.json")).unwrap();
    let stored: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(stored["name"], "build");
    assert_eq!(stored["runNumber"], 0);
    assert_eq!(stored["lastSuccessfulRun"], 0);
    assert_eq!(stored["lastFailedRun"], 0);
    assert_eq!(stored["steps"], json!(["make"]));
}

#[tokio::test]
async fn duplicate_create_leaves_first_unchanged() {
    let engine = Engine::start();
    engine.create("build", &["make"]).await;

    let res = engine.service().create("build", json!({"description": "x", "steps": ["rm -rf /"]})).await;

    assert!(!res.success);
    assert_eq!(res.error, Some(ErrorKind::AlreadyExists));
    let detail = engine.service().get("build").await;
    assert_eq!(detail.payload.config.unwrap().steps, vec!["make"]);
}

#[tokio::test]
async fn create_without_steps_leaves_nothing_behind() {
    let engine = Engine::start();

    let res = engine.service().create("build", json!({"description": "d"})).await;

    assert!(!res.success);
    assert_eq!(res.error, Some(ErrorKind::InvalidArgument));
    assert!(res.message.contains("steps"), "got: {}", res.message);
    assert!(!engine.job_dir("build").exists());
}

#[tokio::test]
async fn failed_create_does_not_change_list() {
    let engine = Engine::start();
    engine.create("alpha", &["true"]).await;
    let before = engine.service().list().await.payload.jobs;

    engine.service().create("beta", json!({"steps": ["true"]})).await;
    engine.service().create("alpha", json!({"description": "d", "steps": ["true"]})).await;

    assert_eq!(engine.service().list().await.payload.jobs, before);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let engine = Engine::start();
    engine.create("build", &["make"]).await;
    engine.service().run("build", &[]).await;
    assert!(engine.job_dir("build").join("output.txt").exists());

    assert!(engine.service().delete("build").await.success);

    let res = engine.service().get("build").await;
    assert!(!res.success);
    assert_eq!(res.error, Some(ErrorKind::NotFound));
    assert!(!engine.job_dir("build").exists());
}

#[tokio::test]
async fn update_keeps_unknown_keys() {
    let engine = Engine::start();
    engine
        .service()
        .create("build", json!({"description": "d", "steps": ["make"], "owner": "ops"}))
        .await;

    let res = engine.service().update("build", json!({"steps": ["make", "make install"]})).await;
    assert!(res.success);

    let def = engine.service().get("build").await.payload.config.unwrap();
    assert_eq!(def.steps, vec!["make", "make install"]);
    assert_eq!(def.extra.get("owner"), Some(&json!("ops")));
}

#[tokio::test]
async fn list_is_sorted_and_skips_files() {
    let engine = Engine::start();
    engine.create("zeta", &["true"]).await;
    engine.create("alpha", &["true"]).await;
    std::fs::write(engine.home.path().join("jobs").join("notes.txt"), "x").unwrap();

    assert_eq!(engine.service().list().await.payload.jobs, vec!["alpha", "zeta"]);
}
