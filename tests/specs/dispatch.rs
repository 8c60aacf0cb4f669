//! Dispatch scenarios
//!
//! Ad-hoc and per-profile jobs run detached from the request that started
//! them; failures stay inside the failing job.

use crate::prelude::*;

#[tokio::test(start_paused = true)]
async fn single_call_runs_to_completion() {
    let service = Service::builder().start();

    let reply = service
        .post(
            "/call",
            json!({"password": PASSWORD, "refresh_token": "rt-1", "client_id": "cid", "client_secret": "cs"}),
        )
        .await;
    assert_eq!(reply.status.as_u16(), 201);
    let created: TaskCreated = reply.json();

    let busy = service.status().await;
    assert_eq!(busy.running_tasks, 1);
    assert!(busy.is_busy);

    service.settle().await;

    let idle = service.status().await;
    assert_eq!(idle.running_tasks, 0);
    assert_eq!(outcome(&idle, &created.task_id), Some(TaskStatus::Completed));
    assert_eq!(service.http.gets().len(), nudge_engine::GRAPH_ENDPOINTS.len());
}

#[tokio::test(start_paused = true)]
async fn single_call_paces_probes() {
    let service = Service::builder().fallback("rt", "cid", "cs").start();
    let started = tokio::time::Instant::now();

    service.post("/call", json!({"password": PASSWORD})).await;
    service.settle().await;

    let endpoints = nudge_engine::GRAPH_ENDPOINTS.len() as u32;
    assert!(started.elapsed() >= PROBE_DELAY * endpoints);
}

#[tokio::test(start_paused = true)]
async fn single_call_with_revoked_token_fails_only_in_history() {
    let service = Service::builder().start();

    let reply = service
        .post(
            "/call",
            json!({"password": PASSWORD, "refresh_token": "revoked-1", "client_id": "cid", "client_secret": "cs"}),
        )
        .await;
    // Token exchange happens inside the job, so dispatch itself succeeds
    assert_eq!(reply.status.as_u16(), 201);
    let created: TaskCreated = reply.json();

    service.settle().await;

    let status = service.status().await;
    assert_eq!(outcome(&status, &created.task_id), Some(TaskStatus::Failed));
    assert!(service.http.gets().is_empty());
}

#[tokio::test(start_paused = true)]
async fn batch_dispatches_every_enabled_profile() {
    let service = Service::builder()
        .profiles(json!({"profiles": [
            profile("alpha", "rt-a"),
            profile("beta", "rt-b"),
            {"name": "off", "client_id": "c", "client_secret": "s", "refresh_token": "r", "enabled": false},
        ]}))
        .start();

    let reply = service.post("/call-all-profiles", json!({"password": PASSWORD})).await;
    assert_eq!(reply.status.as_u16(), 201);
    let batch: BatchCreated = reply.json();

    assert_eq!(batch.profiles_count, 2);
    assert!(batch.task_ids.iter().all(|id| id.starts_with(&format!("{}-", batch.batch_id))));
    assert_eq!(service.status().await.running_tasks, 2);

    service.settle().await;
    assert_eq!(service.status().await.running_tasks, 0);
}

#[tokio::test(start_paused = true)]
async fn one_revoked_profile_does_not_stop_its_siblings() {
    let service = Service::builder()
        .profiles(json!({"profiles": [
            profile("a@example.com", "rt-a"),
            profile("b@example.com", "revoked-b"),
            profile("c@example.com", "rt-c"),
        ]}))
        .start();

    let batch: BatchCreated =
        service.post("/call-all-profiles", json!({"password": PASSWORD})).await.json();
    service.settle().await;

    let status = service.status().await;
    assert_eq!(outcome(&status, &batch.task_ids[0]), Some(TaskStatus::Completed));
    assert_eq!(outcome(&status, &batch.task_ids[1]), Some(TaskStatus::Failed));
    assert_eq!(outcome(&status, &batch.task_ids[2]), Some(TaskStatus::Completed));
}

#[tokio::test(start_paused = true)]
async fn batch_without_profiles_is_rejected() {
    let service = Service::builder().start();

    let reply = service.post("/call-all-profiles", json!({"password": PASSWORD})).await;

    assert_eq!(reply.status.as_u16(), 400);
    assert!(reply.text().contains("No profiles configured"));
    assert!(service.status().await.task_history.is_empty());
}

#[tokio::test(start_paused = true)]
async fn broken_profiles_file_behaves_like_no_profiles() {
    let service = Service::builder().raw_profiles("{ not json").start();
    let reply = service.post("/call-all-profiles", json!({"password": PASSWORD})).await;
    assert_eq!(reply.status.as_u16(), 400);
}

#[tokio::test(start_paused = true)]
async fn fallback_credentials_become_the_default_profile() {
    let service = Service::builder().fallback("rt-legacy", "legacy-client", "cs").start();

    let batch: BatchCreated =
        service.post("/call-all-profiles", json!({"password": PASSWORD})).await.json();
    service.settle().await;

    assert_eq!(batch.task_ids, vec![format!("{}-default", batch.batch_id)]);
    let posts = service.http.posts();
    assert_eq!(posts[0].form_field("refresh_token"), Some("rt-legacy"));
}

#[tokio::test(start_paused = true)]
async fn fallback_runs_when_every_profile_is_disabled() {
    let service = Service::builder()
        .profiles(json!({"profiles": [
            {"name": "off", "client_id": "c", "client_secret": "s", "refresh_token": "r", "enabled": false},
        ]}))
        .fallback("rt-legacy", "legacy-client", "cs")
        .start();

    let reply = service.post("/call-all-profiles", json!({"password": PASSWORD})).await;
    assert_eq!(reply.status.as_u16(), 201);
    let batch: BatchCreated = reply.json();
    service.settle().await;

    assert_eq!(batch.task_ids, vec![format!("{}-default", batch.batch_id)]);
    assert_eq!(service.http.posts()[0].form_field("refresh_token"), Some("rt-legacy"));
}

#[tokio::test(start_paused = true)]
async fn malformed_profile_entry_leaves_the_rest_dispatchable() {
    let service = Service::builder()
        .profiles(json!({"profiles": [
            profile("alpha", "rt-a"),
            {"name": "typo", "client_id": "c", "client_secret": "s"},
            profile("beta", "rt-b"),
        ]}))
        .start();

    let batch: BatchCreated =
        service.post("/call-all-profiles", json!({"password": PASSWORD})).await.json();
    service.settle().await;

    assert_eq!(batch.profiles_count, 2);
    assert_eq!(service.http.posts().len(), 2);
}
