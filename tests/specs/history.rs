//! Task history scenarios
//!
//! History is bounded, ordered oldest first, and never exposes an
//! email-like profile name.

use crate::prelude::*;

#[tokio::test(start_paused = true)]
async fn history_keeps_the_ten_most_recent_entries() {
    let service = Service::builder().fallback("rt", "cid", "cs").start();

    for _ in 0..7 {
        let reply = service.post("/call", json!({"password": PASSWORD})).await;
        assert_eq!(reply.status.as_u16(), 201);
    }
    service.settle().await;

    let status = service.status().await;
    assert_eq!(status.task_history.len(), nudge_engine::HISTORY_LIMIT);
    let times: Vec<_> = status.task_history.iter().map(|e| e.created_at).collect();
    let mut sorted = times.clone();
    sorted.sort();
    assert_eq!(times, sorted);
}

#[tokio::test(start_paused = true)]
async fn email_profile_names_never_leave_the_process() {
    let service = Service::builder()
        .profiles(json!({"profiles": [profile("alice@example.com", "rt-a")]}))
        .start();

    let reply = service.post("/call-all-profiles", json!({"password": PASSWORD})).await;
    assert!(!reply.text().contains("alice@example.com"));
    service.settle().await;

    let status = service.get(&format!("/status?password={PASSWORD}")).await;
    assert!(!status.text().contains("alice@example.com"));
    assert!(status.text().contains(&fingerprint("alice@example.com")));

    let profiles = service.get(&format!("/profiles?password={PASSWORD}")).await;
    assert!(!profiles.text().contains("alice@example.com"));
}

#[tokio::test(start_paused = true)]
async fn same_profile_gets_same_fingerprint_across_batches() {
    let service = Service::builder()
        .profiles(json!({"profiles": [profile("bob@example.com", "rt-b")]}))
        .start();

    let first: BatchCreated =
        service.post("/call-all-profiles", json!({"password": PASSWORD})).await.json();
    let second: BatchCreated =
        service.post("/call-all-profiles", json!({"password": PASSWORD})).await.json();

    let suffix = |id: &str| id.split_once('-').map(|(_, s)| s.to_string());
    assert_ne!(first.batch_id, second.batch_id);
    assert_eq!(suffix(&first.task_ids[0]), suffix(&second.task_ids[0]));
    service.settle().await;
}
