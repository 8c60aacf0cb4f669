//! HTTP surface scenarios
//!
//! Password checks, listings, the event log and request counters.

use crate::prelude::*;

#[tokio::test]
async fn profiles_listing_masks_client_ids() {
    let service = Service::builder()
        .profiles(json!({"profiles": [profile("ops", "rt")]}))
        .start();

    let reply = service.get(&format!("/profiles?password={PASSWORD}")).await;

    assert_eq!(reply.status.as_u16(), 200);
    let listed: ProfilesResponse = reply.json();
    assert_eq!(listed.total_count, 1);
    assert_eq!(listed.profiles[0].name, "ops");
    assert_eq!(listed.profiles[0].client_id, "ops-clie...");
    assert!(listed.profiles[0].enabled);
}

#[tokio::test]
async fn protected_routes_distinguish_missing_and_wrong_passwords() {
    let service = Service::builder().start();

    assert_eq!(service.post("/call", json!({})).await.status.as_u16(), 401);
    assert_eq!(service.post("/call", json!({"password": "x"})).await.status.as_u16(), 403);
    assert_eq!(service.get("/status").await.status.as_u16(), 401);
    assert_eq!(service.get("/status?password=x").await.status.as_u16(), 403);
}

#[tokio::test]
async fn logs_are_served_with_password() {
    let service = Service::builder().start();
    std::fs::write(service.log_path(), "line one\nline two\n").unwrap();

    let reply = service.get(&format!("/logs?password={PASSWORD}&as_file=true")).await;

    assert_eq!(reply.status.as_u16(), 200);
    assert_eq!(reply.text(), "line one\nline two\n");
}

#[tokio::test(start_paused = true)]
async fn home_counts_requests_successes_and_errors() {
    let service = Service::builder().fallback("rt", "cid", "cs").start();

    service.post("/call", json!({"password": PASSWORD})).await; // 201
    service.post("/call", json!({"password": "x"})).await; // 403
    service.get("/missing").await; // 404
    service.get(&format!("/profiles?password={PASSWORD}")).await; // 200

    let stats: serde_json::Value = service.get("/").await.json();
    assert_eq!(stats["totalRequests"], 5);
    assert_eq!(stats["totalSuccess"], 1);
    assert_eq!(stats["totalErrors"], 2);
    service.settle().await;
}
