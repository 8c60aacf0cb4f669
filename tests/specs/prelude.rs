//! Shared harness for the scenarios.

use std::path::PathBuf;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use nudge_adapters::{FakeHttpAdapter, HttpMethod, HttpResponse};
use nudge_core::{Credentials, FakeClock};
use nudge_daemon::lifecycle::build_orchestrator;
use nudge_daemon::{router, AppState, Config};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub use nudge_core::{fingerprint, TaskStatus};
pub use nudge_wire::{BatchCreated, ProfilesResponse, StatusResponse, TaskCreated};
pub use serde_json::json;

pub const PASSWORD: &str = "s3cret";

/// Delay before each probe; scenarios run on paused time.
pub const PROBE_DELAY: Duration = Duration::from_secs(3);

pub struct Reply {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A running service: profiles file on disk, fake upstream, router state.
pub struct Service {
    pub http: FakeHttpAdapter,
    pub state: AppState<FakeHttpAdapter, FakeClock>,
    _dir: TempDir,
}

pub struct ServiceBuilder {
    profiles: Option<String>,
    fallback: Option<Credentials>,
}

impl ServiceBuilder {
    pub fn profiles(mut self, json: Value) -> Self {
        self.profiles = Some(json.to_string());
        self
    }

    pub fn raw_profiles(mut self, text: &str) -> Self {
        self.profiles = Some(text.to_string());
        self
    }

    pub fn fallback(mut self, refresh_token: &str, client_id: &str, client_secret: &str) -> Self {
        self.fallback = Some(Credentials::new(refresh_token, client_id, client_secret));
        self
    }

    pub fn start(self) -> Service {
        let dir = TempDir::new().unwrap();
        let profiles_path = dir.path().join("profiles.json");
        if let Some(text) = &self.profiles {
            std::fs::write(&profiles_path, text).unwrap();
        }
        let log_path = dir.path().join("event-log.txt");
        std::fs::write(&log_path, "Server running on 127.0.0.1:9999\n").unwrap();

        let config = Config {
            password: Some(PASSWORD.into()),
            host: "127.0.0.1".to_string(),
            port: 0,
            time_delay: PROBE_DELAY,
            fallback: self.fallback,
            profiles_path,
            log_path: log_path.clone(),
            drain_timeout: Duration::from_secs(5),
        };

        let http = upstream();
        let orchestrator = build_orchestrator(&config, http.clone(), FakeClock::new());
        let state = AppState::new(orchestrator, config.password.clone(), log_path);
        Service { http, state, _dir: dir }
    }
}

/// Identity provider issues `at-<refresh token>` unless the refresh token
/// starts with `revoked`; every probed API answers 200.
fn upstream() -> FakeHttpAdapter {
    let http = FakeHttpAdapter::new();
    http.set_handler(|call| match call.method {
        HttpMethod::Post => match call.form_field("refresh_token") {
            Some(rt) if rt.starts_with("revoked") => Ok(HttpResponse::new(
                400,
                json!({"error": "invalid_grant", "error_description": "AADSTS70000: revoked"})
                    .to_string(),
            )),
            Some(rt) => Ok(HttpResponse::ok_json(json!({"access_token": format!("at-{rt}")}))),
            None => Ok(HttpResponse::new(400, "{}")),
        },
        HttpMethod::Get => Ok(HttpResponse::new(200, "{}")),
    });
    http
}

impl Service {
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder { profiles: None, fallback: None }
    }

    pub fn log_path(&self) -> PathBuf {
        self.state.log_path().to_path_buf()
    }

    pub async fn send(&self, request: Request<Body>) -> Reply {
        let response = router(self.state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        Reply { status, body: body.to_vec() }
    }

    pub async fn post(&self, uri: &str, json: Value) -> Reply {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> Reply {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn status(&self) -> StatusResponse {
        let reply = self.get(&format!("/status?password={PASSWORD}")).await;
        assert_eq!(reply.status, StatusCode::OK);
        reply.json()
    }

    /// Wait for every dispatched job to finish.
    pub async fn settle(&self) {
        self.state.orchestrator().drain().await;
    }
}

/// Terminal status recorded for `task_id`, if any.
pub fn outcome(status: &StatusResponse, task_id: &str) -> Option<TaskStatus> {
    status
        .task_history
        .iter()
        .find(|e| e.task_id == task_id && e.status != TaskStatus::Started)
        .map(|e| e.status)
}

pub fn profile(name: &str, refresh_token: &str) -> Value {
    json!({
        "name": name,
        "client_id": format!("{name}-client-id"),
        "client_secret": format!("{name}-secret"),
        "refresh_token": refresh_token,
    })
}
