// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use nudge_adapters::HttpAdapter;
use nudge_core::Clock;
use nudge_wire::{
    BatchCreated, CallRequest, LogsQuery, PasswordQuery, ProfilesResponse, ServerStats,
    StatusResponse, TaskCreated,
};

use super::{ApiError, AppState};

type JsonBody<T> = Result<Json<T>, JsonRejection>;

/// A JSON-typed body that does not decode is 400; a missing body or any other
/// content type is 415.
fn json_body<T>(body: JsonBody<T>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| match rejection {
        JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
            ApiError::BadRequest("Invalid request.".to_string())
        }
        _ => ApiError::UnsupportedMediaType,
    })
}

pub(super) async fn home<H: HttpAdapter, C: Clock>(
    State(state): State<AppState<H, C>>,
) -> Json<ServerStats> {
    Json(state.stats())
}

pub(super) async fn call<H: HttpAdapter, C: Clock>(
    State(state): State<AppState<H, C>>,
    body: JsonBody<CallRequest>,
) -> Result<(StatusCode, Json<TaskCreated>), ApiError> {
    let request = json_body(body)?;
    state.authorize(request.password())?;

    let task_id = state.orchestrator.run_single(request.credentials())?;
    Ok((StatusCode::CREATED, Json(TaskCreated::new(task_id.as_str()))))
}

pub(super) async fn call_all_profiles<H: HttpAdapter, C: Clock>(
    State(state): State<AppState<H, C>>,
    body: JsonBody<CallRequest>,
) -> Result<(StatusCode, Json<BatchCreated>), ApiError> {
    let request = json_body(body)?;
    state.authorize(request.password())?;

    let batch = state.orchestrator.run_all_profiles()?;
    Ok((StatusCode::CREATED, Json(BatchCreated::new(batch.batch_id.as_str(), batch.task_ids))))
}

pub(super) async fn profiles<H: HttpAdapter, C: Clock>(
    State(state): State<AppState<H, C>>,
    Query(query): Query<PasswordQuery>,
) -> Result<Json<ProfilesResponse>, ApiError> {
    state.authorize(query.password())?;
    Ok(Json(ProfilesResponse::from(state.orchestrator.list_profiles())))
}

pub(super) async fn status<H: HttpAdapter, C: Clock>(
    State(state): State<AppState<H, C>>,
    Query(query): Query<PasswordQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.authorize(query.password())?;
    let snapshot = state.orchestrator.status();
    Ok(Json(StatusResponse {
        running_tasks: snapshot.running_tasks,
        task_history: snapshot.task_history,
        is_busy: snapshot.is_busy,
    }))
}

/// Serve the event log, inline or as a download.
pub(super) async fn logs<H: HttpAdapter, C: Clock>(
    State(state): State<AppState<H, C>>,
    Query(query): Query<LogsQuery>,
) -> Result<Response, ApiError> {
    state.authorize(query.password())?;

    let path = state.log_path();
    let contents = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ApiError::NotFound,
        _ => ApiError::Internal(format!("{}: {}", path.display(), e)),
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    if query.as_attachment() {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", name))
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        headers.insert(CONTENT_DISPOSITION, disposition);
    }
    Ok((headers, contents).into_response())
}

pub(super) async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub(super) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
