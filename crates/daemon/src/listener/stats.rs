// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use nudge_wire::ServerStats;
use parking_lot::Mutex;

/// Count every request and classify it by response status.
pub(super) async fn track(
    State(stats): State<Arc<Mutex<ServerStats>>>,
    request: Request,
    next: Next,
) -> Response {
    stats.lock().record_request();
    let response = next.run(request).await;
    stats.lock().record_response(response.status().as_u16());
    response
}
