//! Request logging middleware

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Log every request with its status and latency
pub async fn logging_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    if duration > state.slow_request_threshold {
        tracing::warn!(%method, %path, ?duration, "slow request");
    }

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = duration.as_secs_f64() * 1000.0,
        "request completed"
    );

    response
}
