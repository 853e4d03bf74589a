use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use http::{header, StatusCode};
use serde_json::json;
use tracing::error;

use crate::metrics;
use crate::AppState;

pub fn route() -> Router<AppState> {
    Router::new().route(&api::path::status("{job}"), get(status))
}

/// Relay one job-status lookup.
///
/// The generator's body passes through byte for byte with its status
/// code. Two shapes are pinned here instead: upstream 404 and transport
/// failure, which the web client matches on.
async fn status(State(state): State<AppState>, Path(job): Path<String>) -> Response {
    metrics::STATUS.inc();

    let response = match state.generator.status(&job).await {
        Ok(response) => response,
        Err(err) => {
            metrics::UPSTREAM_FAILURE.inc();
            error!("status lookup for job {} failed: {}", job, err);
            return status_error();
        }
    };

    if response.status() == StatusCode::NOT_FOUND {
        return (StatusCode::NOT_FOUND, Json(json!({ "status": "not_found" }))).into_response();
    }

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/json")
        .to_string();
    match response.bytes().await {
        Ok(body) => (status, [(header::CONTENT_TYPE, content_type)], body).into_response(),
        Err(err) => {
            metrics::UPSTREAM_FAILURE.inc();
            error!("status body for job {} failed: {}", job, err);
            status_error()
        }
    }
}

fn status_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": "error" })),
    )
        .into_response()
}
