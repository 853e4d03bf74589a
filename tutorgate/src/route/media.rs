use axum::{
    body::Body,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use http::{header, StatusCode};
use serde::Deserialize;
use tokio_stream::StreamExt;
use tracing::{debug, error, warn};

use auth::media::MediaClaims;

use crate::error::AppError;
use crate::metrics;
use crate::result::Result;
use crate::AppState;

#[derive(Debug, Deserialize)]
struct MediaQuery {
    #[serde(default)]
    token: String,
}

pub fn route() -> Router<AppState> {
    Router::new()
        .route(&api::path::video("{course}", "{filename}"), get(video))
        .route(&api::path::transcript("{filename}"), get(transcript))
}

/// These routes sit outside the bearer-auth layer so `<video>` tags can
/// hit them; the capability token minted at generation time gates them.
fn authorize(state: &AppState, token: &str) -> Result<MediaClaims> {
    if token.is_empty() {
        return Err(AppError::MediaTokenInvalid);
    }
    auth::media::verify(&state.config.auth.secret, token).map_err(|err| {
        warn!("rejected media token: {}", err);
        AppError::MediaTokenInvalid
    })
}

/// Relay one generated video as `video/mp4`.
///
/// The generator's body is piped through as a stream: chunks forward in
/// arrival order, nothing accumulates in memory. When the client goes
/// away axum drops the body, which drops the generator response and
/// aborts the upstream read with it.
async fn video(
    State(state): State<AppState>,
    Path((course, filename)): Path<(u32, String)>,
    Query(query): Query<MediaQuery>,
) -> Result<Response> {
    let grant = authorize(&state, &query.token)?;
    if grant.course != course || grant.video != filename {
        return Err(AppError::MediaTokenInvalid);
    }

    let response = state.generator.video_stream(&filename).await.map_err(|err| {
        metrics::UPSTREAM_FAILURE.inc();
        error!("video stream for {} failed to start: {}", filename, err);
        AppError::StreamInitError
    })?;

    if !response.status().is_success() {
        debug!("generator has no video {}: {}", filename, response.status());
        return Err(AppError::VideoNotFound);
    }

    // The guard rides the stream so the gauge drops on completion and
    // on cancellation alike.
    let relay = metrics::StreamGuard::begin();
    let stream = response.bytes_stream().map(move |chunk| {
        let _ = &relay;
        chunk
    });

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "video/mp4")],
        Body::from_stream(stream),
    )
        .into_response())
}

/// Relay one transcript document.
async fn transcript(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Query(query): Query<MediaQuery>,
) -> Result<Response> {
    let grant = authorize(&state, &query.token)?;
    if grant.transcript != filename {
        return Err(AppError::MediaTokenInvalid);
    }

    metrics::TRANSCRIPT.inc();
    let response = state.generator.transcript(&filename).await.map_err(|err| {
        metrics::UPSTREAM_FAILURE.inc();
        AppError::InternalServerError(err.into())
    })?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(AppError::TranscriptNotFound);
    }
    if !response.status().is_success() {
        metrics::UPSTREAM_FAILURE.inc();
        return Err(AppError::InternalServerError(anyhow::anyhow!(
            "generator answered {} for transcript {}",
            response.status(),
            filename
        )));
    }

    let body = response.bytes().await.map_err(|err| {
        metrics::UPSTREAM_FAILURE.inc();
        AppError::InternalServerError(err.into())
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
