use std::time::Duration;

use axum::{extract::State, routing::post, Extension, Json, Router};
use tracing::{error, info};

use api::request::{GenerateLesson, GenerateVideo};
use api::response::{LessonGenerated, VideoReady};
use auth::claims::Claims;

use crate::error::AppError;
use crate::metrics;
use crate::result::Result;
use crate::AppState;

pub fn route() -> Router<AppState> {
    Router::new().route(api::path::GENERATE_VIDEO, post(generate))
}

/// Forward one lesson-video generation to the AI service.
///
/// Checks run in order: field presence, entitlement, catalog lookup.
/// Only then does the generator get called, so a rejected request never
/// leaves the gateway.
async fn generate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<GenerateVideo>,
) -> Result<Json<VideoReady>> {
    // Zero and empty string count as absent, same as the web client sends.
    let (course_id, lesson_id, celebrity) = match (
        payload.course_id.filter(|id| *id > 0),
        payload.lesson_id.filter(|s| !s.is_empty()),
        payload.celebrity.filter(|s| !s.is_empty()),
    ) {
        (Some(course_id), Some(lesson_id), Some(celebrity)) => (course_id, lesson_id, celebrity),
        _ => return Err(AppError::MissingFields),
    };

    if !claims.entitled(course_id) {
        return Err(AppError::NotEntitled);
    }

    let titles = state
        .catalog
        .resolve(course_id, &lesson_id)
        .ok_or(AppError::UnknownLesson)?;

    metrics::GENERATE.inc();
    info!(
        "generating: course={} lesson={} celebrity={} user={}",
        course_id, lesson_id, celebrity, claims.sub
    );

    let request = GenerateLesson {
        course: titles.course,
        topic: titles.lesson,
        celebrity,
    };
    let response = state.generator.generate(&request).await.map_err(|err| {
        metrics::UPSTREAM_FAILURE.inc();
        error!("generator unreachable: {}", err);
        AppError::UpstreamFailure
    })?;

    let status = response.status();
    if !status.is_success() {
        metrics::UPSTREAM_FAILURE.inc();
        let detail = response.text().await.unwrap_or_default();
        error!("generator answered {}: {}", status, detail);
        return Err(AppError::UpstreamFailure);
    }

    let generated = response.json::<LessonGenerated>().await?;

    let token = auth::media::sign(
        &state.config.auth.secret,
        course_id,
        &generated.filename,
        &generated.text_file,
        Duration::from_millis(state.config.media.token_ttl_ms),
    )?;

    Ok(Json(VideoReady {
        video_url: format!(
            "{}?token={}",
            api::path::video(&course_id.to_string(), &generated.filename),
            token
        ),
        transcript_name: generated.text_file,
        job_id: generated.job_id,
        media_token: token,
    }))
}
