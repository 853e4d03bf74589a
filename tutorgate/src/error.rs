use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::json;
use tracing::error;

/// Client-facing errors of the gateway.
///
/// Generator error detail is logged at the call site and never forwarded.
#[derive(Debug)]
pub enum AppError {
    /// Required generation fields absent or empty.
    MissingFields,
    /// Caller has not purchased the course.
    NotEntitled,
    /// Course or lesson not in the catalog.
    UnknownLesson,
    /// The generator failed or was unreachable.
    UpstreamFailure,
    /// The generator has no such video.
    VideoNotFound,
    /// The generator has no such transcript.
    TranscriptNotFound,
    /// The video relay could not be established.
    StreamInitError,
    /// Missing, expired, or mismatched media token.
    MediaTokenInvalid,
    InternalServerError(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MissingFields => (
                StatusCode::BAD_REQUEST,
                "courseId, lessonId and celebrity are required",
            ),
            AppError::NotEntitled => (StatusCode::FORBIDDEN, "course not purchased"),
            AppError::UnknownLesson => (StatusCode::NOT_FOUND, "course or lesson not found"),
            AppError::UpstreamFailure => (StatusCode::BAD_GATEWAY, "video generation failed"),
            AppError::VideoNotFound => (StatusCode::NOT_FOUND, "video not found"),
            AppError::TranscriptNotFound => (StatusCode::NOT_FOUND, "transcript not found"),
            AppError::StreamInitError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "video stream failed to start",
            ),
            AppError::MediaTokenInvalid => {
                (StatusCode::FORBIDDEN, "missing or invalid media token")
            }
            AppError::InternalServerError(err) => {
                error!("internal error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::InternalServerError(err.into())
    }
}
