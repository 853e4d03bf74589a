use serde::{Deserialize, Serialize};

/// Success body of `POST /api/ai/generate-video`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoReady {
    /// Server-relative playback URL, capability token included.
    pub video_url: String,
    pub transcript_name: String,
    pub job_id: String,
    /// Same token as in `video_url`, for the transcript endpoint.
    pub media_token: String,
}

/// Success body of the generator's `POST /generate`.
///
/// Field casing is the generator's, mixed as it is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonGenerated {
    pub filename: String,
    pub text_file: String,
    #[serde(rename = "jobId")]
    pub job_id: String,
}
