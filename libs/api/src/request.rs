use serde::{Deserialize, Serialize};

/// Body of `POST /api/ai/generate-video`.
///
/// Every field is optional on the wire so the handler can answer missing
/// input with its own error shape instead of a rejection from the
/// extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideo {
    pub course_id: Option<u32>,
    pub lesson_id: Option<String>,
    pub celebrity: Option<String>,
}

/// Body of the generator's `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateLesson {
    /// Course title, not id. The generator builds prompts from names.
    pub course: String,
    /// Lesson title.
    pub topic: String,
    pub celebrity: String,
}
