pub const METRICS: &str = "/metrics";
pub const LOGIN: &str = "/api/login";
pub const TOKEN: &str = "/api/token";

pub const GENERATE_VIDEO: &str = "/api/ai/generate-video";

pub fn status(job: &str) -> String {
    format!("/api/ai/status/{}", job)
}

pub fn video(course: &str, filename: &str) -> String {
    format!("/api/ai/video/{}/{}", course, filename)
}

pub fn transcript(filename: &str) -> String {
    format!("/api/ai/transcript/{}", filename)
}

/// Paths on the AI lesson generator.
pub mod upstream {
    pub const GENERATE: &str = "/generate";

    pub fn status(job: &str) -> String {
        format!("/status/{}", job)
    }

    pub fn video_stream(filename: &str) -> String {
        format!("/video-stream/{}", filename)
    }

    pub fn transcript(filename: &str) -> String {
        format!("/transcript/{}", filename)
    }
}
