//! Stand-in AI lesson generator for local development.
//!
//! Speaks the same four endpoints as the real service and answers
//! instantly, so the gateway can be exercised without a GPU box.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::Path,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

#[derive(Parser)]
#[command(version, about = "stand-in AI lesson generator")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "127.0.0.1:9000")]
    listen: SocketAddr,
}

#[derive(Debug, Deserialize)]
struct GenerateLesson {
    course: String,
    topic: String,
    celebrity: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    tracing_subscriber::fmt().init();

    let app = Router::new()
        .route("/generate", post(generate))
        .route("/status/{job}", get(status))
        .route("/video-stream/{filename}", get(video_stream))
        .route("/transcript/{filename}", get(transcript));

    let listener = tokio::net::TcpListener::bind(args.listen).await.unwrap();
    info!("fake generator listening on {}", args.listen);
    axum::serve(listener, app).await.unwrap();
}

/// Same filename scheme as the real generator: topic_celebrity_course,
/// spaces underscored.
async fn generate(Json(req): Json<GenerateLesson>) -> impl IntoResponse {
    let slug = format!(
        "{}_{}_{}",
        req.topic.replace(' ', "_"),
        req.celebrity.replace(' ', "_"),
        req.course.replace(' ', "_")
    );
    Json(json!({
        "filename": format!("{slug}.mp4"),
        "text_file": format!("{slug}.json"),
        "jobId": format!("job-{slug}"),
    }))
}

async fn status(Path(job): Path<String>) -> impl IntoResponse {
    Json(json!({
        "jobId": job,
        "status": "completed",
        "progress": 100,
    }))
}

async fn video_stream(Path(filename): Path<String>) -> impl IntoResponse {
    info!("streaming {}", filename);
    let chunks: Vec<Result<Vec<u8>, std::io::Error>> =
        (0..16).map(|_| Ok(vec![0u8; 4096])).collect();
    (
        [(header::CONTENT_TYPE, "video/mp4")],
        Body::from_stream(tokio_stream::iter(chunks)),
    )
}

async fn transcript(Path(filename): Path<String>) -> impl IntoResponse {
    Json(json!({
        "filename": filename,
        "lines": [
            { "start": 0.0, "text": "Welcome to the lesson." },
            { "start": 4.2, "text": "Let's begin." },
        ],
    }))
}
