use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Error;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Capability over the two artifacts of one generation.
///
/// Minted when a generation succeeds. The media routes sit outside the
/// bearer-auth layer so plain `<video>` tags can fetch them; this token,
/// passed in the `token` query parameter, is what gates them instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaClaims {
    /// Course the artifacts belong to.
    pub course: u32,
    /// Video filename on the generator.
    pub video: String,
    /// Transcript filename on the generator.
    pub transcript: String,
    pub exp: u64,
}

pub fn sign(
    secret: &str,
    course: u32,
    video: &str,
    transcript: &str,
    ttl: Duration,
) -> Result<String, Error> {
    let claims = MediaClaims {
        course,
        video: video.to_string(),
        transcript: transcript.to_string(),
        exp: (SystemTime::now() + ttl)
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs(),
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

pub fn verify(secret: &str, token: &str) -> Result<MediaClaims, Error> {
    let data = decode::<MediaClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
