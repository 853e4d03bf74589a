use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use auth::{claims::Claims, Keys, ANY_ID};

use crate::AppState;

const LOGIN_TOKEN_TTL: Duration = Duration::from_secs(60 * 60 * 24);

/// `POST /api/login`. Exchange configured credentials for a wildcard
/// token, for operators and the platform backend.
pub async fn authorize(
    State(state): State<AppState>,
    Json(payload): Json<AuthPayload>,
) -> Result<Json<AuthBody>, AuthError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    if !state
        .config
        .auth
        .accounts
        .iter()
        .any(|account| account.username == payload.username && account.password == payload.password)
    {
        return Err(AuthError::WrongCredentials);
    }
    debug!("login: {}", payload.username);

    let claims = Claims {
        sub: ANY_ID.to_string(),
        courses: Vec::new(),
        exp: expires_at(LOGIN_TOKEN_TTL),
    };
    let token = Keys::new(state.config.auth.secret.as_bytes())
        .token(&claims)
        .map_err(|err| {
            error!("token encoding failed: {}", err);
            AuthError::TokenCreation
        })?;
    Ok(Json(AuthBody::new(token)))
}

/// `POST /api/token`. Mint a user token carrying the purchased-course
/// list. The access layer keeps this service-only.
pub async fn token(
    State(state): State<AppState>,
    Json(payload): Json<TokenPayload>,
) -> Result<Json<AuthBody>, AuthError> {
    let token = Keys::new(state.config.auth.secret.as_bytes())
        .token(&payload.into())
        .map_err(|err| {
            error!("token encoding failed: {}", err);
            AuthError::TokenCreation
        })?;
    Ok(Json(AuthBody::new(token)))
}

fn expires_at(ttl: Duration) -> u64 {
    (SystemTime::now() + ttl)
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[derive(Debug, Deserialize)]
pub struct AuthPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenPayload {
    /// Platform user id the token is minted for.
    pub sub: String,
    /// Ids of the courses this user has purchased.
    #[serde(default)]
    pub courses: Vec<u32>,
    /// Validity in seconds.
    #[serde(default = "default_token_duration")]
    pub duration: u64,
}

fn default_token_duration() -> u64 {
    60 * 60
}

impl From<TokenPayload> for Claims {
    fn from(payload: TokenPayload) -> Self {
        Self {
            sub: payload.sub,
            courses: payload.courses,
            exp: expires_at(Duration::from_secs(payload.duration)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthBody {
    access_token: String,
    token_type: String,
}

impl AuthBody {
    fn new(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    WrongCredentials,
    MissingCredentials,
    TokenCreation,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AuthError::WrongCredentials => (StatusCode::UNAUTHORIZED, "Wrong credentials"),
            AuthError::MissingCredentials => (StatusCode::BAD_REQUEST, "Missing credentials"),
            AuthError::TokenCreation => (StatusCode::INTERNAL_SERVER_ERROR, "Token creation error"),
        };
        (status, Json(json!({ "error": error_message }))).into_response()
    }
}
