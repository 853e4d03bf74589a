use axum::{extract::Request, middleware::Next, response::Response};
use http::{header, Method, StatusCode};

use crate::claims::Claims;

/// Route-level authorization, applied after token validation.
///
/// Ordinary user claims may reach the generation and status operations.
/// Everything else behind the auth layer is for service tokens only.
pub async fn access_middleware(request: Request, next: Next) -> Response {
    let allowed = match request.extensions().get::<Claims>() {
        Some(claims) => {
            claims.is_wildcard()
                || match (request.method(), request.uri().path()) {
                    (&Method::POST, path) if path == api::path::GENERATE_VIDEO => true,
                    (&Method::GET, path) if path.starts_with(&api::path::status("")) => true,
                    _ => false,
                }
        }
        None => false,
    };

    if allowed {
        next.run(request).await
    } else {
        Response::builder()
            .status(StatusCode::FORBIDDEN)
            .header(header::CONTENT_TYPE, "application/json")
            .body(r#"{"error":"permission denied"}"#.into())
            .unwrap()
    }
}
