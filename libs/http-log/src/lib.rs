use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{error, info, warn};

const SLOW_MILLIS: u128 = 500;

/// One log line per handled request.
///
/// Bodies are never read here: responses from the stream proxy can be
/// arbitrarily large and must pass through untouched.
pub async fn print_request_response(req: Request, next: Next) -> Response {
    let begin = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let res = next.run(req).await;

    let status = res.status();
    let millis = begin.elapsed().as_millis();
    if !status.is_success() && !status.is_redirection() {
        error!("[{} {}] [{}] {}ms", method, uri, status.as_u16(), millis);
    } else if millis >= SLOW_MILLIS {
        warn!("[{} {}] [{}] {}ms", method, uri, status.as_u16(), millis);
    } else {
        info!("[{} {}] [{}] {}ms", method, uri, status.as_u16(), millis);
    }
    res
}
