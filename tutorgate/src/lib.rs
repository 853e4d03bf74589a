use std::future::Future;

use axum::{
    extract::Request,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer, validate_request::ValidateRequestHeaderLayer};
use tracing::{error, info_span};

use auth::{access::access_middleware, ManyValidate};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::upstream::GenService;

pub mod config;
pub mod log;
pub mod shutdown;

mod catalog;
mod error;
mod metrics;
mod result;
mod route;
mod upstream;

#[derive(Clone)]
struct AppState {
    config: Config,
    catalog: Catalog,
    generator: GenService,
}

pub fn metrics_register() {
    metrics::REGISTRY
        .register(Box::new(metrics::GENERATE.clone()))
        .unwrap();
    metrics::REGISTRY
        .register(Box::new(metrics::STATUS.clone()))
        .unwrap();
    metrics::REGISTRY
        .register(Box::new(metrics::TRANSCRIPT.clone()))
        .unwrap();
    metrics::REGISTRY
        .register(Box::new(metrics::UPSTREAM_FAILURE.clone()))
        .unwrap();
    metrics::REGISTRY
        .register(Box::new(metrics::STREAMING.clone()))
        .unwrap();
}

pub async fn serve<F>(cfg: Config, listener: TcpListener, signal: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let app_state = AppState {
        catalog: Catalog::new(&cfg.catalog),
        generator: GenService::new(&cfg.upstream),
        config: cfg.clone(),
    };

    let auth_layer = ValidateRequestHeaderLayer::custom(ManyValidate::new(
        cfg.auth.secret.clone(),
        cfg.auth.tokens.clone(),
    ));

    let app = Router::new()
        .merge(
            route::generate::route()
                .merge(route::status::route())
                .route(api::path::TOKEN, post(route::admin::token))
                .layer(middleware::from_fn(access_middleware))
                .layer(auth_layer),
        )
        .merge(route::media::route())
        .route(api::path::LOGIN, post(route::admin::authorize))
        .route(api::path::METRICS, get(metrics))
        .layer(if cfg.http.cors {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
        })
        .with_state(app_state)
        .layer(axum::middleware::from_fn(http_log::print_request_response))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let span = info_span!(
                    "http_request",
                    uri = ?request.uri(),
                    method = ?request.method(),
                    span_id = tracing::field::Empty,
                );
                span.record(
                    "span_id",
                    span.id().unwrap_or(tracing::Id::from_u64(42)).into_u64(),
                );
                span
            }),
        );

    axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await
        .unwrap_or_else(|e| error!("Application error: {e}"));
}

async fn metrics() -> String {
    metrics::ENCODER
        .encode_to_string(&metrics::REGISTRY.gather())
        .unwrap_or_default()
}
