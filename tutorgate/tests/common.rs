use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::Router;
use tokio::net::TcpListener;

use tutorgate::config::{Account, Config, Course, Lesson};

pub const SECRET: &str = "test-secret";
pub const SERVICE_TOKEN: &str = "svc-token";

pub async fn listen() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Serve an inline generator stub, return its address.
pub async fn spawn_upstream(app: Router) -> SocketAddr {
    let (listener, addr) = listen().await;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Boot a gateway against `upstream`, return its base URL.
pub async fn spawn_gateway(cfg: Config) -> String {
    let (listener, addr) = listen().await;
    tokio::spawn(tutorgate::serve(cfg, listener, std::future::pending()));
    format!("http://{}", addr)
}

pub fn config(upstream: SocketAddr) -> Config {
    let mut cfg = Config::default();
    cfg.auth.secret = SECRET.to_string();
    cfg.auth.tokens = vec![SERVICE_TOKEN.to_string()];
    cfg.auth.accounts = vec![Account {
        username: "admin".to_string(),
        password: "secret77".to_string(),
    }];
    cfg.upstream.url = format!("http://{}", upstream);
    cfg.upstream.connect_timeout_ms = 1_000;
    cfg.upstream.request_timeout_ms = 3_000;
    cfg.media.token_ttl_ms = 60_000;
    cfg.catalog.courses = vec![Course {
        id: 2,
        title: "React Basics".to_string(),
        lessons: vec![Lesson {
            id: "l1".to_string(),
            title: "Components and Props".to_string(),
        }],
    }];
    cfg
}

/// Authorization header value for a platform user token.
pub fn user_bearer(sub: &str, courses: Vec<u32>) -> String {
    let exp = (SystemTime::now() + Duration::from_secs(3600))
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let token = auth::Keys::new(SECRET.as_bytes())
        .token(&auth::claims::Claims {
            sub: sub.to_string(),
            courses,
            exp,
        })
        .unwrap();
    format!("Bearer {}", token)
}
