use std::{env, fs, net::SocketAddr, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub http: Http,
    #[serde(default)]
    pub auth: Auth,
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub upstream: Upstream,
    #[serde(default)]
    pub media: Media,
    #[serde(default)]
    pub catalog: Catalog,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Http {
    #[serde(default = "default_http_listen")]
    pub listen: SocketAddr,
    #[serde(default)]
    pub cors: bool,
}

impl Default for Http {
    fn default() -> Self {
        Self {
            listen: default_http_listen(),
            cors: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Auth {
    /// HS256 secret shared with the platform backend.
    #[serde(default)]
    pub secret: String,
    /// Accounts allowed to log in for a wildcard token.
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Static service tokens with wildcard access.
    #[serde(default)]
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Upstream {
    /// Base URL of the AI lesson generator.
    #[serde(default = "default_upstream_url")]
    pub url: String,
    /// Bearer token attached to generator requests, if non-empty.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
    /// Total deadline for generate/status/transcript calls. The stream
    /// client only carries the connect deadline.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
    /// Extra attempts for idempotent GETs. Generation is never retried.
    #[serde(default)]
    pub retries: u32,
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl Default for Upstream {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            token: Default::default(),
            connect_timeout_ms: default_connect_timeout(),
            request_timeout_ms: default_request_timeout(),
            retries: Default::default(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    /// Lifetime of minted media capability tokens.
    #[serde(default = "default_media_token_ttl")]
    pub token_ttl_ms: u64,
}

impl Default for Media {
    fn default() -> Self {
        Self {
            token_ttl_ms: default_media_token_ttl(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
}

fn default_http_listen() -> SocketAddr {
    SocketAddr::from_str(&format!(
        "0.0.0.0:{}",
        env::var("PORT").unwrap_or(String::from("8888"))
    ))
    .expect("invalid listen address")
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_upstream_url() -> String {
    String::from("http://127.0.0.1:9000")
}

fn default_connect_timeout() -> u64 {
    3_000
}

fn default_request_timeout() -> u64 {
    300_000
}

fn default_retry_delay() -> u64 {
    250
}

fn default_media_token_ttl() -> u64 {
    900_000
}

impl Config {
    pub fn parse(path: Option<String>) -> Self {
        let result = fs::read_to_string(path.unwrap_or(String::from("tutorgate.toml")))
            .or(fs::read_to_string("/etc/tutorgate/tutorgate.toml"))
            .unwrap_or("".to_string());
        let cfg: Self = toml::from_str(result.as_str()).expect("config parse error");
        match cfg.validate() {
            Ok(_) => cfg,
            Err(err) => panic!("config validate [{}]", err),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.upstream.url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("upstream.url must be http or https");
        }
        if !self.auth.accounts.is_empty() && self.auth.secret.is_empty() {
            anyhow::bail!("auth.accounts requires auth.secret");
        }
        if self.media.token_ttl_ms == 0 {
            anyhow::bail!("media.token_ttl_ms must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.log.level, "info");
        assert_eq!(cfg.upstream.retries, 0);
        assert_eq!(cfg.upstream.connect_timeout_ms, 3_000);
        assert!(cfg.catalog.courses.is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_parse_catalog() {
        let cfg: Config = toml::from_str(
            r#"
[auth]
secret = "s"

[[catalog.courses]]
id = 2
title = "React Basics"
lessons = [{ id = "l1", title = "Components and Props" }]
"#,
        )
        .unwrap();
        assert_eq!(cfg.catalog.courses.len(), 1);
        assert_eq!(cfg.catalog.courses[0].id, 2);
        assert_eq!(cfg.catalog.courses[0].lessons[0].title, "Components and Props");
    }

    #[test]
    fn test_parse_reads_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[log]\nlevel = \"debug\"\n").unwrap();
        let cfg = Config::parse(Some(file.path().to_string_lossy().to_string()));
        assert_eq!(cfg.log.level, "debug");
    }

    #[test]
    fn test_parse_missing_file_uses_defaults() {
        let cfg = Config::parse(Some("/nonexistent/tutorgate.toml".to_string()));
        assert_eq!(cfg.log.level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_upstream_url() {
        let cfg: Config = toml::from_str("[upstream]\nurl = \"not a url\"\n").unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_accounts_require_secret() {
        let cfg: Config = toml::from_str(
            r#"
[[auth.accounts]]
username = "admin"
password = "admin"
"#,
        )
        .unwrap();
        assert!(cfg.validate().is_err());
    }
}
