use std::time::Duration;

use reqwest::header;
use tracing::warn;

use api::request::GenerateLesson;

use crate::config::Upstream;

/// Client for the AI lesson generator.
///
/// Two underlying connections: `control` carries a total deadline for the
/// short JSON calls, `stream` only a connect deadline so a long video
/// relay is never severed mid-flight.
#[derive(Clone)]
pub struct GenService {
    base: String,
    token: String,
    control: reqwest::Client,
    stream: reqwest::Client,
    retries: u32,
    retry_delay: Duration,
}

impl GenService {
    pub fn new(cfg: &Upstream) -> Self {
        let connect = Duration::from_millis(cfg.connect_timeout_ms);
        let control = reqwest::Client::builder()
            .connect_timeout(connect)
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .unwrap();
        let stream = reqwest::Client::builder()
            .connect_timeout(connect)
            .build()
            .unwrap();
        Self {
            base: cfg.url.trim_end_matches('/').to_string(),
            token: cfg.token.clone(),
            control,
            stream,
            retries: cfg.retries,
            retry_delay: Duration::from_millis(cfg.retry_delay_ms),
        }
    }

    /// Single forwarding POST. Never retried, a duplicate attempt would
    /// start a second generation job.
    pub async fn generate(&self, body: &GenerateLesson) -> reqwest::Result<reqwest::Response> {
        let url = format!("{}{}", self.base, api::path::upstream::GENERATE);
        self.decorate(self.control.post(url)).json(body).send().await
    }

    pub async fn status(&self, job: &str) -> reqwest::Result<reqwest::Response> {
        self.get_with_retry(&self.control, api::path::upstream::status(job))
            .await
    }

    pub async fn transcript(&self, filename: &str) -> reqwest::Result<reqwest::Response> {
        self.get_with_retry(&self.control, api::path::upstream::transcript(filename))
            .await
    }

    pub async fn video_stream(&self, filename: &str) -> reqwest::Result<reqwest::Response> {
        self.get_with_retry(&self.stream, api::path::upstream::video_stream(filename))
            .await
    }

    fn decorate(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.token.is_empty() {
            builder
        } else {
            builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token))
        }
    }

    /// Bounded retry with doubling delay, for idempotent GETs only.
    /// `retries == 0` sends exactly once. A 5xx answer counts as a failed
    /// attempt, anything else is definitive and returned as is.
    async fn get_with_retry(
        &self,
        client: &reqwest::Client,
        path: String,
    ) -> reqwest::Result<reqwest::Response> {
        let url = format!("{}{}", self.base, path);
        let mut delay = self.retry_delay;
        let mut attempt = 0;
        loop {
            match self.decorate(client.get(&url)).send().await {
                Ok(response) if response.status().is_server_error() && attempt < self.retries => {
                    warn!(
                        "GET {} answered {}, retrying ({}/{})",
                        path,
                        response.status(),
                        attempt + 1,
                        self.retries
                    );
                }
                Ok(response) => return Ok(response),
                Err(err) if attempt < self.retries => {
                    warn!(
                        "GET {} failed, retrying ({}/{}): {}",
                        path,
                        attempt + 1,
                        self.retries,
                        err
                    );
                }
                Err(err) => return Err(err),
            }
            attempt += 1;
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}
