//! HTTP client for the Avito search page.

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::header::USER_AGENT;
use reqwest::Client as HttpClient;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::parse::parse_listings;
use super::settings::AvitoConfig;
use crate::domain::RawListing;
use crate::error::SourceError;
use crate::port::ListingSource;

/// [`ListingSource`] backed by one Avito search results page.
pub struct AvitoSource {
    http: HttpClient,
    search_url: String,
    user_agents: Vec<String>,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl AvitoSource {
    #[must_use]
    pub fn from_config(config: &AvitoConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            search_url: config.search_url.clone(),
            user_agents: config.user_agents.clone(),
            retry_max_attempts: config.http.retry_max_attempts,
            retry_backoff_ms: config.http.retry_backoff_ms,
        }
    }

    fn pick_user_agent(&self) -> Option<String> {
        self.user_agents.choose(&mut rand::thread_rng()).cloned()
    }

    async fn get_with_retry(&self, url: &str) -> Result<String, SourceError> {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let mut request = self.http.get(url);
            if let Some(agent) = self.pick_user_agent() {
                request = request.header(USER_AGENT, agent);
            }

            let result = match request.send().await {
                Ok(response) => match response.error_for_status() {
                    Ok(response) => response.text().await,
                    Err(err) => return Err(err.into()),
                },
                Err(err) => Err(err),
            };

            match result {
                Ok(body) => return Ok(body),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }
}

#[async_trait]
impl ListingSource for AvitoSource {
    async fn fetch(&self) -> Result<Vec<RawListing>, SourceError> {
        info!(url = %self.search_url, "Fetching listing page");

        let body = self.get_with_retry(&self.search_url).await?;
        debug!(bytes = body.len(), "Fetched listing page");

        parse_listings(&body)
    }

    fn name(&self) -> &'static str {
        "Avito"
    }
}
