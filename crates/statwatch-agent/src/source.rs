//! HTTP implementation of the stats source.

use async_trait::async_trait;
use reqwest::StatusCode;
use statwatch_core::source::{FetchError, StatsSource};

/// The endpoint this agent watches.
pub const STATS_URL: &str = "http://srv.msk01.gigacorp.local/_stats";

/// Fetches the raw stats line over HTTP.
pub struct HttpStatsSource {
    client: reqwest::Client,
    url: String,
}

impl HttpStatsSource {
    /// Source pointed at [`STATS_URL`].
    pub fn new() -> Self {
        Self::with_url(STATS_URL)
    }

    /// Source pointed at a caller-supplied endpoint (tests, mock server).
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for HttpStatsSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn fetch_raw(&mut self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}
