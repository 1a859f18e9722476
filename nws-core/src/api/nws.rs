use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;

use crate::{
    config::{Config, Coordinates},
    error::{ApiError, truncate_body},
    wire::{ForecastResponse, PointsResponse},
};

use super::WeatherApi;

/// HTTP client for api.weather.gov.
#[derive(Debug, Clone)]
pub struct NwsClient {
    base_url: String,
    http: Client,
}

impl NwsClient {
    /// Build a client with the timeouts and User-Agent from `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/geo+json"));

        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base_url: config.base_url.trim_end_matches('/').to_string(), http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str, url: &str) -> Result<T> {
        tracing::debug!(endpoint, url, "GET");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send {endpoint} request to weather.gov"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read weather.gov {endpoint} response body"))?;

        tracing::debug!(endpoint, %status, bytes = body.len(), "response");

        if !status.is_success() {
            return Err(ApiError::Status { endpoint, status, body: truncate_body(&body) }.into());
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse weather.gov {endpoint} JSON"))
    }
}

#[async_trait]
impl WeatherApi for NwsClient {
    async fn get_points(&self, coordinates: Coordinates) -> Result<PointsResponse> {
        let url = format!("{}/points/{coordinates}", self.base_url);
        self.get_json("points", &url).await
    }

    async fn get_forecast(&self, url: &str) -> Result<ForecastResponse> {
        self.get_json("forecast", url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = NwsClient::new(&Config::default()).unwrap();
        assert_eq!(client.base_url(), "https://api.weather.gov");
    }
}
