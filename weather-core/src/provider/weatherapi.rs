use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::WeatherError;

use super::{TemperatureSource, truncate_body};

/// Current conditions from WeatherAPI.com.
#[derive(Clone)]
pub struct WeatherApiProvider {
    base_url: String,
    api_key: String,
    language: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(
        base_url: String,
        api_key: String,
        language: String,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for WeatherAPI")?;

        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), api_key, language, http })
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiProvider")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    current: WaCurrent,
}

#[async_trait]
impl TemperatureSource for WeatherApiProvider {
    async fn current_celsius(&self, locality: &str) -> Result<f64, WeatherError> {
        let url = format!("{}/current.json", self.base_url);

        let res = self
            .http
            .get(url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", locality),
                ("lang", self.language.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status { status, body: truncate_body(&body) });
        }

        let parsed: WaResponse = serde_json::from_str(&body)?;

        tracing::debug!(locality, temp_c = parsed.current.temp_c, "Fetched current temperature");
        Ok(parsed.current.temp_c)
    }
}
