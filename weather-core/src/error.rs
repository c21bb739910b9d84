use reqwest::StatusCode;

/// Failure while resolving a postal code to a locality.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Postal code {0} not found by lookup service")]
    NotFound(String),
    #[error("Lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Lookup service answered with status {0}")]
    Status(StatusCode),
}

/// Failure while fetching the current temperature for a locality.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Weather request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Weather service answered with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Terminal outcome of a failed pipeline run. One variant per stage that can fail.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid postal code")]
    InvalidPostalCode,
    #[error("postal code not found")]
    PostalCodeNotFound(#[source] LookupError),
    #[error("weather data unavailable")]
    WeatherUnavailable(#[source] WeatherError),
}

impl PipelineError {
    /// Fixed, client-safe message for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            PipelineError::InvalidPostalCode => "invalid postal code",
            PipelineError::PostalCodeNotFound(_) => "postal code not found",
            PipelineError::WeatherUnavailable(_) => "weather data unavailable",
        }
    }
}
