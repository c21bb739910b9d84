use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use postal_weather_core::{ErrorResponse, PipelineError};

/// HTTP face of a failed pipeline run: a fixed status and a fixed message.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] PipelineError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0 {
            PipelineError::InvalidPostalCode => StatusCode::UNPROCESSABLE_ENTITY,
            PipelineError::PostalCodeNotFound(_) => StatusCode::NOT_FOUND,
            PipelineError::WeatherUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self.0 {
            PipelineError::InvalidPostalCode => {}
            PipelineError::PostalCodeNotFound(source) => {
                tracing::warn!(%status, error = %source, "Postal code lookup failed");
            }
            PipelineError::WeatherUnavailable(source) => {
                tracing::warn!(%status, error = %source, "Weather lookup failed");
            }
        }

        (status, Json(ErrorResponse::new(self.0.message()))).into_response()
    }
}
