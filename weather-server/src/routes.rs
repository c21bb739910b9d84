use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    routing::get,
};
use postal_weather_core::{PipelineError, Temperature, WeatherPipeline};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct AppState {
    pipeline: WeatherPipeline,
}

impl AppState {
    pub fn new(pipeline: WeatherPipeline) -> Self {
        Self { pipeline }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/weather/{postal_code}", get(weather_by_postal_code))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /weather/{postal_code}
///
/// A segment that cannot be decoded as text is an invalid postal code, not a bad request.
async fn weather_by_postal_code(
    State(state): State<AppState>,
    postal_code: Result<Path<String>, PathRejection>,
) -> Result<Json<Temperature>, ApiError> {
    let Path(postal_code) = postal_code.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected postal code path segment");
        PipelineError::InvalidPostalCode
    })?;

    let temperature = state.pipeline.temperature_for(&postal_code).await?;

    tracing::info!(%postal_code, temp_c = temperature.celsius, "Served current temperature");

    Ok(Json(temperature))
}
