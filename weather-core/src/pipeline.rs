//! Postal code → locality → temperature, one request at a time.
//!
//! Stages run in order and the first failure ends the run:
//! validate, resolve the locality, fetch the Celsius reading, convert.

use std::sync::Arc;

use crate::{
    error::PipelineError,
    model::Temperature,
    postal_code::is_valid_postal_code,
    provider::{LocalityResolver, TemperatureSource},
};

#[derive(Debug, Clone)]
pub struct WeatherPipeline {
    resolver: Arc<dyn LocalityResolver>,
    source: Arc<dyn TemperatureSource>,
}

impl WeatherPipeline {
    pub fn new(resolver: Arc<dyn LocalityResolver>, source: Arc<dyn TemperatureSource>) -> Self {
        Self { resolver, source }
    }

    pub async fn temperature_for(&self, postal_code: &str) -> Result<Temperature, PipelineError> {
        if !is_valid_postal_code(postal_code) {
            return Err(PipelineError::InvalidPostalCode);
        }

        // The raw code, hyphen included, is what the lookup service receives.
        let locality = self
            .resolver
            .resolve_locality(postal_code)
            .await
            .map_err(PipelineError::PostalCodeNotFound)?;

        let celsius = self
            .source
            .current_celsius(&locality)
            .await
            .map_err(PipelineError::WeatherUnavailable)?;

        Ok(Temperature::from_celsius(celsius))
    }
}
