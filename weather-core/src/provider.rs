use crate::{
    Config,
    error::{LookupError, WeatherError},
    provider::{viacep::ViaCepResolver, weatherapi::WeatherApiProvider},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod viacep;
pub mod weatherapi;

/// Resolves a postal code to the name of its locality.
#[async_trait]
pub trait LocalityResolver: Send + Sync + Debug {
    async fn resolve_locality(&self, postal_code: &str) -> Result<String, LookupError>;
}

/// Reports the current temperature, in Celsius, for a locality.
#[async_trait]
pub trait TemperatureSource: Send + Sync + Debug {
    async fn current_celsius(&self, locality: &str) -> Result<f64, WeatherError>;
}

/// Construct the postal code resolver from config.
pub fn resolver_from_config(config: &Config) -> anyhow::Result<Arc<dyn LocalityResolver>> {
    let resolver = ViaCepResolver::new(config.lookup.base_url.clone(), config.timeout())?;
    Ok(Arc::new(resolver))
}

/// Construct the temperature source from config. Fails if no API key is configured.
pub fn temperature_source_from_config(
    config: &Config,
) -> anyhow::Result<Arc<dyn TemperatureSource>> {
    let api_key = config.weather_api_key()?;

    let source = WeatherApiProvider::new(
        config.weather.base_url.clone(),
        api_key.to_owned(),
        config.weather.language.clone(),
        config.timeout(),
    )?;

    Ok(Arc::new(source))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
