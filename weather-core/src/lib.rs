//! Core library for the `postal-weather` service.
//!
//! This crate defines:
//! - Postal code validation and temperature unit conversion
//! - Upstream providers (postal code lookup, current weather) behind traits
//! - The request pipeline tying them together
//! - Configuration and the error taxonomy
//!
//! It is used by `postal-weather-server`, but the pipeline can be driven by any caller.

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod postal_code;
pub mod provider;

pub use config::Config;
pub use error::{LookupError, PipelineError, WeatherError};
pub use model::{ErrorResponse, Temperature};
pub use pipeline::WeatherPipeline;
pub use postal_code::is_valid_postal_code;
pub use provider::{LocalityResolver, TemperatureSource};
