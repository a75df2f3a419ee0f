use crate::{
    Config,
    error::LookupError,
    model::{Coordinates, GeocodeMatch, WeatherSnapshot},
    provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Geocoding and forecast backend.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a free-text place name to its single best match.
    async fn geocode(&self, query: &str) -> Result<GeocodeMatch, LookupError>;

    async fn fetch_forecast(&self, at: Coordinates) -> Result<WeatherSnapshot, LookupError>;
}

/// Construct the provider described by the config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::new(&config.endpoints, config.http.timeout_secs)?;
    Ok(Box::new(provider))
}
