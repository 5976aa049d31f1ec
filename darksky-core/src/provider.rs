use crate::{
    Config, FetchResult, Forecast,
    request::ForecastOptions,
    vocabulary::ForecastSection,
};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

pub mod darksky;

pub use darksky::DarkSkyClient;

/// Source of forecasts. Implemented by [`DarkSkyClient`]; callers can swap in
/// their own implementation for tests.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        options: &ForecastOptions,
    ) -> FetchResult<Forecast>;

    async fn forecast_at(
        &self,
        latitude: f64,
        longitude: f64,
        time: DateTime<Utc>,
        exclude: &[ForecastSection],
    ) -> FetchResult<Forecast>;
}

/// Construct a client from config: key, endpoint override, units and language.
pub fn client_from_config(config: &Config) -> anyhow::Result<DarkSkyClient> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
                 Hint: run `darksky configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let mut client = match config.endpoint.as_deref() {
        Some(endpoint) => DarkSkyClient::with_endpoint(api_key, endpoint)
            .context("Invalid endpoint in configuration")?,
        None => DarkSkyClient::new(api_key),
    };

    client.set_units(config.units()?);
    client.set_language(config.language()?);

    Ok(client)
}
