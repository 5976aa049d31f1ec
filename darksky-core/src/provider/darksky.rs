use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url, header::ACCEPT_ENCODING};
use tracing::{debug, warn};

use crate::{
    error::{ConfigError, RequestError},
    metadata::Metadata,
    model::Forecast,
    provider::ForecastProvider,
    request::{Endpoint, ForecastOptions, ForecastRequest},
    result::FetchResult,
    vocabulary::{ForecastSection, Language, Units},
};

/// Client for the Dark Sky forecast and time machine endpoints.
///
/// Holds only immutable request configuration; every call is independent and
/// may run concurrently with others on the same client.
#[derive(Debug, Clone)]
pub struct DarkSkyClient {
    api_key: String,
    endpoint: Endpoint,
    http: Client,
    units: Option<Units>,
    language: Option<Language>,
}

impl DarkSkyClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: Endpoint::default(),
            http: Client::new(),
            units: None,
            language: None,
        }
    }

    /// Client against a non-default base URL, e.g. a proxy or a test server.
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: Endpoint::parse(endpoint)?,
            ..Self::new(api_key)
        })
    }

    /// Use a preconfigured reqwest client (timeouts, proxies, user agent).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn units(&self) -> Option<Units> {
        self.units
    }

    pub fn set_units(&mut self, units: Option<Units>) {
        self.units = units;
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn set_language(&mut self, language: Option<Language>) {
        self.language = language;
    }

    /// The URL a request would be sent to, with the client's units and language applied.
    pub fn request_url(&self, request: ForecastRequest) -> Url {
        let request = request
            .with_units(self.units)
            .with_language(self.language);

        self.endpoint.forecast_url(&self.api_key, &request)
    }

    /// Current forecast at a location.
    pub async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        options: &ForecastOptions,
    ) -> FetchResult<Forecast> {
        let url = self.request_url(ForecastRequest::new(latitude, longitude).with_options(options));
        self.fetch(url).await
    }

    /// Observed or forecast conditions at a location at `time`.
    pub async fn get_forecast_at(
        &self,
        latitude: f64,
        longitude: f64,
        time: DateTime<Utc>,
        exclude: &[ForecastSection],
    ) -> FetchResult<Forecast> {
        let options = ForecastOptions::new().excluding(exclude.iter().copied());
        let url = self.request_url(
            ForecastRequest::new(latitude, longitude)
                .at(time)
                .with_options(&options),
        );
        self.fetch(url).await
    }

    async fn fetch(&self, url: Url) -> FetchResult<Forecast> {
        self.try_fetch(url).await.into()
    }

    async fn try_fetch(&self, url: Url) -> Result<(Forecast, Metadata), RequestError> {
        let target = self.endpoint.redact(&url);
        debug!(url = %target, "requesting forecast");

        let response = self
            .http
            .get(url)
            .header(ACCEPT_ENCODING, "gzip")
            .send()
            .await
            .inspect_err(|e| warn!(url = %target, error = %e, "forecast request failed"))?;

        let status = response.status();
        let metadata = Metadata::from_headers(response.headers());
        let body = response
            .bytes()
            .await
            .inspect_err(|e| warn!(url = %target, error = %e, "failed to read forecast body"))?
            .to_vec();

        if !status.is_success() {
            warn!(url = %target, %status, body = %truncate_body(&body), "provider returned an error status");
            return Err(RequestError::Status { status, body });
        }

        match Forecast::from_slice(&body) {
            Ok(forecast) => {
                debug!(
                    url = %target,
                    api_calls = ?metadata.api_requests_today,
                    response_time_ms = ?metadata.response_time,
                    "forecast decoded"
                );
                Ok((forecast, metadata))
            }
            Err(source) => {
                warn!(url = %target, error = %source, body = %truncate_body(&body), "invalid forecast payload");
                Err(RequestError::InvalidPayload { body, source })
            }
        }
    }
}

#[async_trait]
impl ForecastProvider for DarkSkyClient {
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        options: &ForecastOptions,
    ) -> FetchResult<Forecast> {
        self.get_forecast(latitude, longitude, options).await
    }

    async fn forecast_at(
        &self,
        latitude: f64,
        longitude: f64,
        time: DateTime<Utc>,
        exclude: &[ForecastSection],
    ) -> FetchResult<Forecast> {
        self.get_forecast_at(latitude, longitude, time, exclude).await
    }
}

fn truncate_body(body: &[u8]) -> String {
    const MAX: usize = 200;
    let text = String::from_utf8_lossy(body);
    if text.chars().count() > MAX {
        format!("{}...", text.chars().take(MAX).collect::<String>())
    } else {
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_applies_units_and_language() {
        let mut client = DarkSkyClient::new("KEY");
        client.set_units(Some(Units::Ca));
        client.set_language(Some(Language::French));

        let url = client.request_url(ForecastRequest::new(45.5, -73.6));

        assert_eq!(url.path(), "/forecast/KEY/45.5,-73.6");
        assert_eq!(url.query(), Some("units=ca&lang=fr"));
    }

    #[test]
    fn logged_url_masks_encoded_key() {
        let client = DarkSkyClient::new("abc def");
        let url = client.request_url(ForecastRequest::new(1.0, 2.0));

        assert_eq!(url.as_str(), "https://api.darksky.net/forecast/abc%20def/1.0,2.0");
        assert_eq!(
            client.endpoint.redact(&url),
            "https://api.darksky.net/forecast/***/1.0,2.0"
        );
    }

    #[test]
    fn with_endpoint_rejects_bad_base() {
        let err = DarkSkyClient::with_endpoint("KEY", "::nope::").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn truncates_long_bodies() {
        let body = "x".repeat(300);
        let out = truncate_body(body.as_bytes());

        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));
        assert_eq!(truncate_body(b"short"), "short");
    }
}
