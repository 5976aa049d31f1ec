//! Request URL construction.
//!
//! Everything here is pure: no network access, no failure for finite
//! coordinates. A bad base endpoint is rejected once, when the [`Endpoint`]
//! is parsed.

use chrono::{DateTime, Utc};
use reqwest::Url;

use crate::{
    error::ConfigError,
    vocabulary::{ForecastSection, Language, Units},
};

pub const DEFAULT_ENDPOINT: &str = "https://api.darksky.net/forecast/";

/// Validated base URL that credentials and coordinates are appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let base = Url::parse(url).map_err(|e| ConfigError::InvalidEndpoint {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if base.cannot_be_a_base() {
            return Err(ConfigError::CannotBeABase(url.to_string()));
        }

        Ok(Self { base })
    }

    /// `{base}/{api_key}/{lat},{lon}[,{time}]?[units=..][&lang=..][&extend=hourly][&exclude=..]`
    pub fn forecast_url(&self, api_key: &str, request: &ForecastRequest) -> Url {
        let mut url = self.base.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(api_key)
                .push(&request.location_segment());
        }

        let query = request.query_pairs();
        if query.is_empty() {
            url.set_query(None);
        } else {
            let joined = query
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&joined));
        }

        url
    }

    /// `url` with the credential segment masked, for logs.
    pub(crate) fn redact(&self, url: &Url) -> String {
        let index = self.key_segment();
        let Some(segments) = url.path_segments() else {
            return url.to_string();
        };

        // Segments are already percent-encoded; `set_path` keeps them as is.
        let path = segments
            .enumerate()
            .map(|(i, segment)| if i == index { "***" } else { segment })
            .collect::<Vec<_>>()
            .join("/");

        let mut masked = url.clone();
        masked.set_path(&format!("/{path}"));
        masked.to_string()
    }

    /// Position of the api key among the path segments of a built URL.
    fn key_segment(&self) -> usize {
        let segments: Vec<&str> = self
            .base
            .path_segments()
            .map(Iterator::collect)
            .unwrap_or_default();

        match segments.last() {
            Some(&"") => segments.len() - 1,
            _ => segments.len(),
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::parse(DEFAULT_ENDPOINT).unwrap_or_else(|e| panic!("built-in endpoint: {e}"))
    }
}

/// Per-call options for a forecast request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastOptions {
    /// Return 168 hours of hourly data instead of 48.
    pub extend_hourly: bool,
    /// Sections to leave out of the response, in the order given.
    pub exclude: Vec<ForecastSection>,
}

impl ForecastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_hourly(mut self, extend: bool) -> Self {
        self.extend_hourly = extend;
        self
    }

    pub fn exclude(mut self, section: ForecastSection) -> Self {
        self.exclude.push(section);
        self
    }

    pub fn excluding(mut self, sections: impl IntoIterator<Item = ForecastSection>) -> Self {
        self.exclude.extend(sections);
        self
    }
}

/// Everything needed to build one request URL, minus the credential.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Time machine request when set.
    pub time: Option<DateTime<Utc>>,
    pub extend_hourly: bool,
    pub exclude: Vec<ForecastSection>,
    pub units: Option<Units>,
    pub language: Option<Language>,
}

impl ForecastRequest {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            time: None,
            extend_hourly: false,
            exclude: Vec::new(),
            units: None,
            language: None,
        }
    }

    pub fn at(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_options(mut self, options: &ForecastOptions) -> Self {
        self.extend_hourly = options.extend_hourly;
        self.exclude = options.exclude.clone();
        self
    }

    pub fn with_units(mut self, units: Option<Units>) -> Self {
        self.units = units;
        self
    }

    pub fn with_language(mut self, language: Option<Language>) -> Self {
        self.language = language;
        self
    }

    fn location_segment(&self) -> String {
        // Debug formatting keeps a trailing ".0" on whole numbers.
        let mut segment = format!("{:?},{:?}", self.latitude, self.longitude);
        if let Some(time) = self.time {
            segment.push_str(&format!(",{}", time.timestamp()));
        }
        segment
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(units) = self.units {
            pairs.push(("units", units.as_str().to_string()));
        }
        if let Some(language) = self.language {
            pairs.push(("lang", language.as_str().to_string()));
        }
        if self.extend_hourly {
            pairs.push(("extend", "hourly".to_string()));
        }
        if !self.exclude.is_empty() {
            let codes = self
                .exclude
                .iter()
                .map(ForecastSection::as_str)
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("exclude", codes));
        }

        pairs
    }
}
