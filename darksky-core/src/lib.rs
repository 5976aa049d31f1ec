//! Core library for the Dark Sky forecast client.
//!
//! This crate defines:
//! - Provider code vocabularies (icons, units, languages, sections)
//! - Typed forecast aggregates decoded from the provider's JSON
//! - Request URL construction and the async fetch client
//! - Configuration & credentials handling
//!
//! It is used by `darksky-cli`, but can also be reused by other binaries or services.
//!
//! ```rust,ignore
//! use darksky_core::{DarkSkyClient, ForecastOptions, ForecastSection, FetchResult};
//!
//! let client = DarkSkyClient::new("api-key");
//! let options = ForecastOptions::new().exclude(ForecastSection::Minutely);
//!
//! match client.get_forecast(37.8267, -122.4233, &options).await {
//!     FetchResult::Success { value, metadata } => println!("{} {:?}", value.timezone, metadata.response_time),
//!     FetchResult::Failure(error) => eprintln!("{error}"),
//! }
//! ```

pub mod config;
mod decode;
pub mod error;
pub mod metadata;
pub mod model;
pub mod provider;
pub mod request;
pub mod result;
pub mod vocabulary;

pub use config::Config;
pub use decode::Object;
pub use error::{ConfigError, DecodeError, PayloadError, RequestError, UnknownCode};
pub use metadata::Metadata;
pub use model::{Alert, DataBlock, DataPoint, Flag, Forecast};
pub use provider::{DarkSkyClient, ForecastProvider, client_from_config};
pub use request::{Endpoint, ForecastOptions, ForecastRequest};
pub use result::FetchResult;
pub use vocabulary::{ForecastSection, Icon, Language, Precipitation, Units};
