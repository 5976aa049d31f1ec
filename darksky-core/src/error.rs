//! Error types for decoding, configuration and the fetch pipeline.

use reqwest::StatusCode;

/// A required field was absent or mistyped while building an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("{aggregate}: missing required field `{field}`")]
    Missing {
        aggregate: &'static str,
        field: &'static str,
    },

    #[error("{aggregate}: field `{field}` is not a valid {expected}")]
    WrongType {
        aggregate: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    /// A child aggregate failed; `field` is where it sits in the parent.
    #[error("{aggregate}: invalid `{field}`: {source}")]
    Nested {
        aggregate: &'static str,
        field: String,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Wrap a child failure so it names the parent aggregate and field.
    pub(crate) fn nested(aggregate: &'static str, field: impl Into<String>, source: Self) -> Self {
        DecodeError::Nested {
            aggregate,
            field: field.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error, i.e. the aggregate and field that actually failed.
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            DecodeError::Nested { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Why a response body could not become a `Forecast`.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("body is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("body is JSON but not an object")]
    NotAnObject,

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// The client was built with a base endpoint that cannot form request URLs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("endpoint '{0}' cannot be used as a base URL")]
    CannotBeABase(String),
}

/// Failure delivered by a forecast fetch.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Connectivity, TLS, timeout and friends, passed through from reqwest.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider responded with status {status}")]
    Status { status: StatusCode, body: Vec<u8> },

    /// The body could not be parsed or decoded. `body` holds the raw bytes.
    #[error("invalid payload: {source}")]
    InvalidPayload {
        body: Vec<u8>,
        #[source]
        source: PayloadError,
    },
}

impl RequestError {
    /// Raw response bytes, when the provider sent any.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            RequestError::Status { body, .. } | RequestError::InvalidPayload { body, .. } => {
                Some(body)
            }
            RequestError::Transport(_) => None,
        }
    }

    pub fn is_invalid_payload(&self) -> bool {
        matches!(self, RequestError::InvalidPayload { .. })
    }
}

/// A user-supplied code did not match any value of a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {vocabulary} '{code}'. Supported values: {accepted}.")]
pub struct UnknownCode {
    pub vocabulary: &'static str,
    pub code: String,
    pub accepted: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message() {
        let e = DecodeError::Missing {
            aggregate: "Forecast",
            field: "latitude",
        };
        assert_eq!(e.to_string(), "Forecast: missing required field `latitude`");
    }

    #[test]
    fn nested_error_names_the_path() {
        let inner = DecodeError::Missing {
            aggregate: "Alert",
            field: "title",
        };
        let e = DecodeError::nested("Forecast", "alerts[2]", inner.clone());

        assert_eq!(
            e.to_string(),
            "Forecast: invalid `alerts[2]`: Alert: missing required field `title`"
        );
        assert_eq!(e.root_cause(), &inner);
    }

    #[test]
    fn invalid_payload_keeps_body() {
        let e = RequestError::InvalidPayload {
            body: b"<html>".to_vec(),
            source: PayloadError::NotAnObject,
        };

        assert!(e.is_invalid_payload());
        assert_eq!(e.body(), Some(&b"<html>"[..]));
        assert_eq!(e.to_string(), "invalid payload: body is JSON but not an object");
    }

    #[test]
    fn fetch_failures_are_transport_status_or_payload() {
        fn kind(e: &RequestError) -> &'static str {
            match e {
                RequestError::Transport(_) => "transport",
                RequestError::Status { .. } => "status",
                RequestError::InvalidPayload { .. } => "payload",
            }
        }

        let status = RequestError::Status {
            status: StatusCode::FORBIDDEN,
            body: b"denied".to_vec(),
        };
        assert_eq!(kind(&status), "status");
        assert_eq!(status.body(), Some(&b"denied"[..]));
        assert!(!status.is_invalid_payload());
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<DecodeError>();
        assert_impl::<PayloadError>();
        assert_impl::<RequestError>();
    }
}
