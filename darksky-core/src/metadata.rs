//! Request metadata carried in response headers rather than the body.

use reqwest::header::{CACHE_CONTROL, HeaderMap};
use serde::Serialize;

pub const API_CALLS_HEADER: &str = "x-forecast-api-calls";
pub const RESPONSE_TIME_HEADER: &str = "x-response-time";

/// Header-derived metadata. Building it never fails: a header that is
/// missing or unparsable leaves its field as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    /// Raw `Cache-Control` value.
    pub cache_control: Option<String>,
    /// Requests made with this API key today, as reported (signed).
    pub api_requests_today: Option<i64>,
    /// Server-side response time, unit suffix stripped (milliseconds).
    pub response_time: Option<f64>,
}

impl Metadata {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            cache_control: header_text(headers, CACHE_CONTROL.as_str()).map(str::to_owned),
            api_requests_today: header_text(headers, API_CALLS_HEADER)
                .and_then(|v| v.trim().parse().ok()),
            response_time: header_text(headers, RESPONSE_TIME_HEADER).and_then(parse_response_time),
        }
    }
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// "123ms" -> 123.0. Letters are trimmed from both ends before parsing.
fn parse_response_time(raw: &str) -> Option<f64> {
    raw.trim()
        .trim_matches(|c: char| c.is_alphabetic())
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn parses_all_headers() {
        let meta = Metadata::from_headers(&headers(&[
            ("cache-control", "max-age=3600"),
            ("x-forecast-api-calls", "17"),
            ("x-response-time", "42ms"),
        ]));

        assert_eq!(meta.cache_control.as_deref(), Some("max-age=3600"));
        assert_eq!(meta.api_requests_today, Some(17));
        assert_eq!(meta.response_time, Some(42.0));
    }

    #[test]
    fn missing_headers_are_absent() {
        assert_eq!(Metadata::from_headers(&HeaderMap::new()), Metadata::default());
    }

    #[test]
    fn garbage_headers_are_absent() {
        let meta = Metadata::from_headers(&headers(&[
            ("x-forecast-api-calls", "lots"),
            ("x-response-time", "fast"),
        ]));

        assert_eq!(meta.api_requests_today, None);
        assert_eq!(meta.response_time, None);
    }

    #[test]
    fn call_count_is_signed() {
        let meta = Metadata::from_headers(&headers(&[("x-forecast-api-calls", " -3 ")]));
        assert_eq!(meta.api_requests_today, Some(-3));
    }

    #[test]
    fn response_time_variants() {
        assert_eq!(parse_response_time("123.5ms"), Some(123.5));
        assert_eq!(parse_response_time("7"), Some(7.0));
        assert_eq!(parse_response_time(" 88 ms "), Some(88.0));
        assert_eq!(parse_response_time("ms"), None);
    }
}
