//! Field-level decoding over untyped JSON objects.
//!
//! Required accessors fail with a [`DecodeError`] naming the aggregate and the
//! field. Optional accessors never fail: an absent or mistyped value is `None`.

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde_json::{Map, Value};

use crate::error::DecodeError;

pub type Object = Map<String, Value>;

/// Borrowed view over one JSON object, tagged with the aggregate being built.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
    aggregate: &'static str,
    json: &'a Object,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(aggregate: &'static str, json: &'a Object) -> Self {
        Self { aggregate, json }
    }

    fn require<T>(
        &self,
        field: &'static str,
        expected: &'static str,
        convert: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, DecodeError> {
        let value = self.json.get(field).ok_or(DecodeError::Missing {
            aggregate: self.aggregate,
            field,
        })?;

        convert(value).ok_or(DecodeError::WrongType {
            aggregate: self.aggregate,
            field,
            expected,
        })
    }

    pub(crate) fn f64(&self, field: &'static str) -> Result<f64, DecodeError> {
        self.require(field, "number", Value::as_f64)
    }

    pub(crate) fn opt_f64(&self, field: &str) -> Option<f64> {
        self.json.get(field).and_then(Value::as_f64)
    }

    pub(crate) fn string(&self, field: &'static str) -> Result<String, DecodeError> {
        self.require(field, "string", |v| v.as_str().map(str::to_owned))
    }

    pub(crate) fn opt_string(&self, field: &str) -> Option<String> {
        self.json.get(field).and_then(Value::as_str).map(str::to_owned)
    }

    pub(crate) fn opt_bool(&self, field: &str) -> Option<bool> {
        self.json.get(field).and_then(Value::as_bool)
    }

    pub(crate) fn time(&self, field: &'static str) -> Result<DateTime<Utc>, DecodeError> {
        self.require(field, "unix timestamp", epoch_seconds)
    }

    pub(crate) fn opt_time(&self, field: &str) -> Option<DateTime<Utc>> {
        self.json.get(field).and_then(epoch_seconds)
    }

    /// Required vocabulary value. An unrecognized code counts as a wrong type.
    pub(crate) fn code<T>(
        &self,
        field: &'static str,
        lookup: fn(&str) -> Option<T>,
    ) -> Result<T, DecodeError> {
        self.require(field, "known code", |v| v.as_str().and_then(lookup))
    }

    pub(crate) fn opt_code<T>(&self, field: &str, lookup: fn(&str) -> Option<T>) -> Option<T> {
        self.json.get(field).and_then(Value::as_str).and_then(lookup)
    }

    pub(crate) fn strings(&self, field: &'static str) -> Result<Vec<String>, DecodeError> {
        self.require(field, "array of strings", string_list)
    }

    pub(crate) fn opt_strings(&self, field: &str) -> Option<Vec<String>> {
        self.json.get(field).and_then(string_list)
    }

    pub(crate) fn url(&self, field: &'static str) -> Result<Url, DecodeError> {
        self.require(field, "absolute URL", |v| {
            v.as_str().and_then(|s| Url::parse(s).ok())
        })
    }

    pub(crate) fn opt_object(&self, field: &str) -> Option<&'a Object> {
        self.json.get(field).and_then(Value::as_object)
    }

    pub(crate) fn opt_array(&self, field: &str) -> Option<&'a Vec<Value>> {
        self.json.get(field).and_then(Value::as_array)
    }

    /// Required array whose elements are all objects.
    pub(crate) fn objects(&self, field: &'static str) -> Result<Vec<&'a Object>, DecodeError> {
        self.require(field, "array of objects", |v| {
            v.as_array()?.iter().map(Value::as_object).collect()
        })
    }
}

/// Unix epoch seconds, integral or fractional, as an absolute instant.
pub(crate) fn epoch_seconds(value: &Value) -> Option<DateTime<Utc>> {
    if let Some(secs) = value.as_i64() {
        return DateTime::from_timestamp(secs, 0);
    }

    let secs = value.as_f64()?;
    if !secs.is_finite() {
        return None;
    }

    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_owned))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::Icon;
    use serde_json::json;

    fn object(value: Value) -> Object {
        value.as_object().cloned().expect("fixture must be an object")
    }

    #[test]
    fn required_number_missing_and_mistyped() {
        let json = object(json!({ "latitude": "north" }));
        let fields = Fields::new("Forecast", &json);

        assert_eq!(
            fields.f64("longitude"),
            Err(DecodeError::Missing {
                aggregate: "Forecast",
                field: "longitude"
            })
        );
        assert_eq!(
            fields.f64("latitude"),
            Err(DecodeError::WrongType {
                aggregate: "Forecast",
                field: "latitude",
                expected: "number"
            })
        );
    }

    #[test]
    fn optional_accessors_degrade_to_none() {
        let json = object(json!({ "temperature": "warm", "summary": 12, "icon": "tornado" }));
        let fields = Fields::new("DataPoint", &json);

        assert_eq!(fields.opt_f64("temperature"), None);
        assert_eq!(fields.opt_f64("humidity"), None);
        assert_eq!(fields.opt_string("summary"), None);
        assert_eq!(fields.opt_code("icon", Icon::from_code), None);
    }

    #[test]
    fn integers_decode_as_numbers() {
        let json = object(json!({ "pressure": 1013 }));
        let fields = Fields::new("DataPoint", &json);

        assert_eq!(fields.opt_f64("pressure"), Some(1013.0));
    }

    #[test]
    fn timestamps_from_integer_and_fractional_seconds() {
        assert_eq!(
            epoch_seconds(&json!(1_000_000_000)).map(|t| t.timestamp()),
            Some(1_000_000_000)
        );

        let t = epoch_seconds(&json!(1_509_993_277.5)).unwrap();
        assert_eq!(t.timestamp(), 1_509_993_277);
        assert_eq!(t.timestamp_subsec_millis(), 500);

        assert_eq!(epoch_seconds(&json!("1509993277")), None);
    }

    #[test]
    fn string_list_rejects_mixed_arrays() {
        let json = object(json!({ "sources": ["isd", 4], "regions": ["Marin"] }));
        let fields = Fields::new("Flag", &json);

        assert!(matches!(
            fields.strings("sources"),
            Err(DecodeError::WrongType { field: "sources", .. })
        ));
        assert_eq!(fields.opt_strings("regions"), Some(vec!["Marin".to_string()]));
    }

    #[test]
    fn required_code_rejects_unknown_values() {
        let json = object(json!({ "icon": "tornado" }));
        let fields = Fields::new("Flag", &json);

        assert!(matches!(
            fields.code("icon", Icon::from_code),
            Err(DecodeError::WrongType { expected: "known code", .. })
        ));
    }
}
