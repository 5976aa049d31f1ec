use serde::Serialize;
use serde_json::Value;

use crate::{
    decode::{Fields, Object},
    error::{DecodeError, PayloadError},
    model::{Alert, DataBlock, DataPoint, Flag},
};

/// Root of a forecast or time machine response.
///
/// A missing section means it was excluded by the request or omitted by the
/// provider, never that decoding gave up on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone name, e.g. "America/Los_Angeles".
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currently: Option<DataPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutely: Option<DataBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly: Option<DataBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<DataBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Vec<Alert>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flag>,
}

const AGGREGATE: &str = "Forecast";

impl Forecast {
    /// Build a forecast from a decoded JSON object.
    ///
    /// Sections are decoded only when their key holds an object (an array for
    /// `alerts`). A present section that fails its own decoding fails the
    /// whole forecast.
    pub fn from_json(json: &Object) -> Result<Self, DecodeError> {
        let f = Fields::new(AGGREGATE, json);

        let latitude = f.f64("latitude")?;
        let longitude = f.f64("longitude")?;
        let timezone = f.string("timezone")?;

        let alerts = f
            .opt_array("alerts")
            .map(|entries| {
                entries
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| {
                        let field = format!("alerts[{i}]");
                        let object = entry.as_object().ok_or_else(|| {
                            DecodeError::nested(
                                AGGREGATE,
                                field.clone(),
                                DecodeError::WrongType {
                                    aggregate: "Alert",
                                    field: "alert",
                                    expected: "object",
                                },
                            )
                        })?;
                        Alert::from_json(object).map_err(|e| DecodeError::nested(AGGREGATE, field, e))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            latitude,
            longitude,
            timezone,
            currently: section(&f, "currently", DataPoint::from_json)?,
            minutely: section(&f, "minutely", DataBlock::from_json)?,
            hourly: section(&f, "hourly", DataBlock::from_json)?,
            daily: section(&f, "daily", DataBlock::from_json)?,
            alerts,
            flags: section(&f, "flags", Flag::from_json)?,
        })
    }

    /// Parse a raw response body and decode it.
    pub fn from_slice(body: &[u8]) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_slice(body)?;
        let object = value.as_object().ok_or(PayloadError::NotAnObject)?;

        Ok(Self::from_json(object)?)
    }

    /// Alerts, or an empty slice when the section is absent.
    pub fn alerts(&self) -> &[Alert] {
        self.alerts.as_deref().unwrap_or_default()
    }
}

fn section<T>(
    fields: &Fields<'_>,
    key: &'static str,
    decode: fn(&Object) -> Result<T, DecodeError>,
) -> Result<Option<T>, DecodeError> {
    fields
        .opt_object(key)
        .map(|object| decode(object).map_err(|e| DecodeError::nested(AGGREGATE, key, e)))
        .transpose()
}
