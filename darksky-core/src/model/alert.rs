use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Serialize, Serializer};

use crate::{
    decode::{Fields, Object},
    error::DecodeError,
};

/// Severe weather alert issued by a governmental authority.
///
/// All fields are required; an alert missing any of them is malformed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub title: String,
    pub description: String,
    /// Usually "advisory", "watch" or "warning", but kept open-ended.
    pub severity: String,
    pub regions: Vec<String>,
    #[serde(serialize_with = "url_as_str")]
    pub uri: Url,
    #[serde(rename = "issued", with = "chrono::serde::ts_seconds")]
    pub time_issued: DateTime<Utc>,
    #[serde(rename = "expires", with = "chrono::serde::ts_seconds")]
    pub expires_on: DateTime<Utc>,
}

impl Alert {
    pub fn from_json(json: &Object) -> Result<Self, DecodeError> {
        let f = Fields::new("Alert", json);

        Ok(Self {
            title: f.string("title")?,
            description: f.string("description")?,
            severity: f.string("severity")?,
            regions: f.strings("regions")?,
            uri: f.url("uri")?,
            time_issued: f.time("issued")?,
            expires_on: f.time("expires")?,
        })
    }
}

fn url_as_str<S: Serializer>(url: &Url, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(url.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn flood_watch() -> Value {
        json!({
            "title": "Flood Watch for Mason, WA",
            "regions": ["Mason"],
            "severity": "watch",
            "time": 1509993360,
            "issued": 1509993360,
            "expires": 1510036680,
            "description": "...FLOOD WATCH REMAINS IN EFFECT THROUGH LATE MONDAY NIGHT...",
            "uri": "https://alerts.weather.gov/cap/wwacapget.php?x=WA1255E4DB8494.FloodWatch"
        })
    }

    #[test]
    fn decodes_complete_alert() {
        let alert = Alert::from_json(flood_watch().as_object().unwrap()).unwrap();

        assert_eq!(alert.severity, "watch");
        assert_eq!(alert.regions, vec!["Mason".to_string()]);
        assert_eq!(alert.uri.host_str(), Some("alerts.weather.gov"));
        assert_eq!(alert.time_issued.timestamp(), 1509993360);
        assert_eq!(alert.expires_on.timestamp(), 1510036680);
    }

    #[test]
    fn missing_expiry_is_malformed() {
        let mut json = flood_watch();
        json.as_object_mut().unwrap().remove("expires");

        let err = Alert::from_json(json.as_object().unwrap()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Missing {
                aggregate: "Alert",
                field: "expires"
            }
        );
    }

    #[test]
    fn relative_uri_is_wrong_type() {
        let mut json = flood_watch();
        json["uri"] = json!("/cap/wwacapget.php");

        let err = Alert::from_json(json.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, DecodeError::WrongType { field: "uri", .. }));
    }

    #[test]
    fn unknown_severity_is_kept() {
        let mut json = flood_watch();
        json["severity"] = json!("statement");

        let alert = Alert::from_json(json.as_object().unwrap()).unwrap();
        assert_eq!(alert.severity, "statement");
    }
}
