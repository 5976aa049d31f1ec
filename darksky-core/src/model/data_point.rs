use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    decode::{Fields, Object},
    error::DecodeError,
    vocabulary::{Icon, Precipitation},
};

/// Weather conditions at one instant or over one period.
///
/// Every field is optional. Which ones are present depends on the section the
/// point came from: `temperature` is never set for `minutely` points, the
/// `*High`/`*Low` and astronomical fields only appear for `daily` points, and
/// the nearest-storm fields only for `currently`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    /// Start of the period, aligned to the minute, hour or local midnight.
    #[serde(with = "chrono::serde::ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_storm_distance: Option<f64>,
    /// Degrees clockwise from true north. Undefined when the distance is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_storm_bearing: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_intensity_error: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_intensity_max: Option<f64>,
    #[serde(with = "chrono::serde::ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub precip_intensity_max_time: Option<DateTime<Utc>>,
    /// Between 0 and 1 inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_type: Option<Precipitation>,
    /// Snowfall accumulation. Absent when no snow is expected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_accumulation: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_high: Option<f64>,
    #[serde(with = "chrono::serde::ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub temperature_high_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_low: Option<f64>,
    #[serde(with = "chrono::serde::ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub temperature_low_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_min: Option<f64>,
    #[serde(with = "chrono::serde::ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub temperature_min_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_max: Option<f64>,
    #[serde(with = "chrono::serde::ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub temperature_max_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apparent_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apparent_temperature_high: Option<f64>,
    #[serde(with = "chrono::serde::ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub apparent_temperature_high_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apparent_temperature_low: Option<f64>,
    #[serde(with = "chrono::serde::ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub apparent_temperature_low_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dew_point: Option<f64>,
    /// Relative humidity between 0 and 1 inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// Sea-level pressure in millibars (hectopascals for SI).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    #[serde(with = "chrono::serde::ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub wind_gust_time: Option<DateTime<Utc>>,
    /// Direction the wind comes from. Undefined when the speed is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_bearing: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<f64>,
    #[serde(with = "chrono::serde::ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub uv_index_time: Option<DateTime<Utc>>,
    /// Capped at 10 miles (16.09 km).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    /// Columnar ozone density in Dobson units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ozone: Option<f64>,
    /// Lunation fraction: 0 new moon, 0.25 first quarter, 0.5 full, 0.75 last quarter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moon_phase: Option<f64>,
    #[serde(with = "chrono::serde::ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub sunrise_time: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub sunset_time: Option<DateTime<Utc>>,
}

impl DataPoint {
    pub fn from_json(json: &Object) -> Result<Self, DecodeError> {
        let f = Fields::new("DataPoint", json);

        Ok(Self {
            time: f.opt_time("time"),
            summary: f.opt_string("summary"),
            icon: f.opt_code("icon", Icon::from_code),

            nearest_storm_distance: f.opt_f64("nearestStormDistance"),
            nearest_storm_bearing: f.opt_f64("nearestStormBearing"),

            precip_intensity: f.opt_f64("precipIntensity"),
            precip_intensity_error: f.opt_f64("precipIntensityError"),
            precip_intensity_max: f.opt_f64("precipIntensityMax"),
            precip_intensity_max_time: f.opt_time("precipIntensityMaxTime"),
            precip_probability: f.opt_f64("precipProbability"),
            precip_type: f.opt_code("precipType", Precipitation::from_code),
            precip_accumulation: f.opt_f64("precipAccumulation"),

            temperature: f.opt_f64("temperature"),
            temperature_high: f.opt_f64("temperatureHigh"),
            temperature_high_time: f.opt_time("temperatureHighTime"),
            temperature_low: f.opt_f64("temperatureLow"),
            temperature_low_time: f.opt_time("temperatureLowTime"),
            temperature_min: f.opt_f64("temperatureMin"),
            temperature_min_time: f.opt_time("temperatureMinTime"),
            temperature_max: f.opt_f64("temperatureMax"),
            temperature_max_time: f.opt_time("temperatureMaxTime"),
            apparent_temperature: f.opt_f64("apparentTemperature"),
            apparent_temperature_high: f.opt_f64("apparentTemperatureHigh"),
            apparent_temperature_high_time: f.opt_time("apparentTemperatureHighTime"),
            apparent_temperature_low: f.opt_f64("apparentTemperatureLow"),
            apparent_temperature_low_time: f.opt_time("apparentTemperatureLowTime"),
            dew_point: f.opt_f64("dewPoint"),
            humidity: f.opt_f64("humidity"),
            pressure: f.opt_f64("pressure"),

            wind_speed: f.opt_f64("windSpeed"),
            wind_gust: f.opt_f64("windGust"),
            wind_gust_time: f.opt_time("windGustTime"),
            wind_bearing: f.opt_f64("windBearing"),

            cloud_cover: f.opt_f64("cloudCover"),
            uv_index: f.opt_f64("uvIndex"),
            uv_index_time: f.opt_time("uvIndexTime"),
            visibility: f.opt_f64("visibility"),
            ozone: f.opt_f64("ozone"),
            moon_phase: f.opt_f64("moonPhase"),
            sunrise_time: f.opt_time("sunriseTime"),
            sunset_time: f.opt_time("sunsetTime"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn currently_point() {
        let json = json!({
            "time": 1509993277,
            "summary": "Drizzle",
            "icon": "rain",
            "nearestStormDistance": 0,
            "precipIntensity": 0.0089,
            "precipProbability": 0.9,
            "precipType": "rain",
            "temperature": 66.1,
            "apparentTemperature": 66.31,
            "humidity": 0.83,
            "windBearing": 246,
            "uvIndex": 2
        });
        let point = DataPoint::from_json(json.as_object().unwrap()).unwrap();

        assert_eq!(point.time.map(|t| t.timestamp()), Some(1509993277));
        assert_eq!(point.icon, Some(Icon::Rain));
        assert_eq!(point.precip_type, Some(Precipitation::Rain));
        assert_eq!(point.nearest_storm_distance, Some(0.0));
        assert_eq!(point.temperature, Some(66.1));
        assert_eq!(point.wind_bearing, Some(246.0));
        assert_eq!(point.sunrise_time, None);
        assert_eq!(point.temperature_high, None);
    }

    #[test]
    fn daily_point_times() {
        let json = json!({
            "time": 1509951600,
            "sunriseTime": 1509978031,
            "sunsetTime": 1510015396,
            "moonPhase": 0.59,
            "temperatureHigh": 66.35,
            "temperatureHighTime": 1509994800,
            "precipIntensityMaxTime": 1510009200
        });
        let point = DataPoint::from_json(json.as_object().unwrap()).unwrap();

        assert_eq!(point.sunrise_time.map(|t| t.timestamp()), Some(1509978031));
        assert_eq!(point.sunset_time.map(|t| t.timestamp()), Some(1510015396));
        assert_eq!(point.moon_phase, Some(0.59));
        assert_eq!(
            point.precip_intensity_max_time.map(|t| t.timestamp()),
            Some(1510009200)
        );
        assert_eq!(point.temperature, None);
    }

    #[test]
    fn empty_object_is_an_empty_point() {
        let point = DataPoint::from_json(&Object::new()).unwrap();
        assert_eq!(point, DataPoint::default());
    }

    #[test]
    fn mistyped_and_unknown_values_are_absent() {
        let json = json!({
            "time": "yesterday",
            "icon": "hurricane",
            "precipType": "frogs",
            "temperature": null,
            "pressure": [1013]
        });
        let point = DataPoint::from_json(json.as_object().unwrap()).unwrap();

        assert_eq!(point, DataPoint::default());
    }

    #[test]
    fn serializes_with_provider_keys() {
        let point = DataPoint {
            precip_intensity: Some(0.01),
            uv_index_time: DateTime::from_timestamp(1510002000, 0),
            ..DataPoint::default()
        };
        let json = serde_json::to_value(&point).unwrap();

        assert_eq!(json, json!({ "precipIntensity": 0.01, "uvIndexTime": 1510002000 }));
    }
}
