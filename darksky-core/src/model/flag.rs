use serde::Serialize;

use crate::{
    decode::{Fields, Object},
    error::DecodeError,
    vocabulary::Units,
};

/// Miscellaneous metadata about how the request was served.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Flag {
    /// IDs of every data source used for this request.
    pub sources: Vec<String>,
    /// Units the numbers in the response are expressed in.
    pub units: Units,

    /// Present when the location is supported but data is temporarily unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub darksky_unavailable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub darksky_stations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datapoint_stations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isd_stations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lamp_stations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub madis_stations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metar_stations: Option<Vec<String>>,
    /// Present when api.met.no data was used, as their license requires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metno_license: Option<bool>,
    /// Distance to the nearest station, in miles or kilometers per `units`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_station: Option<f64>,
}

impl Flag {
    pub fn from_json(json: &Object) -> Result<Self, DecodeError> {
        let f = Fields::new("Flag", json);

        Ok(Self {
            sources: f.strings("sources")?,
            units: f.code("units", Units::from_code)?,
            darksky_unavailable: f.opt_bool("darksky-unavailable"),
            darksky_stations: f.opt_strings("darksky-stations"),
            datapoint_stations: f.opt_strings("datapoint-stations"),
            isd_stations: f.opt_strings("isd-stations"),
            lamp_stations: f.opt_strings("lamp-stations"),
            madis_stations: f.opt_strings("madis-stations"),
            metar_stations: f.opt_strings("metar-stations"),
            metno_license: f.opt_bool("metno-license"),
            nearest_station: f.opt_f64("nearest-station"),
        })
    }
}
