//! Closed sets of provider codes.
//!
//! Every vocabulary maps a provider string code to a typed value. Lookups via
//! `from_code` are total: an unrecognized code yields `None`, because the
//! provider is free to introduce new codes at any time. User-facing input
//! (CLI flags, config files) goes through the strict `TryFrom<&str>` instead,
//! which reports the accepted codes.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

use crate::error::UnknownCode;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Provider code for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $code, )+
                }
            }

            pub const fn all() -> &'static [$name] {
                &[ $( $name::$variant, )+ ]
            }

            /// Look up a provider code. Unknown codes are `None`, never an error.
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $( $code => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<&str> for $name {
            type Error = UnknownCode;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                let lower = value.trim().to_lowercase();

                Self::from_code(lower.as_str()).ok_or_else(|| UnknownCode {
                    vocabulary: $label,
                    code: value.to_string(),
                    accepted: Self::all()
                        .iter()
                        .map(|v| v.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
            }
        }

        impl FromStr for $name {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::try_from(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Machine-readable summary of the sky, suitable for picking an icon.
    pub enum Icon as "icon" {
        ClearDay => "clear-day",
        ClearNight => "clear-night",
        Rain => "rain",
        Snow => "snow",
        Sleet => "sleet",
        Wind => "wind",
        Fog => "fog",
        Cloudy => "cloudy",
        PartlyCloudyDay => "partly-cloudy-day",
        PartlyCloudyNight => "partly-cloudy-night",
    }
}

vocabulary! {
    /// Kind of precipitation reported for a data point.
    pub enum Precipitation as "precipitation type" {
        Rain => "rain",
        Snow => "snow",
        /// Freezing rain, ice pellets and wintery mix.
        Sleet => "sleet",
        Hail => "hail",
    }
}

vocabulary! {
    /// Unit system for the numbers in a response.
    pub enum Units as "units" {
        /// Pick units based on the requested location.
        Auto => "auto",
        /// Same as `Si`, but wind speed in km/h.
        Ca => "ca",
        /// Same as `Si`, but wind speed in mph and distances in miles.
        Uk2 => "uk2",
        /// Imperial units. Provider default.
        Us => "us",
        Si => "si",
    }
}

vocabulary! {
    /// Language for the human-readable `summary` fields.
    pub enum Language as "language" {
        Arabic => "ar",
        Azerbaijani => "az",
        Belarusian => "be",
        Bulgarian => "bg",
        Bosnian => "bs",
        Catalan => "ca",
        Czech => "cs",
        German => "de",
        Greek => "el",
        /// Provider default.
        English => "en",
        Spanish => "es",
        Estonian => "et",
        French => "fr",
        Croatian => "hr",
        Hungarian => "hu",
        Indonesian => "id",
        Italian => "it",
        Icelandic => "is",
        Cornish => "kw",
        NorwegianBokmal => "nb",
        Dutch => "nl",
        Polish => "pl",
        Portuguese => "pt",
        Russian => "ru",
        Slovak => "sk",
        Slovenian => "sl",
        Serbian => "sr",
        Swedish => "sv",
        Tetum => "tet",
        Turkish => "tr",
        Ukrainian => "uk",
        PigLatin => "x-pig-latin",
        SimplifiedChinese => "zh",
        TraditionalChinese => "zh-tw",
    }
}

vocabulary! {
    /// Named subdivision of a forecast response, used for exclusion.
    pub enum ForecastSection as "forecast section" {
        Currently => "currently",
        Minutely => "minutely",
        /// Next 48 hours, or 168 with `extend=hourly`.
        Hourly => "hourly",
        Daily => "daily",
        Alerts => "alerts",
        Flags => "flags",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_codes_roundtrip() {
        for icon in Icon::all() {
            assert_eq!(Icon::from_code(icon.as_str()), Some(*icon));
        }
    }

    #[test]
    fn language_codes_roundtrip() {
        for lang in Language::all() {
            let parsed = Language::try_from(lang.as_str()).expect("roundtrip should succeed");
            assert_eq!(*lang, parsed);
        }
        assert_eq!(Language::all().len(), 34);
    }

    #[test]
    fn unknown_code_is_absent() {
        assert_eq!(Icon::from_code("tornado"), None);
        assert_eq!(Precipitation::from_code(""), None);
        assert_eq!(Units::from_code("metric"), None);
        assert_eq!(ForecastSection::from_code("weekly"), None);
    }

    #[test]
    fn from_code_is_case_sensitive() {
        assert_eq!(Icon::from_code("Clear-Day"), None);
        assert_eq!(Icon::try_from("Clear-Day").ok(), Some(Icon::ClearDay));
    }

    #[test]
    fn try_from_reports_accepted_codes() {
        let err = Units::try_from("metric").unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("Unknown units 'metric'"));
        assert!(msg.contains("auto, ca, uk2, us, si"));
    }

    #[test]
    fn parse_through_from_str() {
        let section: ForecastSection = "alerts".parse().unwrap();
        assert_eq!(section, ForecastSection::Alerts);
        assert_eq!(section.to_string(), "alerts");
    }

    #[test]
    fn serializes_as_provider_code() {
        let json = serde_json::to_string(&Icon::PartlyCloudyNight).unwrap();
        assert_eq!(json, "\"partly-cloudy-night\"");
    }
}
