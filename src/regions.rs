//! Regions with synthesized alerting and their threshold tables.
//!
//! Each region carries two independent threshold sets: one applied to the
//! instantaneous `current` observation and one applied to daily forecast
//! aggregates. They are tuned separately and must stay separate.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::WeatherError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Uk,
    Japan,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Uk, Region::Japan];

    /// Lowercase key accepted by `FromStr`
    pub fn key(self) -> &'static str {
        match self {
            Region::Uk => "uk",
            Region::Japan => "japan",
        }
    }

    /// Upper-cased name used in caller-facing messages
    pub fn label(self) -> &'static str {
        match self {
            Region::Uk => "UK",
            Region::Japan => "JAPAN",
        }
    }

    /// IANA timezone passed to Open-Meteo so daily buckets follow local days
    pub fn timezone(self) -> &'static str {
        match self {
            Region::Uk => "Europe/London",
            Region::Japan => "Asia/Tokyo",
        }
    }

    pub fn thresholds(self) -> &'static RegionThresholds {
        match self {
            Region::Uk => &UK_THRESHOLDS,
            Region::Japan => &JAPAN_THRESHOLDS,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Region {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.key() == s)
            .ok_or_else(|| WeatherError::InvalidRegion(s.to_string()))
    }
}

/// Wind cutoffs in km/h. Forecast tables leave `advisory` unset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindThresholds {
    pub advisory: Option<f64>,
    pub warning: Option<f64>,
    pub severe: Option<f64>,
    pub typhoon: Option<f64>,
}

/// Instantaneous temperature cutoffs in °C
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TempThresholds {
    pub heat_advisory: Option<f64>,
    pub extreme_heat: Option<f64>,
    pub cold_warning: Option<f64>,
    pub severe_cold: Option<f64>,
}

/// Daily temperature cutoffs in °C; heat applies to the max, cold to the min
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastTempThresholds {
    pub heat_warning: Option<f64>,
    pub extreme_heat: Option<f64>,
    pub cold_warning: Option<f64>,
    pub severe_cold: Option<f64>,
}

/// Precipitation cutoffs in mm
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PrecipThresholds {
    pub advisory: Option<f64>,
    pub warning: Option<f64>,
    pub heavy: Option<f64>,
}

/// Complete threshold table for one region.
///
/// Any cutoff may be missing; the classifiers fall back to their own
/// constants. `precip_thresholds` is carried for completeness but no
/// current-conditions alert reads it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegionThresholds {
    pub wind_thresholds: WindThresholds,
    pub temp_thresholds: TempThresholds,
    pub precip_thresholds: PrecipThresholds,
    pub forecast_wind_thresholds: WindThresholds,
    pub forecast_temp_thresholds: ForecastTempThresholds,
    pub forecast_precip_thresholds: PrecipThresholds,
}

static UK_THRESHOLDS: RegionThresholds = RegionThresholds {
    wind_thresholds: WindThresholds {
        advisory: Some(30.0),
        warning: Some(40.0),
        severe: Some(50.0),
        typhoon: None,
    },
    temp_thresholds: TempThresholds {
        heat_advisory: Some(30.0),
        extreme_heat: None,
        cold_warning: Some(0.0),
        severe_cold: Some(-5.0),
    },
    precip_thresholds: PrecipThresholds {
        advisory: Some(15.0),
        warning: Some(25.0),
        heavy: None,
    },
    forecast_wind_thresholds: WindThresholds {
        advisory: None,
        warning: Some(40.0),
        severe: Some(60.0),
        typhoon: None,
    },
    forecast_temp_thresholds: ForecastTempThresholds {
        heat_warning: Some(32.0),
        extreme_heat: None,
        cold_warning: None,
        severe_cold: Some(-5.0),
    },
    forecast_precip_thresholds: PrecipThresholds {
        advisory: Some(15.0),
        warning: Some(25.0),
        heavy: None,
    },
};

static JAPAN_THRESHOLDS: RegionThresholds = RegionThresholds {
    wind_thresholds: WindThresholds {
        advisory: Some(25.0),
        warning: Some(40.0),
        severe: Some(60.0),
        typhoon: Some(60.0),
    },
    temp_thresholds: TempThresholds {
        heat_advisory: Some(30.0),
        extreme_heat: Some(35.0),
        cold_warning: Some(0.0),
        severe_cold: Some(-5.0),
    },
    precip_thresholds: PrecipThresholds {
        advisory: Some(15.0),
        warning: Some(30.0),
        heavy: Some(50.0),
    },
    forecast_wind_thresholds: WindThresholds {
        advisory: None,
        warning: Some(35.0),
        severe: Some(50.0),
        typhoon: Some(80.0),
    },
    forecast_temp_thresholds: ForecastTempThresholds {
        heat_warning: Some(33.0),
        extreme_heat: Some(38.0),
        cold_warning: Some(-3.0),
        severe_cold: Some(-10.0),
    },
    forecast_precip_thresholds: PrecipThresholds {
        advisory: Some(15.0),
        warning: Some(30.0),
        heavy: Some(50.0),
    },
};
