use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

// ============================================================================
// Open-Meteo API Models
// ============================================================================

/// Forecast document. Either section may be absent; both then read as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OpenMeteoResponse {
    pub current: Option<CurrentObservation>,
    pub daily: Option<DailyObservationSeries>,
}

impl OpenMeteoResponse {
    /// True when neither section came back, e.g. a bare `{}` body
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.daily.is_none()
    }
}

/// Upstream number kept as sent, so `15.0` and `65` print back unchanged
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Reading(Number);

impl Reading {
    pub fn value(&self) -> f64 {
        self.0.as_f64().unwrap_or_default()
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Keeps an explicit `null` apart from a missing key
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Instantaneous snapshot from the `current` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CurrentObservation {
    pub temperature_2m: Option<Reading>,
    pub apparent_temperature: Option<Reading>,
    pub relative_humidity_2m: Option<Reading>,
    pub wind_speed_10m: Option<Reading>,
    pub wind_direction_10m: Option<Reading>,
    /// `None` when the key is missing, `Some(None)` for an explicit null
    #[serde(deserialize_with = "nullable")]
    pub weather_code: Option<Option<i64>>,
    pub precipitation: Option<Reading>,
}

/// Parallel per-day arrays from the `daily` section.
///
/// Arrays may be shorter than `time` and may hold nulls, so every read goes
/// through [`value_at`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DailyObservationSeries {
    pub time: Vec<String>,
    pub weather_code: Vec<Option<i64>>,
    pub temperature_2m_max: Vec<Option<Reading>>,
    pub temperature_2m_min: Vec<Option<Reading>>,
    pub precipitation_sum: Vec<Option<Reading>>,
    pub precipitation_probability_max: Vec<Option<Reading>>,
    pub wind_speed_10m_max: Vec<Option<Reading>>,
}

impl DailyObservationSeries {
    /// Number of days that can be read, capped at `limit`
    pub fn days(&self, limit: usize) -> usize {
        self.time.len().min(limit)
    }
}

/// Length-guarded read of day `index`
pub fn value_at<T: Clone>(values: &[Option<T>], index: usize) -> Option<T> {
    values.get(index).cloned().flatten()
}

/// Length-guarded numeric read of day `index`
pub fn number_at(values: &[Option<Reading>], index: usize) -> Option<f64> {
    values.get(index)?.as_ref().map(Reading::value)
}

// ============================================================================
// National Weather Service API Models
// ============================================================================

/// `features` stays optional: a document without it is treated as a failed fetch
#[derive(Debug, Deserialize)]
pub struct AlertResponse {
    pub features: Option<Vec<AlertFeature>>,
}

#[derive(Debug, Deserialize)]
pub struct AlertFeature {
    pub properties: AlertProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AlertProperties {
    pub event: Option<String>,
    #[serde(rename = "areaDesc")]
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
pub struct PointsProperties {
    /// Absolute URL of the gridpoint forecast
    pub forecast: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastPeriod {
    pub name: String,
    pub temperature: i32,
    #[serde(rename = "temperatureUnit")]
    pub temperature_unit: String,
    #[serde(rename = "windSpeed")]
    pub wind_speed: String,
    #[serde(rename = "windDirection")]
    pub wind_direction: String,
    #[serde(rename = "detailedForecast")]
    pub detailed_forecast: String,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    /// Two-letter US state code (e.g. CA, NY)
    pub state: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    /// Latitude of the location
    pub latitude: f64,
    /// Longitude of the location
    pub longitude: f64,
}
