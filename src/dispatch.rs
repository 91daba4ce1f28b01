//! Tool operations: fetch upstream data, then classify or format it.
//!
//! Each operation is stateless and makes at most two sequential requests.
//! Unusable input and missing upstream data come back as [`WeatherError`],
//! which the tool layer turns into plain text.

use crate::alerts::{classify_current, classify_forecast, summarize_alerts};
use crate::client::{build_open_meteo_url, Fetch, Upstream};
use crate::constants::{ALERT_DAYS, FORECAST_DAYS, NWS_API_BASE, OPEN_METEO_API_BASE};
use crate::error::WeatherError;
use crate::formatters::{
    format_alerts, format_current_conditions, format_daily_forecast, format_forecast,
    BLOCK_SEPARATOR,
};
use crate::models::{AlertResponse, ForecastResponse, OpenMeteoResponse, PointsResponse};
use crate::regions::Region;

const ALERT_CURRENT_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m";
const ALERT_DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max";

const FORECAST_CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,weather_code,wind_speed_10m,wind_direction_10m";
const FORECAST_HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation_probability,precipitation,weather_code,wind_speed_10m,wind_direction_10m";
const FORECAST_DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,precipitation_probability_max,wind_speed_10m_max,wind_direction_10m_dominant";

/// Active NWS alerts for a US state
pub async fn get_alerts(fetcher: &impl Fetch, state: &str) -> Result<String, WeatherError> {
    let url = format!("{}/alerts/active/area/{}", NWS_API_BASE, state);

    let features = fetcher
        .fetch::<AlertResponse>(Upstream::Nws, &url)
        .await
        .and_then(|alerts| alerts.features)
        .ok_or_else(|| WeatherError::unavailable("alerts or no alerts found"))?;

    Ok(format_alerts(&features))
}

/// NWS forecast via the points lookup for a US location
pub async fn get_forecast(
    fetcher: &impl Fetch,
    latitude: f64,
    longitude: f64,
) -> Result<String, WeatherError> {
    let points_url = format!("{}/points/{},{}", NWS_API_BASE, latitude, longitude);

    let points = fetcher
        .fetch::<PointsResponse>(Upstream::Nws, &points_url)
        .await
        .ok_or_else(|| WeatherError::unavailable("forecast data for this location"))?;

    let forecast = fetcher
        .fetch::<ForecastResponse>(Upstream::Nws, &points.properties.forecast)
        .await
        .ok_or_else(|| WeatherError::unavailable("detailed forecast"))?;

    Ok(format_forecast(&forecast.properties.periods))
}

/// Current conditions and a five-day outlook for a regional location
pub async fn get_regional_forecast(
    fetcher: &impl Fetch,
    latitude: f64,
    longitude: f64,
    region: &str,
) -> Result<String, WeatherError> {
    let region: Region = region.parse()?;

    let url = build_open_meteo_url(
        &format!("{}/forecast", OPEN_METEO_API_BASE),
        &[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", FORECAST_CURRENT_FIELDS.to_string()),
            ("hourly", FORECAST_HOURLY_FIELDS.to_string()),
            ("daily", FORECAST_DAILY_FIELDS.to_string()),
            ("timezone", region.timezone().to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
        ],
    );

    let data = fetcher
        .fetch::<OpenMeteoResponse>(Upstream::OpenMeteo, &url)
        .await
        .filter(|data| !data.is_empty())
        .ok_or_else(|| WeatherError::unavailable(format!("{} weather forecast", region.label())))?;

    let current = data.current.unwrap_or_default();
    let daily = data.daily.unwrap_or_default();

    let mut blocks = vec![format_current_conditions(&current)];
    blocks.extend(format_daily_forecast(&daily, FORECAST_DAYS));
    Ok(blocks.join(BLOCK_SEPARATOR))
}

/// Synthesized severity alerts for a regional location
pub async fn get_regional_weather_alerts(
    fetcher: &impl Fetch,
    latitude: f64,
    longitude: f64,
    region: &str,
) -> Result<String, WeatherError> {
    let region: Region = region.parse()?;

    let url = build_open_meteo_url(
        &format!("{}/forecast", OPEN_METEO_API_BASE),
        &[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", ALERT_CURRENT_FIELDS.to_string()),
            ("daily", ALERT_DAILY_FIELDS.to_string()),
            ("timezone", region.timezone().to_string()),
            ("forecast_days", ALERT_DAYS.to_string()),
        ],
    );

    let data = fetcher
        .fetch::<OpenMeteoResponse>(Upstream::OpenMeteo, &url)
        .await
        .filter(|data| !data.is_empty())
        .ok_or_else(|| WeatherError::unavailable(format!("{} weather alerts", region.label())))?;

    let current = data.current.unwrap_or_default();
    let daily = data.daily.unwrap_or_default();
    let thresholds = region.thresholds();

    let current_alerts = classify_current(&current, thresholds, region);
    let forecast_alerts = classify_forecast(&daily, thresholds, region, ALERT_DAYS);
    tracing::debug!(
        %region,
        current = current_alerts.len(),
        forecast = forecast_alerts.len(),
        "classified observations"
    );

    Ok(summarize_alerts(current_alerts, forecast_alerts))
}
