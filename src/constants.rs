use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mcp-regional-weather/0.1.0";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// Open-Meteo API base URL
pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com/v1";

/// Upper bound on a single upstream request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const NWS_ACCEPT: &str = "application/geo+json";
pub const OPEN_METEO_ACCEPT: &str = "application/json";

/// Days classified by the regional alerts path
pub const ALERT_DAYS: usize = 3;

/// Days shown by the regional forecast path
pub const FORECAST_DAYS: usize = 5;

/// NWS forecast periods shown for US locations
pub const NWS_FORECAST_PERIODS: usize = 5;

pub const NO_ALERTS_MESSAGE: &str =
    "No significant weather alerts for this location. Current conditions are within normal ranges.";
