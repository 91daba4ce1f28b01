use crate::constants::NWS_FORECAST_PERIODS;
use crate::models::{
    value_at, AlertFeature, CurrentObservation, DailyObservationSeries, ForecastPeriod, Reading,
};

/// Separator between blocks of a multi-part answer
pub const BLOCK_SEPARATOR: &str = "\n---\n";

const NOT_AVAILABLE: &str = "N/A";

/// Renders an upstream number as-is, or `N/A` when absent
fn reading(value: Option<&Reading>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), Reading::to_string)
}

/// Missing codes read as clear sky, explicit nulls as unknown
fn conditions(code: Option<Option<i64>>) -> &'static str {
    match code {
        None => weather_code_label(0),
        Some(None) => "Unknown",
        Some(Some(code)) => weather_code_label(code),
    }
}

/// Formats one NWS alert feature
pub fn format_alert(feature: &AlertFeature) -> String {
    let props = &feature.properties;
    format!(
        "\nEvent: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}\n",
        props.event.as_deref().unwrap_or("Unknown"),
        props.area_desc.as_deref().unwrap_or("Unknown"),
        props.severity.as_deref().unwrap_or("Unknown"),
        props
            .description
            .as_deref()
            .unwrap_or("No description available"),
        props
            .instruction
            .as_deref()
            .unwrap_or("No specific instructions provided"),
    )
}

/// Formats active NWS alerts into a human-readable string
pub fn format_alerts(features: &[AlertFeature]) -> String {
    if features.is_empty() {
        return "No active alerts for this state.".to_string();
    }

    features
        .iter()
        .map(format_alert)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Formats the leading NWS forecast periods
pub fn format_forecast(periods: &[ForecastPeriod]) -> String {
    periods
        .iter()
        .take(NWS_FORECAST_PERIODS)
        .map(|period| {
            format!(
                "\n{}:\nTemperature: {}\u{00b0}{}\nWind: {} {}\nForecast: {}\n",
                period.name,
                period.temperature,
                period.temperature_unit,
                period.wind_speed,
                period.wind_direction,
                period.detailed_forecast
            )
        })
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Formats the Open-Meteo `current` section
pub fn format_current_conditions(current: &CurrentObservation) -> String {
    format!(
        "\nCurrent Conditions:\nTemperature: {}\u{00b0}C\nFeels like: {}\u{00b0}C\nHumidity: {}%\nWind: {} km/h at {}\u{00b0}\nConditions: {}\nPrecipitation: {} mm\n",
        reading(current.temperature_2m.as_ref()),
        reading(current.apparent_temperature.as_ref()),
        reading(current.relative_humidity_2m.as_ref()),
        reading(current.wind_speed_10m.as_ref()),
        reading(current.wind_direction_10m.as_ref()),
        conditions(current.weather_code),
        reading(current.precipitation.as_ref()),
    )
}

/// Formats up to `num_days` daily summaries, one block per day
pub fn format_daily_forecast(daily: &DailyObservationSeries, num_days: usize) -> Vec<String> {
    (0..daily.days(num_days))
        .map(|i| {
            format!(
                "\n{}:\nHigh: {}\u{00b0}C, Low: {}\u{00b0}C\nConditions: {}\nPrecipitation: {} mm ({}% chance)\nMax wind: {} km/h\n",
                daily.time[i],
                reading(value_at(&daily.temperature_2m_max, i).as_ref()),
                reading(value_at(&daily.temperature_2m_min, i).as_ref()),
                conditions(daily.weather_code.get(i).copied()),
                reading(value_at(&daily.precipitation_sum, i).as_ref()),
                reading(value_at(&daily.precipitation_probability_max, i).as_ref()),
                reading(value_at(&daily.wind_speed_10m_max, i).as_ref()),
            )
        })
        .collect()
}

/// Converts WMO weather code to human-readable description
pub fn weather_code_label(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn alert_with_all_fields() {
        let feature: AlertFeature = serde_json::from_value(json!({
            "properties": {
                "event": "Test Event",
                "areaDesc": "Test Area",
                "severity": "Severe",
                "description": "Test description",
                "instruction": "Test instruction"
            }
        }))
        .unwrap();

        let text = format_alert(&feature);
        assert!(text.contains("Event: Test Event"));
        assert!(text.contains("Area: Test Area"));
        assert!(text.contains("Severity: Severe"));
        assert!(text.contains("Description: Test description"));
        assert!(text.contains("Instructions: Test instruction"));
    }

    #[test]
    fn alert_with_missing_fields() {
        let feature: AlertFeature = serde_json::from_value(json!({"properties": {}})).unwrap();

        let text = format_alert(&feature);
        assert!(text.contains("Event: Unknown"));
        assert!(text.contains("No description available"));
        assert!(text.contains("No specific instructions provided"));
    }

    #[test]
    fn no_alerts_message() {
        assert_eq!(format_alerts(&[]), "No active alerts for this state.");
    }

    #[test]
    fn current_conditions_with_gaps() {
        let current: CurrentObservation = serde_json::from_value(json!({
            "temperature_2m": 22.5,
            "apparent_temperature": 24.1,
            "relative_humidity_2m": 65,
            "weather_code": 1
        }))
        .unwrap();

        let text = format_current_conditions(&current);
        assert!(text.contains("Current Conditions:"));
        assert!(text.contains("Temperature: 22.5°C"));
        assert!(text.contains("Feels like: 24.1°C"));
        assert!(text.contains("Humidity: 65%"));
        assert!(text.contains("Wind: N/A km/h at N/A°"));
        assert!(text.contains("Conditions: Mainly clear"));
        assert!(text.contains("Precipitation: N/A mm"));
    }

    #[test]
    fn daily_forecast_is_capped() {
        let daily: DailyObservationSeries = serde_json::from_value(json!({
            "time": ["d1", "d2", "d3", "d4", "d5", "d6", "d7"],
            "weather_code": [95, 2, null],
            "temperature_2m_max": [25.5],
            "temperature_2m_min": [15.0],
            "precipitation_sum": [2.5],
            "precipitation_probability_max": [40],
            "wind_speed_10m_max": [18.3]
        }))
        .unwrap();

        let days = format_daily_forecast(&daily, 5);
        assert_eq!(days.len(), 5);
        assert!(days[0].contains("d1:"));
        assert!(days[0].contains("High: 25.5°C, Low: 15.0°C"));
        assert!(days[0].contains("Conditions: Thunderstorm"));
        assert!(days[0].contains("Precipitation: 2.5 mm (40% chance)"));
        assert!(days[0].contains("Max wind: 18.3 km/h"));
        assert!(days[1].contains("High: N/A°C"));
        assert!(days[1].contains("Conditions: Partly cloudy"));
        assert!(days[2].contains("Conditions: Unknown"));
        assert!(days[3].contains("Conditions: Clear sky"));
    }

    #[test]
    fn current_weather_code_null_and_missing() {
        let missing: CurrentObservation = serde_json::from_value(json!({})).unwrap();
        assert!(format_current_conditions(&missing).contains("Conditions: Clear sky"));

        let null: CurrentObservation =
            serde_json::from_value(json!({"weather_code": null})).unwrap();
        assert!(format_current_conditions(&null).contains("Conditions: Unknown"));
    }

    #[test]
    fn weather_codes() {
        assert_eq!(weather_code_label(0), "Clear sky");
        assert_eq!(weather_code_label(48), "Depositing rime fog");
        assert_eq!(weather_code_label(99), "Thunderstorm with heavy hail");
        assert_eq!(weather_code_label(42), "Unknown");
    }
}
