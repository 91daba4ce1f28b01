//! Rule-based severity alerts for regions without an upstream alert feed.
//!
//! Every category (wind, temperature, precipitation) is a ladder of rungs
//! ordered from most to least severe. The first rung whose predicate holds
//! fires and the rest of that ladder is skipped, so one category yields at
//! most one alert per observation. Rung order is behavior; keep it.

use crate::constants::NO_ALERTS_MESSAGE;
use crate::models::{number_at, CurrentObservation, DailyObservationSeries, Reading};
use crate::regions::{Region, RegionThresholds};

// Fallbacks for cutoffs a threshold table leaves out.
const CURRENT_TYPHOON: f64 = 60.0;
const CURRENT_SEVERE_WIND: f64 = 50.0;
const CURRENT_WIND_WARNING: f64 = 40.0;
const CURRENT_WIND_ADVISORY: f64 = 30.0;
const CURRENT_EXTREME_HEAT: f64 = 35.0;
const CURRENT_HEAT_ADVISORY: f64 = 30.0;
const CURRENT_SEVERE_COLD: f64 = -5.0;
const CURRENT_COLD_WARNING: f64 = 0.0;

const FORECAST_TYPHOON: f64 = 80.0;
const FORECAST_SEVERE_WIND: f64 = 60.0;
const FORECAST_WIND_WARNING: f64 = 40.0;
const FORECAST_EXTREME_HEAT: f64 = 38.0;
const FORECAST_HEAT_WARNING: f64 = 32.0;
const FORECAST_SEVERE_COLD: f64 = -5.0;
const FORECAST_COLD_WARNING: f64 = 0.0;
const FORECAST_HEAVY_RAIN: f64 = 50.0;
const FORECAST_RAIN_WARNING: f64 = 25.0;
const FORECAST_RAIN_ADVISORY: f64 = 15.0;

// Readings substituted for missing data; all sit below every alerting cutoff.
const CALM_WIND: f64 = 0.0;
const MILD_TEMP: f64 = 20.0;
const MILD_TEMP_MAX: f64 = 20.0;
const MILD_TEMP_MIN: f64 = 10.0;
const DRY: f64 = 0.0;

/// Japan's heat advisory switches to the heat-stroke wording above this,
/// independent of the configured `extreme_heat`. With the built-in table the
/// extreme-heat rung fires first, so only a custom table reaches it.
const JAPAN_HEAT_STROKE_WORDING: f64 = 35.0;

/// One rung of a severity ladder
type Rung = (bool, AlertKind);

/// Returns the kind of the first rung whose predicate holds
fn first_match(ladder: &[Rung]) -> Option<AlertKind> {
    ladder
        .iter()
        .find(|(applies, _)| *applies)
        .map(|&(_, kind)| kind)
}

/// The quantity an alert reports, with its lead-in phrase and unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Measure {
    CurrentWind,
    CurrentTemp,
    MaxWind,
    MaxTemp,
    MinTemp,
    Precipitation,
}

impl Measure {
    fn phrase(self) -> &'static str {
        match self {
            Measure::CurrentWind => "Current wind speed is",
            Measure::CurrentTemp => "Current temperature is",
            Measure::MaxWind => "Expected wind speeds up to",
            Measure::MaxTemp => "Expected maximum temperature",
            Measure::MinTemp => "Expected minimum temperature",
            Measure::Precipitation => "Expected precipitation",
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Measure::CurrentWind | Measure::MaxWind => " km/h",
            Measure::CurrentTemp | Measure::MaxTemp | Measure::MinTemp => "°C",
            Measure::Precipitation => " mm",
        }
    }
}

/// Every tier either classifier can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Typhoon,
    HighWind,
    Wind,
    WindAdvisory,
    ExtremeHeat,
    HeatAdvisory,
    SevereCold,
    ColdWeather,
    ForecastTyphoon,
    ForecastSevereWind,
    ForecastWind,
    ForecastExtremeHeat,
    ForecastHeat,
    ForecastSevereCold,
    ForecastCold,
    HeavyRain,
    Rain,
    RainAdvisory,
}

impl AlertKind {
    /// Emoji marker and severity label
    pub fn headline(self) -> &'static str {
        match self {
            AlertKind::Typhoon => "⚠️ TYPHOON/SEVERE WIND WARNING",
            AlertKind::HighWind => "⚠️ HIGH WIND WARNING",
            AlertKind::Wind => "⚠️ WIND WARNING",
            AlertKind::WindAdvisory => "⚠️ WIND ADVISORY",
            AlertKind::ExtremeHeat => "🌡️ EXTREME HEAT WARNING",
            AlertKind::HeatAdvisory => "🌡️ HEAT ADVISORY",
            AlertKind::SevereCold => "🥶 SEVERE COLD WARNING",
            AlertKind::ColdWeather => "🥶 COLD WEATHER WARNING",
            AlertKind::ForecastTyphoon => "🌪️ TYPHOON WARNING",
            AlertKind::ForecastSevereWind => "🌪️ SEVERE WIND WARNING",
            AlertKind::ForecastWind => "💨 WIND WARNING",
            AlertKind::ForecastExtremeHeat => "🔥 EXTREME HEAT WARNING",
            AlertKind::ForecastHeat => "🔥 HEAT WARNING",
            AlertKind::ForecastSevereCold => "❄️ SEVERE COLD WARNING",
            AlertKind::ForecastCold => "❄️ COLD WARNING",
            AlertKind::HeavyRain => "🌧️ HEAVY RAIN WARNING",
            AlertKind::Rain => "🌧️ RAIN WARNING",
            AlertKind::RainAdvisory => "🌦️ RAIN ADVISORY",
        }
    }

    fn measure(self) -> Measure {
        match self {
            AlertKind::Typhoon
            | AlertKind::HighWind
            | AlertKind::Wind
            | AlertKind::WindAdvisory => Measure::CurrentWind,
            AlertKind::ExtremeHeat
            | AlertKind::HeatAdvisory
            | AlertKind::SevereCold
            | AlertKind::ColdWeather => Measure::CurrentTemp,
            AlertKind::ForecastTyphoon
            | AlertKind::ForecastSevereWind
            | AlertKind::ForecastWind => Measure::MaxWind,
            AlertKind::ForecastExtremeHeat | AlertKind::ForecastHeat => Measure::MaxTemp,
            AlertKind::ForecastSevereCold | AlertKind::ForecastCold => Measure::MinTemp,
            AlertKind::HeavyRain | AlertKind::Rain | AlertKind::RainAdvisory => {
                Measure::Precipitation
            }
        }
    }

    /// Advisory sentence for this tier in `region`; `None` for bare alerts
    fn body(self, region: Region, value: f64) -> Option<&'static str> {
        let text = match (self, region) {
            (AlertKind::Typhoon, _) => "Extremely dangerous conditions.",
            (AlertKind::HighWind | AlertKind::Wind, _) => "Strong winds may cause disruption.",
            (AlertKind::WindAdvisory, _) => "Be aware of gusty conditions.",
            (AlertKind::ExtremeHeat, _) => {
                "Risk of heat stroke. Stay indoors with air conditioning."
            }
            (AlertKind::HeatAdvisory, Region::Japan) if value > JAPAN_HEAT_STROKE_WORDING => {
                "Risk of heat stroke. Stay indoors with air conditioning."
            }
            (AlertKind::HeatAdvisory, _) => "Stay hydrated and avoid prolonged sun exposure.",
            (AlertKind::SevereCold, Region::Japan) => {
                "Risk of frostbite and dangerous driving conditions."
            }
            (AlertKind::SevereCold, Region::Uk) => "Risk of severe frost.",
            (AlertKind::ColdWeather, _) => "Risk of ice and freezing conditions.",
            (AlertKind::ForecastTyphoon, _) => "Extremely dangerous conditions.",
            (AlertKind::ForecastSevereWind, _) => "Significant disruption possible.",
            (AlertKind::ForecastWind, _) => return None,
            (AlertKind::ForecastExtremeHeat, _) => "Dangerous heat conditions.",
            (AlertKind::ForecastHeat, _) => "Very hot conditions.",
            (AlertKind::ForecastSevereCold, Region::Japan) => {
                "Risk of severe frost and dangerous conditions."
            }
            (AlertKind::ForecastSevereCold, Region::Uk) => "Risk of severe frost.",
            (AlertKind::ForecastCold, _) => "Risk of frost and icy conditions.",
            (AlertKind::HeavyRain, _) => "Risk of flooding and landslides.",
            (AlertKind::Rain, _) => "Possible flooding.",
            (AlertKind::RainAdvisory, _) => return None,
        };
        Some(text)
    }

    /// Renders the alert line; `date` is set for forecast alerts
    fn render(self, region: Region, value: f64, date: Option<&str>) -> String {
        let measure = self.measure();
        let mut line = match date {
            Some(date) => format!("{} for {}", self.headline(), date),
            None => self.headline().to_string(),
        };
        line.push_str(&format!(
            ": {} {:.1}{}.",
            measure.phrase(),
            value,
            measure.unit()
        ));
        if let Some(body) = self.body(region, value) {
            line.push(' ');
            line.push_str(body);
        }
        line
    }
}

/// Classifies one instantaneous observation.
///
/// Wind and temperature are independent ladders, so up to two alerts come
/// back, wind first. Precipitation has no current-conditions tier.
pub fn classify_current(
    current: &CurrentObservation,
    thresholds: &RegionThresholds,
    region: Region,
) -> Vec<String> {
    let wind = current.wind_speed_10m.as_ref().map_or(CALM_WIND, Reading::value);
    let temp = current.temperature_2m.as_ref().map_or(MILD_TEMP, Reading::value);
    let japan = region == Region::Japan;

    let w = &thresholds.wind_thresholds;
    let wind_ladder = [
        (japan && wind > w.typhoon.unwrap_or(CURRENT_TYPHOON), AlertKind::Typhoon),
        (wind > w.severe.unwrap_or(CURRENT_SEVERE_WIND), AlertKind::HighWind),
        (wind > w.warning.unwrap_or(CURRENT_WIND_WARNING), AlertKind::Wind),
        (wind > w.advisory.unwrap_or(CURRENT_WIND_ADVISORY), AlertKind::WindAdvisory),
    ];

    let t = &thresholds.temp_thresholds;
    let temp_ladder = [
        (japan && temp > t.extreme_heat.unwrap_or(CURRENT_EXTREME_HEAT), AlertKind::ExtremeHeat),
        (temp > t.heat_advisory.unwrap_or(CURRENT_HEAT_ADVISORY), AlertKind::HeatAdvisory),
        (temp < t.severe_cold.unwrap_or(CURRENT_SEVERE_COLD), AlertKind::SevereCold),
        (temp < t.cold_warning.unwrap_or(CURRENT_COLD_WARNING), AlertKind::ColdWeather),
    ];

    let mut alerts = Vec::new();
    if let Some(kind) = first_match(&wind_ladder) {
        alerts.push(kind.render(region, wind, None));
    }
    if let Some(kind) = first_match(&temp_ladder) {
        alerts.push(kind.render(region, temp, None));
    }
    alerts
}

/// Classifies the first `num_days` days of a daily series.
///
/// Alerts come back in day order; within a day the order is wind,
/// temperature, precipitation. The temperature ladder checks heat against
/// the daily max before cold against the daily min.
pub fn classify_forecast(
    daily: &DailyObservationSeries,
    thresholds: &RegionThresholds,
    region: Region,
    num_days: usize,
) -> Vec<String> {
    let japan = region == Region::Japan;
    let w = &thresholds.forecast_wind_thresholds;
    let t = &thresholds.forecast_temp_thresholds;
    let p = &thresholds.forecast_precip_thresholds;

    let mut alerts = Vec::new();
    for i in 0..daily.days(num_days) {
        let date = daily.time[i].as_str();
        let wind_max = number_at(&daily.wind_speed_10m_max, i).unwrap_or(CALM_WIND);
        let temp_max = number_at(&daily.temperature_2m_max, i).unwrap_or(MILD_TEMP_MAX);
        let temp_min = number_at(&daily.temperature_2m_min, i).unwrap_or(MILD_TEMP_MIN);
        let precip = number_at(&daily.precipitation_sum, i).unwrap_or(DRY);

        let wind_ladder = [
            (japan && wind_max > w.typhoon.unwrap_or(FORECAST_TYPHOON), AlertKind::ForecastTyphoon),
            (wind_max > w.severe.unwrap_or(FORECAST_SEVERE_WIND), AlertKind::ForecastSevereWind),
            (wind_max > w.warning.unwrap_or(FORECAST_WIND_WARNING), AlertKind::ForecastWind),
        ];
        if let Some(kind) = first_match(&wind_ladder) {
            alerts.push(kind.render(region, wind_max, Some(date)));
        }

        let temp_ladder = [
            (
                japan && temp_max > t.extreme_heat.unwrap_or(FORECAST_EXTREME_HEAT),
                AlertKind::ForecastExtremeHeat,
            ),
            (temp_max > t.heat_warning.unwrap_or(FORECAST_HEAT_WARNING), AlertKind::ForecastHeat),
            (
                temp_min < t.severe_cold.unwrap_or(FORECAST_SEVERE_COLD),
                AlertKind::ForecastSevereCold,
            ),
            (temp_min < t.cold_warning.unwrap_or(FORECAST_COLD_WARNING), AlertKind::ForecastCold),
        ];
        if let Some(kind) = first_match(&temp_ladder) {
            let value = match kind {
                AlertKind::ForecastSevereCold | AlertKind::ForecastCold => temp_min,
                _ => temp_max,
            };
            alerts.push(kind.render(region, value, Some(date)));
        }

        let precip_ladder = [
            (japan && precip > p.heavy.unwrap_or(FORECAST_HEAVY_RAIN), AlertKind::HeavyRain),
            (precip > p.warning.unwrap_or(FORECAST_RAIN_WARNING), AlertKind::Rain),
            (precip > p.advisory.unwrap_or(FORECAST_RAIN_ADVISORY), AlertKind::RainAdvisory),
        ];
        if let Some(kind) = first_match(&precip_ladder) {
            alerts.push(kind.render(region, precip, Some(date)));
        }
    }
    alerts
}

/// Joins current then forecast alerts, or returns the all-clear sentence
pub fn summarize_alerts(current: Vec<String>, forecast: Vec<String>) -> String {
    let all: Vec<String> = current.into_iter().chain(forecast).collect();
    if all.is_empty() {
        return NO_ALERTS_MESSAGE.to_string();
    }
    all.join("\n\n")
}
