//! Threshold alerts raised from a single weather snapshot

use serde::{Deserialize, Serialize};

use crate::models::WeatherSnapshot;

pub const UV_ALERT_THRESHOLD: f64 = 8.0;
/// km/h
pub const WIND_ALERT_THRESHOLD: f64 = 50.0;
/// °C
pub const HEAT_ALERT_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Danger,
}

/// Which rule fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertKind {
    HighUv,
    StrongWind,
    ExtremeHeat,
    Storm,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub level: AlertLevel,
    pub kind: AlertKind,
    /// The reading that tripped the rule (UV index, km/h or °C); zero for storms
    pub value: f64,
}

/// Evaluate the alert rules in priority order and return the first match.
///
/// Order: UV index, wind speed, temperature, storm keywords.
pub fn evaluate_alert(weather: &WeatherSnapshot) -> Option<WeatherAlert> {
    if weather.uv_index > UV_ALERT_THRESHOLD {
        return Some(WeatherAlert {
            level: AlertLevel::Warning,
            kind: AlertKind::HighUv,
            value: weather.uv_index,
        });
    }

    if weather.wind_speed > WIND_ALERT_THRESHOLD {
        return Some(WeatherAlert {
            level: AlertLevel::Warning,
            kind: AlertKind::StrongWind,
            value: weather.wind_speed,
        });
    }

    if weather.temperature > HEAT_ALERT_THRESHOLD {
        return Some(WeatherAlert {
            level: AlertLevel::Danger,
            kind: AlertKind::ExtremeHeat,
            value: weather.temperature,
        });
    }

    let description = weather.description.to_lowercase();
    if description.contains("storm") || description.contains("thunder") {
        return Some(WeatherAlert {
            level: AlertLevel::Warning,
            kind: AlertKind::Storm,
            value: 0.0,
        });
    }

    None
}
