//! Unit conversions and categorical labels derived from raw readings
//!
//! Every function here is total: inputs are never rejected, only clamped where
//! a clamp is part of the rule.

use serde::{Deserialize, Serialize};

/// Convert meters per second to kilometers per hour
pub fn ms_to_kmh(speed_ms: f64) -> f64 {
    speed_ms * 3.6
}

/// Convert meters to kilometers
pub fn meters_to_km(meters: f64) -> f64 {
    meters / 1000.0
}

// ============================================================================
// UV Index
// ============================================================================

/// UV exposure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvLevel {
    /// Bucket a UV index: `<3` low, `<6` moderate, `<8` high, `<11` very high
    pub fn from_index(uv_index: f64) -> Self {
        if uv_index < 3.0 {
            UvLevel::Low
        } else if uv_index < 6.0 {
            UvLevel::Moderate
        } else if uv_index < 8.0 {
            UvLevel::High
        } else if uv_index < 11.0 {
            UvLevel::VeryHigh
        } else {
            UvLevel::Extreme
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            UvLevel::Low => "low",
            UvLevel::Moderate => "moderate",
            UvLevel::High => "high",
            UvLevel::VeryHigh => "veryHigh",
            UvLevel::Extreme => "extreme",
        }
    }
}

// ============================================================================
// Wind Direction
// ============================================================================

/// 16-point rose, closed with a second `N` at 360°
const COMPASS_ROSE: [(f64, &str); 17] = [
    (0.0, "N"),
    (22.5, "NNE"),
    (45.0, "NE"),
    (67.5, "ENE"),
    (90.0, "E"),
    (112.5, "ESE"),
    (135.0, "SE"),
    (157.5, "SSE"),
    (180.0, "S"),
    (202.5, "SSW"),
    (225.0, "SW"),
    (247.5, "WSW"),
    (270.0, "W"),
    (292.5, "WNW"),
    (315.0, "NW"),
    (337.5, "NNW"),
    (360.0, "N"),
];

/// Compass label nearest to `degrees`. On a tie the lower reference angle wins.
pub fn wind_direction(degrees: f64) -> &'static str {
    let mut best = COMPASS_ROSE[0];
    for candidate in &COMPASS_ROSE[1..] {
        if (candidate.0 - degrees).abs() < (best.0 - degrees).abs() {
            best = *candidate;
        }
    }
    best.1
}

// ============================================================================
// Air Quality
// ============================================================================

/// Estimated AQI band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
}

impl AqiLevel {
    pub fn from_index(aqi: i32) -> Self {
        match aqi {
            i32::MIN..=50 => AqiLevel::Good,
            51..=100 => AqiLevel::Moderate,
            101..=150 => AqiLevel::UnhealthyForSensitive,
            151..=200 => AqiLevel::Unhealthy,
            _ => AqiLevel::VeryUnhealthy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::UnhealthyForSensitive => "Unhealthy for Sensitive",
            AqiLevel::Unhealthy => "Unhealthy",
            AqiLevel::VeryUnhealthy => "Very Unhealthy",
        }
    }
}

/// Air quality estimated from meteorological conditions, not measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQuality {
    pub index: i32,
    pub level: AqiLevel,
}

const AQI_BASELINE: i32 = 50;
const AQI_MAX: i32 = 300;

/// Estimate air quality from wind (km/h), humidity (%) and the condition text
pub fn estimate_air_quality(wind_speed_kmh: f64, humidity: i32, description: &str) -> AirQuality {
    let description = description.to_lowercase();
    let mut aqi = AQI_BASELINE;

    if wind_speed_kmh > 20.0 {
        aqi -= 20;
    } else if wind_speed_kmh < 5.0 {
        aqi += 15;
    }
    if humidity > 80 {
        aqi += 10;
    }
    if description.contains("rain") {
        aqi -= 15;
    }
    if description.contains("dust") || description.contains("fog") {
        aqi += 25;
    }

    let index = aqi.clamp(0, AQI_MAX);
    AirQuality {
        index,
        level: AqiLevel::from_index(index),
    }
}

// ============================================================================
// Condition Severity
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

const HIGH_SEVERITY: &[&str] = &["thunderstorm", "heavy rain", "snow", "blizzard", "hurricane"];
const LOW_SEVERITY: &[&str] = &["clear", "sunny", "partly cloudy", "few clouds"];

/// Classify a condition description; high-severity keywords take precedence
pub fn severity(description: &str) -> Severity {
    let description = description.to_lowercase();
    if HIGH_SEVERITY.iter().any(|k| description.contains(k)) {
        Severity::High
    } else if LOW_SEVERITY.iter().any(|k| description.contains(k)) {
        Severity::Low
    } else {
        Severity::Medium
    }
}

// ============================================================================
// Presentation Helpers
// ============================================================================

/// How the apparent temperature compares to the measured one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeelsLike {
    Similar,
    Warmer,
    Cooler,
}

pub fn feels_like_comparison(temperature: f64, feels_like: f64) -> FeelsLike {
    let diff = feels_like - temperature;
    if diff.abs() <= 1.0 {
        FeelsLike::Similar
    } else if diff > 0.0 {
        FeelsLike::Warmer
    } else {
        FeelsLike::Cooler
    }
}

/// Emoji glyph for a provider icon code; unknown codes fall back to the sun
pub fn icon_glyph(code: &str) -> &'static str {
    match code {
        "01d" => "☀️",
        "01n" => "🌙",
        "02d" => "⛅",
        "02n" | "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" | "09n" => "🌦️",
        "10d" | "10n" => "🌧️",
        "11d" | "11n" => "⛈️",
        "13d" | "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => "☀️",
    }
}
