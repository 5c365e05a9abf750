//! Date-driven approximations for moon phase, tides and sea state
//!
//! None of these are physical models. Moon phase and tide times are pure
//! functions of the calendar date; wave height takes its random perturbation
//! as an argument so callers own the randomness.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::NewOceanSnapshot;

/// Mean synodic month in days, rounded
pub const SYNODIC_MONTH_DAYS: f64 = 29.53;

/// Wave heights are clamped into this range (meters)
pub const WAVE_HEIGHT_MIN: f64 = 0.3;
pub const WAVE_HEIGHT_MAX: f64 = 4.0;
/// Largest absolute random perturbation applied to a wave height
pub const WAVE_JITTER: f64 = 0.2;

/// Water temperatures are clamped into this range (°C)
pub const WATER_TEMP_MIN: f64 = 15.0;
pub const WATER_TEMP_MAX: f64 = 25.0;

// ============================================================================
// Moon Phase
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    const ORDERED: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// Map a cycle fraction in [0, 1) onto one of eight equal bins
    pub fn from_fraction(fraction: f64) -> Self {
        let bin = (fraction.rem_euclid(1.0) * 8.0).floor() as usize;
        Self::ORDERED[bin.min(7)]
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "🌑",
            MoonPhase::WaxingCrescent => "🌒",
            MoonPhase::FirstQuarter => "🌓",
            MoonPhase::WaxingGibbous => "🌔",
            MoonPhase::FullMoon => "🌕",
            MoonPhase::WaningGibbous => "🌖",
            MoonPhase::LastQuarter => "🌗",
            MoonPhase::WaningCrescent => "🌘",
        }
    }
}

/// Fraction of the lunar cycle elapsed on `date`, in [0, 1)
pub fn lunar_cycle_fraction(date: NaiveDate) -> f64 {
    let days = ((date.year() - 2000) as f64 * 365.25
        + date.month() as f64 * 30.44
        + date.day() as f64)
        .floor();
    days.rem_euclid(SYNODIC_MONTH_DAYS) / SYNODIC_MONTH_DAYS
}

pub fn moon_phase(date: NaiveDate) -> MoonPhase {
    MoonPhase::from_fraction(lunar_cycle_fraction(date))
}

// ============================================================================
// Tides
// ============================================================================

/// Local high and low tide as `HH:MM`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TideTimes {
    pub high_tide: String,
    pub low_tide: String,
}

/// Hour of day (fractional) of the high tide
pub fn high_tide_hour(date: NaiveDate) -> f64 {
    (6.0 + (date.day() as f64 * 0.8) % 24.0) % 24.0
}

pub fn tide_times(date: NaiveDate) -> TideTimes {
    let high = high_tide_hour(date);
    let low = (high + 6.2) % 24.0;
    TideTimes {
        high_tide: format_clock(high),
        low_tide: format_clock(low),
    }
}

/// Format a fractional hour as `HH:MM`, truncating the hour and flooring the
/// minute. The small epsilon absorbs binary representation error so that
/// e.g. 20.2 h reads as 20:12 rather than 20:11. Flooring the fractional
/// hour times 60 instead would render 6.8 h as 06:47; this gives 06:48.
pub fn format_clock(hours: f64) -> String {
    let total_minutes = (hours.rem_euclid(24.0) * 60.0 + 1e-6).floor() as u32;
    format!("{:02}:{:02}", (total_minutes / 60) % 24, total_minutes % 60)
}

// ============================================================================
// Sea State
// ============================================================================

/// Seasonal water temperature from air temperature, clamped into
/// [`WATER_TEMP_MIN`], [`WATER_TEMP_MAX`]
pub fn water_temperature(air_temperature: f64, date: NaiveDate) -> f64 {
    let day_of_year = date.ordinal() as f64;
    let seasonal = 3.0 * (2.0 * PI * (day_of_year - 80.0) / 365.0).sin();
    (air_temperature - 3.0 + seasonal).clamp(WATER_TEMP_MIN, WATER_TEMP_MAX)
}

/// Wave height from wind speed (km/h) and conditions.
///
/// `jitter` is the caller's random perturbation; it is clamped to
/// ±[`WAVE_JITTER`] before being applied.
pub fn wave_height(wind_speed_kmh: f64, description: &str, jitter: f64) -> f64 {
    let description = description.to_lowercase();
    let mut height = wind_speed_kmh * 0.1;

    if description.contains("storm") || description.contains("thunder") {
        height *= 2.0;
    } else if description.contains("rain") {
        height *= 1.3;
    } else if description.contains("clear") || description.contains("sunny") {
        height *= 0.8;
    }

    height += jitter.clamp(-WAVE_JITTER, WAVE_JITTER);
    height.clamp(WAVE_HEIGHT_MIN, WAVE_HEIGHT_MAX)
}

/// Inputs driving one ocean simulation
#[derive(Debug, Clone, PartialEq)]
pub struct OceanSeed<'a> {
    pub date: NaiveDate,
    pub air_temperature: f64,
    pub wind_speed_kmh: f64,
    pub description: &'a str,
    pub jitter: f64,
}

/// Assemble a full synthetic ocean reading for `city`
pub fn simulate_ocean(city: &str, seed: &OceanSeed<'_>) -> NewOceanSnapshot {
    let tides = tide_times(seed.date);
    NewOceanSnapshot {
        city: city.to_string(),
        wave_height: wave_height(seed.wind_speed_kmh, seed.description, seed.jitter),
        water_temperature: water_temperature(seed.air_temperature, seed.date),
        high_tide: tides.high_tide,
        low_tide: tides.low_tide,
    }
}
