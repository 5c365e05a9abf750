//! Validation rules for normalized weather records
//!
//! Field-level rules live on the models as `validator` attributes; this module
//! holds the custom checks those attributes point at, plus a few plain helpers.

use std::borrow::Cow;

use validator::ValidationError;

use crate::models::NewWeatherSnapshot;

/// Icon codes published by the upstream provider
pub const ICON_CODES: &[&str] = &[
    "01d", "01n", // clear sky
    "02d", "02n", // few clouds
    "03d", "03n", // scattered clouds
    "04d", "04n", // broken clouds
    "09d", "09n", // shower rain
    "10d", "10n", // rain
    "11d", "11n", // thunderstorm
    "13d", "13n", // snow
    "50d", "50n", // mist
];

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Icon must be one of [`ICON_CODES`]
pub fn validate_icon_code(code: &str) -> Result<(), ValidationError> {
    if ICON_CODES.contains(&code) {
        Ok(())
    } else {
        Err(error("icon_code", "Unknown weather icon code"))
    }
}

/// Clock strings are zero-padded 24h `HH:MM`
pub fn validate_clock_time(value: &str) -> Result<(), ValidationError> {
    parse_clock_time(value)
        .map(|_| ())
        .ok_or_else(|| error("clock_time", "Expected a HH:MM time"))
}

/// Parse a zero-padded `HH:MM` string into (hour, minute)
pub fn parse_clock_time(value: &str) -> Option<(u32, u32)> {
    let (hours, minutes) = value.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hour: u32 = hours.parse().ok()?;
    let minute: u32 = minutes.parse().ok()?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}

/// Sunrise must come strictly before sunset
pub fn validate_sun_window(snapshot: &NewWeatherSnapshot) -> Result<(), ValidationError> {
    if snapshot.sunrise < snapshot.sunset {
        Ok(())
    } else {
        Err(error("sun_window", "Sunrise must be before sunset"))
    }
}

/// Validate a latitude/longitude pair
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}
