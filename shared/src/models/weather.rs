//! Current weather models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{validate_icon_code, validate_sun_window};

/// A persisted point-in-time weather reading for one city.
///
/// Rows are never updated; the next fetch inserts a newer snapshot and
/// "latest" is decided by `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub id: Uuid,
    pub city: String,
    pub country: String,
    /// Air temperature in °C
    pub temperature: f64,
    /// Apparent temperature in °C
    pub feels_like: f64,
    /// Relative humidity in percent
    pub humidity: i32,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Wind direction in degrees (0-360)
    pub wind_direction: i32,
    /// Visibility in km
    pub visibility: f64,
    pub uv_index: f64,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    pub description: String,
    /// Provider icon code (`01d` .. `50n`)
    pub icon: String,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

/// A normalized weather reading ready to be persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_sun_window", skip_on_field_errors = false))]
pub struct NewWeatherSnapshot {
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    #[validate(range(min = 0, max = 100))]
    pub humidity: i32,
    #[validate(range(min = 0.0))]
    pub wind_speed: f64,
    #[validate(range(min = 0, max = 360))]
    pub wind_direction: i32,
    #[validate(range(min = 0.0))]
    pub visibility: f64,
    #[validate(range(min = 0.0))]
    pub uv_index: f64,
    #[validate(range(min = 0.0))]
    pub pressure: f64,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(custom = "validate_icon_code")]
    pub icon: String,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl NewWeatherSnapshot {
    /// Materialize the stored row for this reading
    pub fn into_snapshot(self, id: Uuid, timestamp: DateTime<Utc>) -> WeatherSnapshot {
        WeatherSnapshot {
            id,
            city: self.city,
            country: self.country,
            temperature: self.temperature,
            feels_like: self.feels_like,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
            visibility: self.visibility,
            uv_index: self.uv_index,
            pressure: self.pressure,
            description: self.description,
            icon: self.icon,
            sunrise: self.sunrise,
            sunset: self.sunset,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> NewWeatherSnapshot {
        NewWeatherSnapshot {
            city: "Boujdour".to_string(),
            country: "Morocco".to_string(),
            temperature: 22.4,
            feels_like: 22.1,
            humidity: 71,
            wind_speed: 24.5,
            wind_direction: 350,
            visibility: 10.0,
            uv_index: 6.2,
            pressure: 1015.0,
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
            sunrise: Utc.with_ymd_and_hms(2024, 6, 1, 6, 52, 0).unwrap(),
            sunset: Utc.with_ymd_and_hms(2024, 6, 1, 20, 31, 0).unwrap(),
        }
    }

    #[test]
    fn test_valid_snapshot_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_humidity_out_of_range_rejected() {
        let mut snapshot = sample();
        snapshot.humidity = 101;
        let errors = snapshot.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("humidity"));
    }

    #[test]
    fn test_wind_direction_out_of_range_rejected() {
        let mut snapshot = sample();
        snapshot.wind_direction = 361;
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_unknown_icon_rejected() {
        let mut snapshot = sample();
        snapshot.icon = "99x".to_string();
        let errors = snapshot.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("icon"));
    }

    #[test]
    fn test_sunset_before_sunrise_rejected() {
        let mut snapshot = sample();
        std::mem::swap(&mut snapshot.sunrise, &mut snapshot.sunset);
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let id = Uuid::new_v4();
        let snapshot = sample().into_snapshot(id, Utc::now());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["feelsLike"], 22.1);
        assert_eq!(json["uvIndex"], 6.2);
        assert_eq!(json["windDirection"], 350);
    }
}
