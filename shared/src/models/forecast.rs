//! Daily forecast models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_icon_code;

/// Maximum number of days kept in a forecast batch
pub const FORECAST_DAYS: usize = 5;

/// One calendar day of a stored forecast batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub id: Uuid,
    pub city: String,
    pub date: NaiveDate,
    pub max_temp: f64,
    pub min_temp: f64,
    pub description: String,
    pub icon: String,
    pub humidity: i32,
    /// Wind speed in km/h
    pub wind_speed: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewForecastDay {
    #[validate(length(min = 1))]
    pub city: String,
    pub date: NaiveDate,
    pub max_temp: f64,
    pub min_temp: f64,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(custom = "validate_icon_code")]
    pub icon: String,
    #[validate(range(min = 0, max = 100))]
    pub humidity: i32,
    #[validate(range(min = 0.0))]
    pub wind_speed: f64,
}

impl NewForecastDay {
    pub fn into_day(self, id: Uuid, timestamp: DateTime<Utc>) -> ForecastDay {
        ForecastDay {
            id,
            city: self.city,
            date: self.date,
            max_temp: self.max_temp,
            min_temp: self.min_temp,
            description: self.description,
            icon: self.icon,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            timestamp,
        }
    }
}

/// Check that a batch holds at most [`FORECAST_DAYS`] entries with strictly
/// ascending (and therefore distinct) dates
pub fn is_well_formed_batch(days: &[NewForecastDay]) -> bool {
    days.len() <= FORECAST_DAYS && days.windows(2).all(|pair| pair[0].date < pair[1].date)
}
