//! Simulated ocean condition models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_clock_time;

/// A persisted, synthetic ocean reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OceanSnapshot {
    pub id: Uuid,
    pub city: String,
    /// Significant wave height in meters
    pub wave_height: f64,
    /// Sea surface temperature in °C
    pub water_temperature: f64,
    /// Local `HH:MM`
    pub high_tide: String,
    /// Local `HH:MM`
    pub low_tide: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewOceanSnapshot {
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(range(min = 0.3, max = 4.0))]
    pub wave_height: f64,
    #[validate(range(min = 15.0, max = 25.0))]
    pub water_temperature: f64,
    #[validate(custom = "validate_clock_time")]
    pub high_tide: String,
    #[validate(custom = "validate_clock_time")]
    pub low_tide: String,
}

impl NewOceanSnapshot {
    pub fn into_snapshot(self, id: Uuid, timestamp: DateTime<Utc>) -> OceanSnapshot {
        OceanSnapshot {
            id,
            city: self.city,
            wave_height: self.wave_height,
            water_temperature: self.water_temperature,
            high_tide: self.high_tide,
            low_tide: self.low_tide,
            timestamp,
        }
    }
}
