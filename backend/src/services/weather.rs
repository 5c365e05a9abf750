//! Weather service: fetch, normalize, simulate and persist readings

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate, Utc};
use rand::Rng;
use shared::models::{
    CompositeResponse, ForecastDay, NewForecastDay, OceanSnapshot, WeatherSnapshot,
    FORECAST_DAYS,
};
use shared::simulate::{simulate_ocean, OceanSeed, WAVE_JITTER};
use shared::types::Location;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::openweather::{map_current, select_daily_forecast};
use crate::external::WeatherProvider;
use crate::services::storage::WeatherStore;

/// Ocean seed used when no weather reading has been stored yet
pub const DEFAULT_AIR_TEMPERATURE: f64 = 20.0;
pub const DEFAULT_WIND_SPEED_KMH: f64 = 15.0;

/// Weather service for the configured location
#[derive(Clone)]
pub struct WeatherService {
    store: Arc<dyn WeatherStore>,
    provider: Arc<dyn WeatherProvider>,
    location: Location,
    utc_offset: FixedOffset,
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(
        store: Arc<dyn WeatherStore>,
        provider: Arc<dyn WeatherProvider>,
        location: Location,
        utc_offset_seconds: i32,
    ) -> AppResult<Self> {
        let utc_offset = FixedOffset::east_opt(utc_offset_seconds).ok_or_else(|| {
            AppError::Configuration(format!("invalid UTC offset: {}", utc_offset_seconds))
        })?;

        Ok(Self {
            store,
            provider,
            location,
            utc_offset,
        })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn store(&self) -> &Arc<dyn WeatherStore> {
        &self.store
    }

    /// Today's calendar date in the city's local time
    pub fn local_date(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset).date_naive()
    }

    /// Fetch current conditions, validate them and store a new reading
    pub async fn current(&self) -> AppResult<WeatherSnapshot> {
        let bundle = self.provider.current_conditions(&self.location).await?;
        let reading = map_current(&bundle.current, &bundle.uv, &self.location)?;
        reading.validate()?;

        let snapshot = self.store.insert_weather(reading).await?;

        tracing::info!(
            city = %snapshot.city,
            temperature = snapshot.temperature,
            uv_index = snapshot.uv_index,
            "stored weather reading"
        );

        Ok(snapshot)
    }

    /// Simulate ocean conditions seeded by the latest weather reading
    pub async fn ocean(&self) -> AppResult<OceanSnapshot> {
        let latest = self.store.latest_weather(&self.location.city).await?;
        let (air_temperature, wind_speed_kmh, description) = match &latest {
            Some(weather) => (
                weather.temperature,
                weather.wind_speed,
                weather.description.as_str(),
            ),
            None => {
                tracing::debug!(city = %self.location.city, "no weather reading yet, using default ocean seed");
                (DEFAULT_AIR_TEMPERATURE, DEFAULT_WIND_SPEED_KMH, "")
            }
        };

        let jitter = rand::thread_rng().gen_range(-WAVE_JITTER..=WAVE_JITTER);
        let seed = OceanSeed {
            date: self.local_date(),
            air_temperature,
            wind_speed_kmh,
            description,
            jitter,
        };

        let reading = simulate_ocean(&self.location.city, &seed);
        reading.validate()?;

        let snapshot = self.store.insert_ocean(reading).await?;

        tracing::info!(
            city = %snapshot.city,
            wave_height = snapshot.wave_height,
            water_temperature = snapshot.water_temperature,
            "stored ocean reading"
        );

        Ok(snapshot)
    }

    /// Fetch the forecast and replace the stored batch with one entry per day
    pub async fn forecast(&self) -> AppResult<Vec<ForecastDay>> {
        let response = self.provider.forecast(&self.location).await?;
        let days = select_daily_forecast(&response, &self.location.city, FORECAST_DAYS)?;
        validate_batch(&days)?;

        let stored = self
            .store
            .replace_forecast(&self.location.city, days)
            .await?;

        tracing::info!(city = %self.location.city, days = stored.len(), "stored forecast batch");

        Ok(stored)
    }

    /// Run current, ocean and forecast concurrently. Any failure fails the
    /// whole composite.
    pub async fn all(&self) -> AppResult<CompositeResponse> {
        let (current, ocean, forecast) =
            tokio::try_join!(self.current(), self.ocean(), self.forecast())?;

        Ok(CompositeResponse {
            current,
            ocean,
            forecast,
        })
    }
}

fn validate_batch(days: &[NewForecastDay]) -> AppResult<()> {
    if !shared::models::is_well_formed_batch(days) {
        return Err(AppError::Validation(
            "forecast batch must hold at most 5 days in ascending order".to_string(),
        ));
    }
    for day in days {
        day.validate()?;
    }
    Ok(())
}
