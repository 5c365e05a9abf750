//! Persistence for weather, ocean and forecast readings
//!
//! Rows are append-only except for the forecast, which is replaced as a
//! whole batch per city. "Latest" always means the greatest timestamp.

use async_trait::async_trait;
use shared::models::{
    ForecastDay, NewForecastDay, NewOceanSnapshot, NewWeatherSnapshot, OceanSnapshot,
    WeatherSnapshot,
};
use sqlx::PgPool;

use crate::error::AppResult;

/// Storage seam used by the weather service
#[async_trait]
pub trait WeatherStore: Send + Sync {
    async fn insert_weather(&self, reading: NewWeatherSnapshot) -> AppResult<WeatherSnapshot>;

    async fn latest_weather(&self, city: &str) -> AppResult<Option<WeatherSnapshot>>;

    async fn insert_ocean(&self, reading: NewOceanSnapshot) -> AppResult<OceanSnapshot>;

    async fn latest_ocean(&self, city: &str) -> AppResult<Option<OceanSnapshot>>;

    /// Delete every stored forecast day for `city` and insert `days`,
    /// atomically. Returns the new batch ordered by date.
    async fn replace_forecast(
        &self,
        city: &str,
        days: Vec<NewForecastDay>,
    ) -> AppResult<Vec<ForecastDay>>;

    /// Stored forecast for `city`, ordered by date
    async fn forecast(&self, city: &str) -> AppResult<Vec<ForecastDay>>;

    /// Connectivity check for the health endpoint
    async fn ping(&self) -> AppResult<()>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgWeatherStore {
    db: PgPool,
}

impl PgWeatherStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WeatherStore for PgWeatherStore {
    async fn insert_weather(&self, reading: NewWeatherSnapshot) -> AppResult<WeatherSnapshot> {
        let snapshot = sqlx::query_as::<_, WeatherSnapshot>(
            r#"
            INSERT INTO weather_readings (
                city, country, temperature, feels_like, humidity,
                wind_speed, wind_direction, visibility, uv_index, pressure,
                description, icon, sunrise, sunset
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id, city, country, temperature, feels_like, humidity,
                      wind_speed, wind_direction, visibility, uv_index, pressure,
                      description, icon, sunrise, sunset, timestamp
            "#,
        )
        .bind(&reading.city)
        .bind(&reading.country)
        .bind(reading.temperature)
        .bind(reading.feels_like)
        .bind(reading.humidity)
        .bind(reading.wind_speed)
        .bind(reading.wind_direction)
        .bind(reading.visibility)
        .bind(reading.uv_index)
        .bind(reading.pressure)
        .bind(&reading.description)
        .bind(&reading.icon)
        .bind(reading.sunrise)
        .bind(reading.sunset)
        .fetch_one(&self.db)
        .await?;

        Ok(snapshot)
    }

    async fn latest_weather(&self, city: &str) -> AppResult<Option<WeatherSnapshot>> {
        let snapshot = sqlx::query_as::<_, WeatherSnapshot>(
            r#"
            SELECT id, city, country, temperature, feels_like, humidity,
                   wind_speed, wind_direction, visibility, uv_index, pressure,
                   description, icon, sunrise, sunset, timestamp
            FROM weather_readings
            WHERE city = $1
            ORDER BY timestamp DESC
            LIMIT 1
            "#,
        )
        .bind(city)
        .fetch_optional(&self.db)
        .await?;

        Ok(snapshot)
    }

    async fn insert_ocean(&self, reading: NewOceanSnapshot) -> AppResult<OceanSnapshot> {
        let snapshot = sqlx::query_as::<_, OceanSnapshot>(
            r#"
            INSERT INTO ocean_readings (city, wave_height, water_temperature, high_tide, low_tide)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, city, wave_height, water_temperature, high_tide, low_tide, timestamp
            "#,
        )
        .bind(&reading.city)
        .bind(reading.wave_height)
        .bind(reading.water_temperature)
        .bind(&reading.high_tide)
        .bind(&reading.low_tide)
        .fetch_one(&self.db)
        .await?;

        Ok(snapshot)
    }

    async fn latest_ocean(&self, city: &str) -> AppResult<Option<OceanSnapshot>> {
        let snapshot = sqlx::query_as::<_, OceanSnapshot>(
            r#"
            SELECT id, city, wave_height, water_temperature, high_tide, low_tide, timestamp
            FROM ocean_readings
            WHERE city = $1
            ORDER BY timestamp DESC
            LIMIT 1
            "#,
        )
        .bind(city)
        .fetch_optional(&self.db)
        .await?;

        Ok(snapshot)
    }

    async fn replace_forecast(
        &self,
        city: &str,
        days: Vec<NewForecastDay>,
    ) -> AppResult<Vec<ForecastDay>> {
        let mut tx = self.db.begin().await?;

        let removed = sqlx::query("DELETE FROM forecast_days WHERE city = $1")
            .bind(city)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut stored = Vec::with_capacity(days.len());
        for day in &days {
            let row = sqlx::query_as::<_, ForecastDay>(
                r#"
                INSERT INTO forecast_days (
                    city, date, max_temp, min_temp, description, icon, humidity, wind_speed
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id, city, date, max_temp, min_temp, description, icon,
                          humidity, wind_speed, timestamp
                "#,
            )
            .bind(&day.city)
            .bind(day.date)
            .bind(day.max_temp)
            .bind(day.min_temp)
            .bind(&day.description)
            .bind(&day.icon)
            .bind(day.humidity)
            .bind(day.wind_speed)
            .fetch_one(&mut *tx)
            .await?;
            stored.push(row);
        }

        tx.commit().await?;

        tracing::debug!(city, removed, inserted = stored.len(), "forecast batch replaced");

        stored.sort_by_key(|day| day.date);
        Ok(stored)
    }

    async fn forecast(&self, city: &str) -> AppResult<Vec<ForecastDay>> {
        let days = sqlx::query_as::<_, ForecastDay>(
            r#"
            SELECT id, city, date, max_temp, min_temp, description, icon,
                   humidity, wind_speed, timestamp
            FROM forecast_days
            WHERE city = $1
            ORDER BY date ASC
            "#,
        )
        .bind(city)
        .fetch_all(&self.db)
        .await?;

        Ok(days)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}
