//! Shared fixtures for backend integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use shared::models::{
    ForecastDay, NewForecastDay, NewOceanSnapshot, NewWeatherSnapshot, OceanSnapshot,
    WeatherSnapshot,
};
use shared::types::Location;
use uuid::Uuid;
use weather_backend::error::{AppError, AppResult};
use weather_backend::external::openweather::{
    CurrentBundle, OwmCurrentResponse, OwmForecastResponse, OwmUvResponse,
};
use weather_backend::external::WeatherProvider;
use weather_backend::services::{WeatherService, WeatherStore};
use weather_backend::{create_app, AppState};

/// 2024-06-14 00:00:00 UTC
pub const START: i64 = 1718323200;

pub fn boujdour() -> Location {
    Location {
        city: "Boujdour".to_string(),
        country: "Morocco".to_string(),
        latitude: 26.1265,
        longitude: -14.4815,
    }
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    pub weather: Mutex<Vec<WeatherSnapshot>>,
    pub ocean: Mutex<Vec<OceanSnapshot>>,
    pub forecast: Mutex<Vec<ForecastDay>>,
    pub fail_ocean: AtomicBool,
}

impl MemoryStore {
    pub fn failing_ocean() -> Self {
        let store = Self::default();
        store.fail_ocean.store(true, Ordering::SeqCst);
        store
    }
}

#[async_trait]
impl WeatherStore for MemoryStore {
    async fn insert_weather(&self, reading: NewWeatherSnapshot) -> AppResult<WeatherSnapshot> {
        let snapshot = reading.into_snapshot(Uuid::new_v4(), Utc::now());
        self.weather.lock().unwrap().push(snapshot.clone());
        Ok(snapshot)
    }

    async fn latest_weather(&self, city: &str) -> AppResult<Option<WeatherSnapshot>> {
        Ok(self
            .weather
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.city == city)
            .max_by_key(|w| w.timestamp)
            .cloned())
    }

    async fn insert_ocean(&self, reading: NewOceanSnapshot) -> AppResult<OceanSnapshot> {
        if self.fail_ocean.load(Ordering::SeqCst) {
            return Err(AppError::Internal("ocean table unavailable".to_string()));
        }
        let snapshot = reading.into_snapshot(Uuid::new_v4(), Utc::now());
        self.ocean.lock().unwrap().push(snapshot.clone());
        Ok(snapshot)
    }

    async fn latest_ocean(&self, city: &str) -> AppResult<Option<OceanSnapshot>> {
        Ok(self
            .ocean
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.city == city)
            .max_by_key(|o| o.timestamp)
            .cloned())
    }

    async fn replace_forecast(
        &self,
        city: &str,
        days: Vec<NewForecastDay>,
    ) -> AppResult<Vec<ForecastDay>> {
        let now = Utc::now();
        let mut stored: Vec<ForecastDay> = days
            .into_iter()
            .map(|day| day.into_day(Uuid::new_v4(), now))
            .collect();
        stored.sort_by_key(|day| day.date);

        let mut forecast = self.forecast.lock().unwrap();
        forecast.retain(|day| day.city != city);
        forecast.extend(stored.iter().cloned());
        Ok(stored)
    }

    async fn forecast(&self, city: &str) -> AppResult<Vec<ForecastDay>> {
        let mut days: Vec<ForecastDay> = self
            .forecast
            .lock()
            .unwrap()
            .iter()
            .filter(|day| day.city == city)
            .cloned()
            .collect();
        days.sort_by_key(|day| day.date);
        Ok(days)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

// ============================================================================
// Fake provider
// ============================================================================

pub struct FakeProvider {
    pub current: OwmCurrentResponse,
    pub uv: OwmUvResponse,
    pub forecast: Mutex<OwmForecastResponse>,
}

impl FakeProvider {
    pub fn new(forecast_days: i64) -> Self {
        Self {
            current: current_payload(22.3, 7.5),
            uv: OwmUvResponse { value: 9.0 },
            forecast: Mutex::new(forecast_payload(START, forecast_days)),
        }
    }

    pub fn set_forecast(&self, response: OwmForecastResponse) {
        *self.forecast.lock().unwrap() = response;
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current_conditions(&self, _location: &Location) -> AppResult<CurrentBundle> {
        Ok(CurrentBundle {
            current: self.current.clone(),
            uv: self.uv.clone(),
        })
    }

    async fn forecast(&self, _location: &Location) -> AppResult<OwmForecastResponse> {
        Ok(self.forecast.lock().unwrap().clone())
    }
}

/// Current conditions payload; wind in m/s
pub fn current_payload(temp: f64, wind_ms: f64) -> OwmCurrentResponse {
    serde_json::from_value(json!({
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
        "main": {
            "temp": temp, "feels_like": temp, "temp_min": temp, "temp_max": temp,
            "pressure": 1015, "humidity": 68
        },
        "visibility": 10000,
        "wind": { "speed": wind_ms, "deg": 350 },
        "dt": START + 43200,
        "sys": { "sunrise": START + 25200, "sunset": START + 72000 }
    }))
    .unwrap()
}

/// 3-hourly forecast covering `days` UTC calendar days starting at `start`
pub fn forecast_payload(start: i64, days: i64) -> OwmForecastResponse {
    let list: Vec<_> = (0..days * 8)
        .map(|i| {
            json!({
                "dt": start + i * 3 * 3600,
                "main": {
                    "temp": 22.0, "feels_like": 22.0, "temp_min": 18.0,
                    "temp_max": 25.0 + (i / 8) as f64, "pressure": 1014, "humidity": 70
                },
                "weather": [{ "id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d" }],
                "wind": { "speed": 5.0, "deg": 10 }
            })
        })
        .collect();

    serde_json::from_value(json!({
        "city": { "name": "Boujdour", "timezone": 0 },
        "list": list
    }))
    .unwrap()
}

// ============================================================================
// App wiring
// ============================================================================

pub fn service(store: Arc<dyn WeatherStore>, provider: Arc<dyn WeatherProvider>) -> WeatherService {
    WeatherService::new(store, provider, boujdour(), 0).unwrap()
}

pub fn app(store: Arc<dyn WeatherStore>, provider: Arc<dyn WeatherProvider>) -> axum::Router {
    create_app(AppState {
        service: service(store, provider),
    })
}
