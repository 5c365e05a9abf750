//! Weather service integration tests
//!
//! Tests for fetching, simulating and persisting readings including:
//! - Ocean simulation seeded by the latest weather reading
//! - Forecast batches: at most five days, one per date, replaced as a whole

mod common;

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;
use weather_backend::error::AppError;
use weather_backend::external::openweather::{select_daily_forecast, OwmForecastResponse};
use weather_backend::services::WeatherStore;

use common::{forecast_payload, service, FakeProvider, MemoryStore, START};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Default seed: 15 km/h wind, no description
    #[tokio::test]
    async fn test_ocean_default_seed() {
        let store = Arc::new(MemoryStore::default());
        let service = service(store.clone(), Arc::new(FakeProvider::new(5)));

        let ocean = service.ocean().await.unwrap();

        assert!(ocean.wave_height >= 1.3 - 1e-9 && ocean.wave_height <= 1.7 + 1e-9);
        assert_eq!(ocean.city, "Boujdour");
    }

    /// Seeded by the stored reading: 27 km/h under a clear sky
    #[tokio::test]
    async fn test_ocean_seeded_by_latest_weather() {
        let store = Arc::new(MemoryStore::default());
        let service = service(store.clone(), Arc::new(FakeProvider::new(5)));

        service.current().await.unwrap();
        let ocean = service.ocean().await.unwrap();

        assert!(ocean.wave_height >= 1.96 - 1e-9 && ocean.wave_height <= 2.36 + 1e-9);
        let latest = store.latest_ocean("Boujdour").await.unwrap().unwrap();
        assert_eq!(latest.id, ocean.id);
    }

    #[tokio::test]
    async fn test_each_call_appends_a_reading() {
        let store = Arc::new(MemoryStore::default());
        let service = service(store.clone(), Arc::new(FakeProvider::new(5)));

        service.current().await.unwrap();
        service.current().await.unwrap();

        assert_eq!(store.weather.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_composite_joins_all_three() {
        let store = Arc::new(MemoryStore::default());
        let service = service(store.clone(), Arc::new(FakeProvider::new(5)));

        let composite = service.all().await.unwrap();

        assert_eq!(composite.current.city, "Boujdour");
        assert_eq!(composite.forecast.len(), 5);
        assert_eq!(store.forecast("Boujdour").await.unwrap(), composite.forecast);
    }

    #[tokio::test]
    async fn test_composite_fails_when_ocean_fails() {
        let store = Arc::new(MemoryStore::failing_ocean());
        let service = service(store, Arc::new(FakeProvider::new(5)));

        let result = service.all().await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_forecast_replace_then_shorter_batch() {
        let store = Arc::new(MemoryStore::default());
        let provider = Arc::new(FakeProvider::new(5));
        let service = service(store.clone(), provider.clone());

        assert_eq!(service.forecast().await.unwrap().len(), 5);
        provider.set_forecast(forecast_payload(START + 7 * 86400, 3));
        let batch = service.forecast().await.unwrap();

        assert_eq!(store.forecast("Boujdour").await.unwrap(), batch);
        assert_eq!(batch.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_icon_rejected() {
        let store = Arc::new(MemoryStore::default());
        let provider = Arc::new(FakeProvider::new(1));
        let mut bad = forecast_payload(START, 1);
        for item in &mut bad.list {
            item.weather[0].icon = "99x".to_string();
        }
        provider.set_forecast(bad);
        let service = service(store.clone(), provider);

        let result = service.forecast().await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.forecast.lock().unwrap().is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn forecast_from_offsets(timezone: i32, offsets: &[i64]) -> OwmForecastResponse {
    let list: Vec<_> = offsets
        .iter()
        .map(|offset| {
            json!({
                "dt": START + offset,
                "main": {
                    "temp": 20.0, "feels_like": 20.0, "temp_min": 17.0,
                    "temp_max": 23.0, "pressure": 1013, "humidity": 65
                },
                "weather": [{ "description": "clear sky", "icon": "01d" }],
                "wind": { "speed": 4.0 }
            })
        })
        .collect();

    serde_json::from_value(json!({ "city": { "timezone": timezone }, "list": list })).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Forecast batch holds at most five entries with distinct ascending dates
    #[test]
    fn prop_daily_forecast_well_formed(
        mut offsets in prop::collection::vec(0i64..(10 * 86400), 0..60),
        timezone in -43200i32..=50400,
    ) {
        offsets.sort_unstable();
        let response = forecast_from_offsets(timezone, &offsets);

        let days = select_daily_forecast(&response, "Boujdour", 5).unwrap();

        prop_assert!(days.len() <= 5);
        prop_assert!(days.windows(2).all(|pair| pair[0].date < pair[1].date));
        prop_assert_eq!(days.is_empty(), offsets.is_empty());
    }

    /// Limit is respected for any value
    #[test]
    fn prop_daily_forecast_respects_limit(limit in 0usize..8) {
        let offsets: Vec<i64> = (0..80).map(|i| i * 3 * 3600).collect();
        let response = forecast_from_offsets(0, &offsets);

        let days = select_daily_forecast(&response, "Boujdour", limit).unwrap();

        prop_assert_eq!(days.len(), limit.min(10));
    }
}
