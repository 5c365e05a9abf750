//! OpenWeatherMap client for current conditions, forecast and UV index
//!
//! The provider payloads are described by explicit serde structs; any payload
//! missing a required field is rejected before it is mapped onto our models.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::convert::{meters_to_km, ms_to_kmh};
use shared::models::{NewForecastDay, NewWeatherSnapshot};
use shared::types::Location;

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Current conditions paired with the UV index for the same location
#[derive(Debug, Clone)]
pub struct CurrentBundle {
    pub current: OwmCurrentResponse,
    pub uv: OwmUvResponse,
}

/// Source of raw provider data
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions and UV index concurrently.
    /// Fails as a whole if either call fails.
    async fn current_conditions(&self, location: &Location) -> AppResult<CurrentBundle>;

    /// Fetch the 5 day / 3 hour forecast
    async fn forecast(&self, location: &Location) -> AppResult<OwmForecastResponse>;
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

// ============================================================================
// Provider Response Schema
// ============================================================================

/// OpenWeatherMap API response for current weather
#[derive(Debug, Clone, Deserialize)]
pub struct OwmCurrentResponse {
    pub weather: Vec<OwmCondition>,
    pub main: OwmMain,
    /// meters
    pub visibility: f64,
    pub wind: OwmWind,
    pub sys: OwmSys,
    pub dt: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmWind {
    /// m/s
    pub speed: f64,
    pub deg: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmSys {
    pub sunrise: i64,
    pub sunset: i64,
}

/// OpenWeatherMap API response for the 5 day / 3 hour forecast
#[derive(Debug, Clone, Deserialize)]
pub struct OwmForecastResponse {
    pub city: OwmCity,
    pub list: Vec<OwmForecastItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmCity {
    /// Shift in seconds from UTC
    pub timezone: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmForecastItem {
    pub dt: i64,
    pub main: OwmMain,
    pub weather: Vec<OwmCondition>,
    pub wind: OwmForecastWind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmForecastWind {
    /// m/s
    pub speed: f64,
}

/// OpenWeatherMap API response for the UV index
#[derive(Debug, Clone, Deserialize)]
pub struct OwmUvResponse {
    pub value: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        Self::with_base_url(config, config.api_base_url.clone())
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(config: &WeatherConfig, base_url: String) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("OpenWeatherMap API key not configured".to_string()))
    }

    /// GET `{base_url}/{path}` for the location and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        location: &Location,
        api_key: &str,
        metric: bool,
    ) -> AppResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let mut query = vec![
            ("lat", location.latitude.to_string()),
            ("lon", location.longitude.to_string()),
            ("appid", api_key.to_string()),
        ];
        if metric {
            query.push(("units", "metric".to_string()));
        }

        tracing::debug!(endpoint, %url, "calling weather provider");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| request_error(endpoint, e))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(endpoint, %status, "weather provider returned an error");
            return Err(AppError::Upstream {
                endpoint,
                status: status.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| request_error(endpoint, e))?;
        parse_payload(endpoint, &body)
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current_conditions(&self, location: &Location) -> AppResult<CurrentBundle> {
        // Fail fast before any network traffic when the credential is absent
        let api_key = self.api_key()?;

        let (current, uv) = tokio::try_join!(
            self.get_json::<OwmCurrentResponse>("Weather", "weather", location, api_key, true),
            self.get_json::<OwmUvResponse>("UV", "uvi", location, api_key, false),
        )?;

        Ok(CurrentBundle { current, uv })
    }

    async fn forecast(&self, location: &Location) -> AppResult<OwmForecastResponse> {
        let api_key = self.api_key()?;
        self.get_json("Forecast", "forecast", location, api_key, true)
            .await
    }
}

fn request_error(endpoint: &'static str, err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::UpstreamTimeout { endpoint }
    } else {
        AppError::UpstreamRequest {
            endpoint,
            message: err.to_string(),
        }
    }
}

/// Decode a provider body against its schema
pub fn parse_payload<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> AppResult<T> {
    serde_json::from_str(body).map_err(|e| AppError::InvalidPayload {
        endpoint,
        message: e.to_string(),
    })
}

// ============================================================================
// Mapping
// ============================================================================

fn timestamp(endpoint: &'static str, seconds: i64) -> AppResult<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| AppError::InvalidPayload {
        endpoint,
        message: format!("timestamp {} out of range", seconds),
    })
}

fn first_condition<'a>(
    endpoint: &'static str,
    conditions: &'a [OwmCondition],
) -> AppResult<&'a OwmCondition> {
    conditions.first().ok_or_else(|| AppError::InvalidPayload {
        endpoint,
        message: "missing weather condition".to_string(),
    })
}

/// Map provider current conditions and UV index onto a weather snapshot,
/// converting wind to km/h and visibility to km
pub fn map_current(
    current: &OwmCurrentResponse,
    uv: &OwmUvResponse,
    location: &Location,
) -> AppResult<NewWeatherSnapshot> {
    let condition = first_condition("Weather", &current.weather)?;

    Ok(NewWeatherSnapshot {
        city: location.city.clone(),
        country: location.country.clone(),
        temperature: current.main.temp,
        feels_like: current.main.feels_like,
        humidity: current.main.humidity,
        wind_speed: ms_to_kmh(current.wind.speed),
        wind_direction: current.wind.deg.round() as i32,
        visibility: meters_to_km(current.visibility),
        uv_index: uv.value,
        pressure: current.main.pressure,
        description: condition.description.clone(),
        icon: condition.icon.clone(),
        sunrise: timestamp("Weather", current.sys.sunrise)?,
        sunset: timestamp("Weather", current.sys.sunset)?,
    })
}

/// Reduce the 3-hourly forecast to one entry per city-local calendar date.
///
/// The first entry seen for a date is kept; iteration stops once `limit`
/// distinct dates have been collected. The result is ordered by date.
pub fn select_daily_forecast(
    forecast: &OwmForecastResponse,
    city: &str,
    limit: usize,
) -> AppResult<Vec<NewForecastDay>> {
    let offset = FixedOffset::east_opt(forecast.city.timezone).ok_or_else(|| {
        AppError::InvalidPayload {
            endpoint: "Forecast",
            message: format!("timezone offset {} out of range", forecast.city.timezone),
        }
    })?;

    let mut seen = HashSet::new();
    let mut days = Vec::with_capacity(limit);

    for item in &forecast.list {
        if days.len() >= limit {
            break;
        }

        let date = timestamp("Forecast", item.dt)?
            .with_timezone(&offset)
            .date_naive();
        if !seen.insert(date) {
            continue;
        }

        let condition = first_condition("Forecast", &item.weather)?;
        days.push(NewForecastDay {
            city: city.to_string(),
            date,
            max_temp: item.main.temp_max,
            min_temp: item.main.temp_min,
            description: condition.description.clone(),
            icon: condition.icon.clone(),
            humidity: item.main.humidity,
            wind_speed: ms_to_kmh(item.wind.speed),
        });
    }

    days.sort_by_key(|day| day.date);
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn boujdour() -> Location {
        Location {
            city: "Boujdour".to_string(),
            country: "Morocco".to_string(),
            latitude: 26.1265,
            longitude: -14.4815,
        }
    }

    fn current_json() -> serde_json::Value {
        json!({
            "coord": { "lon": -14.4815, "lat": 26.1265 },
            "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
            "main": {
                "temp": 22.3, "feels_like": 22.0, "temp_min": 22.3, "temp_max": 22.3,
                "pressure": 1015, "humidity": 68
            },
            "visibility": 10000,
            "wind": { "speed": 7.5, "deg": 20 },
            "clouds": { "all": 0 },
            "dt": 1718366400,
            "sys": { "sunrise": 1718347800, "sunset": 1718397000 },
            "timezone": 3600,
            "name": "Boujdour"
        })
    }

    fn forecast_item(dt: i64, max: f64) -> serde_json::Value {
        json!({
            "dt": dt,
            "main": {
                "temp": max - 1.0, "feels_like": max - 1.0, "temp_min": max - 4.0,
                "temp_max": max, "pressure": 1014, "humidity": 70
            },
            "weather": [{ "id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d" }],
            "wind": { "speed": 5.0, "deg": 10 },
            "pop": 0
        })
    }

    fn forecast(timezone: i32, items: Vec<serde_json::Value>) -> OwmForecastResponse {
        serde_json::from_value(json!({
            "city": { "name": "Boujdour", "timezone": timezone },
            "list": items
        }))
        .unwrap()
    }

    #[test]
    fn test_map_current_converts_units() {
        let current: OwmCurrentResponse = serde_json::from_value(current_json()).unwrap();
        let uv = OwmUvResponse { value: 9.2 };
        let snapshot = map_current(&current, &uv, &boujdour()).unwrap();

        assert_eq!(snapshot.city, "Boujdour");
        assert_eq!(snapshot.country, "Morocco");
        assert!((snapshot.wind_speed - 27.0).abs() < 1e-9);
        assert!((snapshot.visibility - 10.0).abs() < 1e-9);
        assert_eq!(snapshot.wind_direction, 20);
        assert_eq!(snapshot.uv_index, 9.2);
        assert_eq!(snapshot.icon, "01d");
        assert!(snapshot.sunrise < snapshot.sunset);
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let mut payload = current_json();
        payload["main"].as_object_mut().unwrap().remove("humidity");
        let result: AppResult<OwmCurrentResponse> =
            parse_payload("Weather", &payload.to_string());
        assert!(matches!(result, Err(AppError::InvalidPayload { .. })));
    }

    #[test]
    fn test_empty_condition_list_rejected() {
        let mut payload = current_json();
        payload["weather"] = json!([]);
        let current: OwmCurrentResponse = serde_json::from_value(payload).unwrap();
        let result = map_current(&current, &OwmUvResponse { value: 1.0 }, &boujdour());
        assert!(matches!(result, Err(AppError::InvalidPayload { .. })));
    }

    #[test]
    fn test_daily_forecast_keeps_first_entry_per_date() {
        // 2024-06-14 00:00 UTC, then every 3 hours for 6 days
        let start = 1718323200;
        let items = (0..48)
            .map(|i| forecast_item(start + i * 3 * 3600, 20.0 + i as f64))
            .collect();
        let days = select_daily_forecast(&forecast(0, items), "Boujdour", 5).unwrap();

        assert_eq!(days.len(), 5);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
        assert_eq!(days[4].date, NaiveDate::from_ymd_opt(2024, 6, 18).unwrap());
        // first slot of each day: 8 slots per day
        assert_eq!(days[1].max_temp, 28.0);
        assert!((days[0].wind_speed - 18.0).abs() < 1e-9);
        assert!(shared::models::is_well_formed_batch(&days));
    }

    #[test]
    fn test_daily_forecast_uses_city_local_date() {
        // 23:30 UTC on 2024-06-14 is already 2024-06-15 at UTC+1
        let items = vec![
            forecast_item(1718407800, 21.0),
            forecast_item(1718418600, 22.0),
        ];
        let days = select_daily_forecast(&forecast(3600, items), "Boujdour", 5).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(days[0].max_temp, 21.0);
    }

    #[test]
    fn test_daily_forecast_with_fewer_dates() {
        let start = 1718323200;
        let items = (0..10)
            .map(|i| forecast_item(start + i * 3 * 3600, 25.0))
            .collect();
        let days = select_daily_forecast(&forecast(0, items), "Boujdour", 5).unwrap();
        assert_eq!(days.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let config = WeatherConfig {
            // nothing listens here; a network attempt would surface as a request error
            api_base_url: "http://127.0.0.1:9".to_string(),
            api_key: None,
            request_timeout_secs: 1,
        };
        let client = WeatherClient::new(&config).unwrap();
        let current = client.current_conditions(&boujdour()).await;
        assert!(matches!(current, Err(AppError::Configuration(_))));
        let forecast = client.forecast(&boujdour()).await;
        assert!(matches!(forecast, Err(AppError::Configuration(_))));
    }
}
