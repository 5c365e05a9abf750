//! HTTP handlers for the weather endpoints
//!
//! Every call fetches fresh data and stores a new reading; there is no
//! read-only variant.

use axum::{extract::State, Json};
use shared::models::{CompositeResponse, ForecastDay, OceanSnapshot, WeatherSnapshot};

use crate::error::AppResult;
use crate::AppState;

/// Fetch and store current conditions
pub async fn get_current_weather(State(state): State<AppState>) -> AppResult<Json<WeatherSnapshot>> {
    let snapshot = state.service.current().await?;
    Ok(Json(snapshot))
}

/// Simulate and store ocean conditions
pub async fn get_ocean_conditions(State(state): State<AppState>) -> AppResult<Json<OceanSnapshot>> {
    let snapshot = state.service.ocean().await?;
    Ok(Json(snapshot))
}

/// Fetch the forecast and replace the stored batch
pub async fn get_forecast(State(state): State<AppState>) -> AppResult<Json<Vec<ForecastDay>>> {
    let days = state.service.forecast().await?;
    Ok(Json(days))
}

/// Current, ocean and forecast in one response
pub async fn get_all_weather(State(state): State<AppState>) -> AppResult<Json<CompositeResponse>> {
    let composite = state.service.all().await?;
    Ok(Json(composite))
}
