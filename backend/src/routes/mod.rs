//! Route definitions for the weather dashboard API

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/weather", weather_routes())
}

/// Weather routes (public)
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/current", get(handlers::get_current_weather))
        .route("/ocean", get(handlers::get_ocean_conditions))
        .route("/forecast", get(handlers::get_forecast))
        .route("/all", get(handlers::get_all_weather))
}
