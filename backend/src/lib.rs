//! Boujdour weather dashboard backend
//!
//! Fetches current conditions and forecast from OpenWeatherMap, simulates
//! ocean conditions, stores every reading in PostgreSQL and serves them as
//! JSON. Also hosts the polling client used by `weather-watch`.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod poller;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
use services::WeatherService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: WeatherService,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Boujdour Weather Dashboard API"
}
