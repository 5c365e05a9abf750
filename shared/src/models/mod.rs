//! Domain models for the Boujdour weather dashboard

mod forecast;
mod ocean;
mod weather;

pub use forecast::*;
pub use ocean::*;
pub use weather::*;

use serde::{Deserialize, Serialize};

/// The payload served by `/api/weather/all`.
///
/// Computed per request from the latest rows and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResponse {
    pub current: WeatherSnapshot,
    pub ocean: OceanSnapshot,
    pub forecast: Vec<ForecastDay>,
}
