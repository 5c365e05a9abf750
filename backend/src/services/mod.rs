//! Business logic services for the weather dashboard

pub mod storage;
pub mod weather;

pub use storage::{PgWeatherStore, WeatherStore};
pub use weather::WeatherService;
