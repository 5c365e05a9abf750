//! Shared types and weather-domain logic for the Boujdour weather dashboard
//!
//! This crate contains the models and pure derivations shared between the
//! backend, the browser (via WASM), and the polling client.

pub mod alerts;
pub mod convert;
pub mod format;
pub mod i18n;
pub mod models;
pub mod simulate;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
