//! Core library for the `weather-dashboard` CLI.
//!
//! This crate defines:
//! - The fetch-and-cache state container driving the dashboard
//! - The OpenWeather lookup client and its error taxonomy
//! - Session caching, unit conversion and shared domain models
//!
//! It is used by `dashboard-cli`, but can also be reused by other binaries or services.

pub mod cache;
pub mod config;
pub mod model;
pub mod provider;
pub mod store;
pub mod units;

pub use cache::{CacheStore, city_key};
pub use config::Config;
pub use model::{Condition, WeatherRecord, icon_glyph};
pub use provider::{FetchError, WeatherProvider, provider_from_config};
pub use store::{FetchTicket, RequestState, WeatherStore};
pub use units::Units;
