use crate::{Config, WeatherRecord, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Fallback shown when a failure carries no usable description of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Classified outcome of a failed weather lookup. The display strings are
/// user-facing and rendered verbatim in the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The service reported that no such city exists (HTTP 404).
    #[error("City not found. Please check the city name and try again.")]
    NotFound,
    /// The service answered with any other non-success status.
    #[error("Failed to fetch weather data. Please try again later.")]
    Service,
    /// Transport or decoding failure, carrying the underlying description.
    #[error("{0}")]
    Unknown(String),
}

impl FetchError {
    /// Wrap an arbitrary failure, substituting the generic message when the
    /// source description is empty.
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            FetchError::Unknown(UNKNOWN_ERROR_MESSAGE.to_string())
        } else {
            FetchError::Unknown(message)
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::unknown(err.to_string())
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherRecord, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    provider_for_key(config.resolved_api_key())
}

fn provider_for_key(api_key: Option<String>) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = api_key.ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `weather-dashboard configure` and enter your OpenWeather API key."
        )
    })?;

    Ok(Box::new(OpenWeatherProvider::new(api_key)))
}
