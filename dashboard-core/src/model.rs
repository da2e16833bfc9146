use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::city_key;

/// One weather condition descriptor as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: i64,
    /// Short category, e.g. "Clouds".
    pub label: String,
    /// Human-readable text, e.g. "broken clouds".
    pub description: String,
    /// Provider icon code, e.g. "04d".
    pub icon: String,
}

impl Condition {
    pub fn glyph(&self) -> &'static str {
        icon_glyph(&self.icon)
    }
}

/// Normalized snapshot of one city's current conditions.
///
/// Values are always metric (Celsius, m/s); imperial display is a
/// presentation-time conversion. A record is immutable once created and is
/// superseded, never mutated, by a later fetch for the same city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city_id: i64,
    pub name: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub conditions: Vec<Condition>,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherRecord {
    /// Cache key for this record: its own display name, normalized.
    pub fn city_key(&self) -> String {
        city_key(&self.name)
    }

    /// First condition descriptor, if the provider sent any.
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.conditions.first()
    }
}

/// Map a provider icon code to a terminal glyph. Total over arbitrary input;
/// unrecognized codes fall back to a generic cloud.
pub fn icon_glyph(code: &str) -> &'static str {
    match code {
        "01d" | "01n" => "☀",
        "02d" | "02n" => "⛅",
        "03d" | "03n" | "04d" | "04n" => "☁",
        "09d" | "09n" | "10d" | "10n" => "🌧",
        "11d" | "11n" => "⚡",
        "13d" | "13n" => "🌨",
        "50d" | "50n" => "🌫",
        _ => "☁",
    }
}
