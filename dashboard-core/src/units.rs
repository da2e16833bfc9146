use serde::{Deserialize, Serialize};

/// Display unit preference. Records always store metric values; this only
/// affects how they are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn toggled(self) -> Self {
        match self {
            Units::Metric => Units::Imperial,
            Units::Imperial => Units::Metric,
        }
    }

    /// Rounded display temperature for a stored Celsius value.
    pub fn temperature(self, celsius: f64) -> i32 {
        let shown = match self {
            Units::Metric => celsius,
            Units::Imperial => celsius * 9.0 / 5.0 + 32.0,
        };
        round_half_up(shown)
    }

    pub fn temperature_unit(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    /// Rounded display wind speed for a stored m/s value: km/h when metric,
    /// mph when imperial.
    pub fn wind_speed(self, mps: f64) -> i32 {
        let shown = match self {
            Units::Metric => mps * 3.6,
            Units::Imperial => mps * 2.237,
        };
        round_half_up(shown)
    }

    pub fn wind_speed_unit(self) -> &'static str {
        match self {
            Units::Metric => "km/h",
            Units::Imperial => "mph",
        }
    }
}

// Halves round toward positive infinity, so -1.5 displays as -1.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Units::Metric => f.write_str("metric"),
            Units::Imperial => f.write_str("imperial"),
        }
    }
}
