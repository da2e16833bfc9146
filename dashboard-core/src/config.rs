use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

use crate::units::Units;

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// units = "metric"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key. Absent until the user runs `configure`.
    pub api_key: Option<String>,

    /// Display units the dashboard starts in.
    #[serde(default)]
    pub units: Units,
}

impl Config {
    /// API key with the environment override applied: a non-empty
    /// `OPENWEATHER_API_KEY` wins over the value in the config file.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.resolved_api_key_from(env::var(API_KEY_ENV).ok().as_deref())
    }

    fn resolved_api_key_from(&self, env_key: Option<&str>) -> Option<String> {
        env_key
            .filter(|key| !key.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.api_key.clone())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "dashboard-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_key_and_metric_units() {
        let cfg = Config::default();
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.units, Units::Metric);
    }

    #[test]
    fn parses_a_full_config_file() {
        let cfg: Config = toml::from_str("api_key = \"SECRET\"\nunits = \"imperial\"\n")
            .expect("config should parse");

        assert_eq!(cfg.api_key.as_deref(), Some("SECRET"));
        assert_eq!(cfg.units, Units::Imperial);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("api_key = \"SECRET\"\n").expect("config should parse");
        assert_eq!(cfg.units, Units::Metric);

        let cfg: Config = toml::from_str("").expect("empty config should parse");
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn env_key_overrides_the_file_key() {
        let cfg = Config {
            api_key: Some("FILE".to_string()),
            ..Config::default()
        };

        assert_eq!(cfg.resolved_api_key_from(Some("ENV")).as_deref(), Some("ENV"));
    }

    #[test]
    fn blank_env_key_falls_back_to_the_file() {
        let cfg = Config {
            api_key: Some("FILE".to_string()),
            ..Config::default()
        };

        assert_eq!(cfg.resolved_api_key_from(Some("   ")).as_deref(), Some("FILE"));
        assert_eq!(cfg.resolved_api_key_from(None).as_deref(), Some("FILE"));
    }

    #[test]
    fn unconfigured_key_resolves_to_none() {
        assert_eq!(Config::default().resolved_api_key_from(None), None);
    }

    #[test]
    fn serializes_round_trip() {
        let cfg = Config {
            api_key: Some("SECRET".to_string()),
            units: Units::Imperial,
        };

        let toml = toml::to_string_pretty(&cfg).expect("config should serialize");
        let back: Config = toml::from_str(&toml).expect("config should parse back");

        assert_eq!(back.api_key.as_deref(), Some("SECRET"));
        assert_eq!(back.units, Units::Imperial);
    }
}
