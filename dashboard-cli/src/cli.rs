use clap::{Parser, Subcommand, ValueEnum};
use inquire::validator::Validation;
use inquire::{CustomUserError, InquireError, Select, Text};

use dashboard_core::{Config, Units, WeatherStore, provider_from_config};

use crate::{dashboard, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "City weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive dashboard: search, recent cities, unit toggle. The default.
    Dashboard,

    /// Look up one city and print its report.
    Show {
        /// City name, e.g. "London" or "New York".
        city: String,

        /// Override the configured display units.
        #[arg(long, value_enum)]
        units: Option<UnitsArg>,
    },

    /// Store the OpenWeather API key and preferred units.
    Configure,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitsArg {
    Metric,
    Imperial,
}

impl From<UnitsArg> for Units {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::Metric => Units::Metric,
            UnitsArg::Imperial => Units::Imperial,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Dashboard) {
            Command::Dashboard => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                let store = WeatherStore::new(provider).with_units(config.units);
                dashboard::run(store).await
            }
            Command::Show { city, units } => show(&city, units).await,
            Command::Configure => configure(),
        }
    }
}

async fn show(city: &str, units: Option<UnitsArg>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let units = units.map_or(config.units, Units::from);
    let mut store = WeatherStore::new(provider).with_units(units);

    store.submit(city).await;

    if let Some(record) = store.current() {
        println!("{}", render::weather_report(record, units));
        return Ok(());
    }
    if let Some(message) = store.error() {
        anyhow::bail!("{message}");
    }
    anyhow::bail!("City name is empty.")
}

fn non_empty_key(input: &str) -> Result<Validation, CustomUserError> {
    if input.trim().is_empty() {
        Ok(Validation::Invalid("An API key is required.".into()))
    } else {
        Ok(Validation::Valid)
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = match Text::new("OpenWeather API key:")
        .with_help_message("Create one at https://home.openweathermap.org/api_keys")
        .with_validator(non_empty_key)
        .prompt()
    {
        Ok(key) => key,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            println!("Configuration unchanged.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let units = match Select::new("Preferred units:", vec![Units::Metric, Units::Imperial]).prompt()
    {
        Ok(units) => units,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            println!("Configuration unchanged.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    config.api_key = Some(api_key.trim().to_string());
    config.units = units;
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_means_dashboard() {
        let cli = Cli::try_parse_from(["weather-dashboard"]).expect("should parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_accepts_a_units_override() {
        let cli = Cli::try_parse_from(["weather-dashboard", "show", "London", "--units", "imperial"])
            .expect("should parse");

        match cli.command {
            Some(Command::Show { city, units }) => {
                assert_eq!(city, "London");
                assert_eq!(Units::from(units.expect("units should be set")), Units::Imperial);
            }
            other => panic!("expected show, got {other:?}"),
        }
    }
}
