use anyhow::Result;
use inquire::validator::Validation;
use inquire::{CustomUserError, InquireError, Select, Text};

use dashboard_core::{RequestState, Units, WeatherStore};

use crate::render;

/// How many recent searches the menu offers, newest first.
const RECENT_LIMIT: usize = 6;

#[derive(Debug, PartialEq)]
enum MenuChoice {
    Search,
    Recent(String),
    ToggleUnits(Units),
    Quit,
}

impl std::fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuChoice::Search => f.write_str("Search for a city"),
            MenuChoice::Recent(key) => write!(f, "Recent: {key}"),
            MenuChoice::ToggleUnits(target) => write!(f, "Switch to {target} units"),
            MenuChoice::Quit => f.write_str("Quit"),
        }
    }
}

fn menu_choices(store: &WeatherStore) -> Vec<MenuChoice> {
    let mut choices = vec![MenuChoice::Search];
    choices.extend(
        store
            .cache()
            .recent_keys()
            .take(RECENT_LIMIT)
            .map(|key| MenuChoice::Recent(key.to_string())),
    );
    choices.push(MenuChoice::ToggleUnits(store.units().toggled()));
    choices.push(MenuChoice::Quit);
    choices
}

fn non_empty_city(input: &str) -> Result<Validation, CustomUserError> {
    if input.trim().is_empty() {
        Ok(Validation::Invalid("Please enter a city name.".into()))
    } else {
        Ok(Validation::Valid)
    }
}

fn show_outcome(store: &WeatherStore) {
    match store.request_state() {
        RequestState::Succeeded(record) => {
            println!("\n{}", render::weather_report(record, store.units()));
        }
        RequestState::Failed(message) => println!("\n{message}\n"),
        RequestState::Idle | RequestState::Loading => {}
    }
}

/// Interactive loop: search, revisit recent cities, flip units. Esc or
/// Ctrl-C at the menu ends the session.
pub async fn run(mut store: WeatherStore) -> Result<()> {
    println!("Weather dashboard. Esc or Ctrl-C quits.\n");

    loop {
        let choice = match Select::new("What next?", menu_choices(&store)).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match choice {
            MenuChoice::Search => {
                let city = match Text::new("City name:")
                    .with_validator(non_empty_city)
                    .prompt()
                {
                    Ok(city) => city,
                    // Esc backs out of the search, Ctrl-C ends the session.
                    Err(InquireError::OperationCanceled) => continue,
                    Err(InquireError::OperationInterrupted) => break,
                    Err(err) => return Err(err.into()),
                };

                println!("Fetching current weather for {}...", city.trim());
                store.submit(&city).await;
                show_outcome(&store);
            }
            MenuChoice::Recent(key) => {
                if store.load_from_cache(&key) {
                    show_outcome(&store);
                }
            }
            MenuChoice::ToggleUnits(_) => {
                let units = store.toggle_units();
                println!("Now showing {units} units.");
                show_outcome(&store);
            }
            MenuChoice::Quit => break,
        }
    }

    Ok(())
}
