use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, CustomType, Text};
use nws_core::{
    Config, GetTodayTemperature, GetWeather, TemperatureQuery, WeatherUiState, WeatherViewModel,
    repository_from_config,
};
use std::{io::IsTerminal, sync::Arc};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Forecast from api.weather.gov")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current forecast.
    Show {
        #[command(flatten)]
        place: PlaceArgs,

        /// Print the result as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print only today's temperature in °F, as a bare integer.
    Temperature {
        #[command(flatten)]
        coordinates: CoordinateArgs,
    },

    /// Interactively set the default location.
    Configure,

    /// Print the path of the config file.
    ConfigPath,
}

/// Per-invocation overrides of the configured coordinates.
#[derive(Debug, Args)]
pub struct CoordinateArgs {
    /// Latitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,
}

impl CoordinateArgs {
    fn apply(self, mut config: Config) -> Config {
        if let Some(lat) = self.lat {
            config.latitude = lat;
        }
        if let Some(lon) = self.lon {
            config.longitude = lon;
        }
        config
    }
}

/// Per-invocation overrides of the configured place.
#[derive(Debug, Args)]
pub struct PlaceArgs {
    #[command(flatten)]
    coordinates: CoordinateArgs,

    /// Label shown next to the forecast.
    #[arg(long)]
    location: Option<String>,
}

impl PlaceArgs {
    fn apply(self, config: Config) -> Config {
        let mut config = self.coordinates.apply(config);
        if let Some(location) = self.location {
            config.location = location;
        }
        config
    }
}

/// What `show` does once a fetch has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterFetch {
    Done,
    AskRetry,
    Fail,
}

fn after_fetch(state: &WeatherUiState, json: bool, interactive: bool) -> AfterFetch {
    if !state.is_error {
        AfterFetch::Done
    } else if json || !interactive {
        AfterFetch::Fail
    } else {
        AfterFetch::AskRetry
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { place, json } => {
                tracing::debug!(?place, json, "show");
                let config = place.apply(Config::load()?);
                show(&config, json).await?;
            }
            Command::Temperature { coordinates } => {
                tracing::debug!(?coordinates, "temperature");
                let config = coordinates.apply(Config::load()?);
                let repository = Arc::new(repository_from_config(&config)?);
                let result = GetTodayTemperature::new(repository).execute().await;
                println!("{}", render::temperature(&result)?);
            }
            Command::Configure => {
                tracing::debug!("configure");
                configure()?;
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

async fn show(config: &Config, json: bool) -> anyhow::Result<()> {
    let repository = Arc::new(repository_from_config(config)?);
    let vm = WeatherViewModel::new(Arc::new(GetWeather::new(repository)));
    let mut updates = vm.subscribe();
    let interactive = std::io::stdin().is_terminal();

    loop {
        let state: WeatherUiState = updates
            .wait_for(|s| !s.is_loading)
            .await
            .context("Weather state closed unexpectedly")?
            .clone();

        let next = after_fetch(&state, json, interactive);

        if json {
            println!("{}", serde_json::to_string_pretty(&render::json(&state, &config.location))?);
        } else if next != AfterFetch::Fail {
            println!("{}", render::text(&state, &config.location));
        }

        match next {
            AfterFetch::Done => return Ok(()),
            AfterFetch::Fail => return Err(failure(&state)),
            AfterFetch::AskRetry => {
                if !ask_retry()? {
                    return Err(failure(&state));
                }
                tracing::debug!("retrying");
                vm.retry();
            }
        }
    }
}

fn failure(state: &WeatherUiState) -> anyhow::Error {
    anyhow!("{}: {}", render::ERROR_LABEL, state.error_message)
}

fn ask_retry() -> anyhow::Result<bool> {
    Confirm::new("Retry?")
        .with_default(true)
        .prompt()
        .context("Failed to read retry answer")
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let latitude = CustomType::<f64>::new("Latitude:")
        .with_default(config.latitude)
        .with_error_message("Please type a number, e.g. 37.2883")
        .prompt()?;
    let longitude = CustomType::<f64>::new("Longitude:")
        .with_default(config.longitude)
        .with_error_message("Please type a number, e.g. -121.8434")
        .prompt()?;
    let location = Text::new("Location label:").with_default(&config.location).prompt()?;
    let user_agent = Text::new("User-Agent (weather.gov asks for contact info):")
        .with_default(&config.user_agent)
        .prompt()?;

    config.latitude = latitude;
    config.longitude = longitude;
    config.location = location;
    config.user_agent = user_agent;
    config.coordinates()?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed() -> WeatherUiState {
        WeatherUiState {
            is_error: true,
            error_message: "Connection refused".into(),
            ..WeatherUiState::default()
        }
    }

    #[test]
    fn success_finishes_in_every_mode() {
        let ok = WeatherUiState { temperature: 70, ..WeatherUiState::default() };
        assert_eq!(after_fetch(&ok, false, true), AfterFetch::Done);
        assert_eq!(after_fetch(&ok, false, false), AfterFetch::Done);
        assert_eq!(after_fetch(&ok, true, false), AfterFetch::Done);
    }

    #[test]
    fn failure_without_terminal_fails_instead_of_prompting() {
        assert_eq!(after_fetch(&failed(), false, false), AfterFetch::Fail);
    }

    #[test]
    fn json_failure_fails_even_on_a_terminal() {
        assert_eq!(after_fetch(&failed(), true, true), AfterFetch::Fail);
        assert_eq!(after_fetch(&failed(), true, false), AfterFetch::Fail);
    }

    #[test]
    fn failure_on_a_terminal_offers_retry() {
        assert_eq!(after_fetch(&failed(), false, true), AfterFetch::AskRetry);
    }

    #[test]
    fn failure_error_carries_label_and_message() {
        assert_eq!(
            failure(&failed()).to_string(),
            "Error loading weather: Connection refused"
        );
    }

    #[test]
    fn temperature_takes_no_location_flag() {
        assert!(Cli::try_parse_from(["weather", "temperature", "--location", "Reno"]).is_err());

        let cli = Cli::try_parse_from(["weather", "temperature", "--lat", "39.5", "--lon", "-119.8"])
            .unwrap();
        let Command::Temperature { coordinates } = cli.command else {
            panic!("expected temperature command");
        };
        let config = coordinates.apply(Config::default());
        assert_eq!(config.latitude, 39.5);
        assert_eq!(config.longitude, -119.8);
    }

    #[test]
    fn show_accepts_location_override() {
        let cli = Cli::try_parse_from(["weather", "show", "--location", "Reno, NV", "--json"])
            .unwrap();
        let Command::Show { place, json } = cli.command else {
            panic!("expected show command");
        };
        assert!(json);
        assert_eq!(place.apply(Config::default()).location, "Reno, NV");
    }
}
