//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The points -> forecast fetch pipeline against api.weather.gov
//! - A success/error/loading result wrapper used by every layer above the client
//! - Query entry points and an observable view model for front ends
//! - Configuration handling
//!
//! It is used by `nws-cli`, but can also be reused by other front ends.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod result;
pub mod state;
pub mod usecase;
pub mod wire;

pub use api::{NwsClient, WeatherApi};
pub use config::{Config, Coordinates};
pub use error::ApiError;
pub use model::{DEFAULT_LOCATION, Weather};
pub use repository::{NwsWeatherRepository, WeatherRepository, repository_from_config};
pub use result::FetchResult;
pub use state::{WeatherUiState, WeatherViewModel};
pub use usecase::{GetTodayTemperature, GetWeather, TemperatureQuery, WeatherQuery};
