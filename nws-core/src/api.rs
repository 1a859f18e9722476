use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    config::Coordinates,
    wire::{ForecastResponse, PointsResponse},
};

pub mod nws;

pub use nws::NwsClient;

/// The two calls the forecast pipeline makes against the weather service.
///
/// Every call hits the network; nothing is cached or retried.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// Resolve a point to its gridpoint metadata, including the forecast URL.
    async fn get_points(&self, coordinates: Coordinates) -> anyhow::Result<PointsResponse>;

    /// Fetch the forecast resource at an absolute URL.
    async fn get_forecast(&self, url: &str) -> anyhow::Result<ForecastResponse>;
}
