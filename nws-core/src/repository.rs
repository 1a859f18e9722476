use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    api::{NwsClient, WeatherApi},
    config::{Config, Coordinates},
    model::{DEFAULT_LOCATION, Weather},
    result::FetchResult,
    wire::Period,
};

/// Weather lookups for a single configured location.
#[async_trait]
pub trait WeatherRepository: Send + Sync {
    /// Temperature of the soonest forecast period.
    async fn get_today_temperature(&self) -> FetchResult<i32>;

    /// Full weather for the soonest forecast period.
    async fn get_weather(&self) -> FetchResult<Weather>;
}

/// Repository backed by the points -> forecast call pair.
///
/// Each operation issues both calls again; no response is shared between them.
#[derive(Debug, Clone)]
pub struct NwsWeatherRepository {
    api: Arc<dyn WeatherApi>,
    coordinates: Coordinates,
    location: String,
}

impl NwsWeatherRepository {
    pub fn new(api: Arc<dyn WeatherApi>) -> Self {
        Self {
            api,
            coordinates: Coordinates::default(),
            location: DEFAULT_LOCATION.to_string(),
        }
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = coordinates;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    async fn first_period(&self) -> Result<Period> {
        let points = self.api.get_points(self.coordinates).await?;
        let forecast = self.api.get_forecast(&points.properties.forecast).await?;
        Ok(forecast.first_period()?.clone())
    }

    async fn fetch_first_period(&self, operation: &'static str) -> FetchResult<Period> {
        let result = self.first_period().await;
        if let Err(err) = &result {
            tracing::warn!(coordinates = %self.coordinates, operation, "fetch failed: {err:#}");
        }
        FetchResult::from(result)
    }
}

#[async_trait]
impl WeatherRepository for NwsWeatherRepository {
    async fn get_today_temperature(&self) -> FetchResult<i32> {
        self.fetch_first_period("temperature").await.map(|period| period.temperature)
    }

    async fn get_weather(&self) -> FetchResult<Weather> {
        self.fetch_first_period("weather")
            .await
            .map(|period| period.to_weather(&self.location))
    }
}

/// Assemble a repository talking to weather.gov with the settings in `config`.
pub fn repository_from_config(config: &Config) -> Result<NwsWeatherRepository> {
    let client = NwsClient::new(config)?;
    Ok(NwsWeatherRepository::new(Arc::new(client))
        .with_coordinates(config.coordinates()?)
        .with_location(config.location.as_str()))
}
