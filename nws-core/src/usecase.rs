//! Narrow query entry points over a [`WeatherRepository`].
//!
//! Callers that only need one lookup depend on [`WeatherQuery`] or
//! [`TemperatureQuery`] instead of the whole repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{model::Weather, repository::WeatherRepository, result::FetchResult};

#[async_trait]
pub trait WeatherQuery: Send + Sync {
    async fn execute(&self) -> FetchResult<Weather>;
}

#[async_trait]
pub trait TemperatureQuery: Send + Sync {
    async fn execute(&self) -> FetchResult<i32>;
}

#[derive(Clone)]
pub struct GetWeather {
    repository: Arc<dyn WeatherRepository>,
}

impl GetWeather {
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl WeatherQuery for GetWeather {
    async fn execute(&self) -> FetchResult<Weather> {
        self.repository.get_weather().await
    }
}

#[derive(Clone)]
pub struct GetTodayTemperature {
    repository: Arc<dyn WeatherRepository>,
}

impl GetTodayTemperature {
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TemperatureQuery for GetTodayTemperature {
    async fn execute(&self) -> FetchResult<i32> {
        self.repository.get_today_temperature().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubRepository {
        temperature: FetchResult<i32>,
        weather: FetchResult<Weather>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherRepository for StubRepository {
        async fn get_today_temperature(&self) -> FetchResult<i32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.temperature.clone()
        }

        async fn get_weather(&self) -> FetchResult<Weather> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.weather.clone()
        }
    }

    fn stub(temperature: FetchResult<i32>, weather: FetchResult<Weather>) -> Arc<StubRepository> {
        Arc::new(StubRepository { temperature, weather, calls: AtomicUsize::new(0) })
    }

    #[tokio::test]
    async fn get_weather_forwards_success() {
        let weather = Weather::new(68, "Partly Cloudy", "icon-p");
        let repo = stub(FetchResult::Loading, FetchResult::success(weather.clone()));

        let result = GetWeather::new(repo.clone()).execute().await;

        assert_eq!(result, FetchResult::success(weather));
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn get_weather_forwards_loading_verbatim() {
        let repo = stub(FetchResult::success(1), FetchResult::Loading);
        assert_eq!(GetWeather::new(repo).execute().await, FetchResult::Loading);
    }

    #[tokio::test]
    async fn get_today_temperature_forwards_error() {
        let repo = stub(FetchResult::error("Network error"), FetchResult::Loading);

        let query = GetTodayTemperature::new(repo.clone());
        assert_eq!(query.execute().await, FetchResult::error("Network error"));
        assert_eq!(query.execute().await, FetchResult::error("Network error"));
        assert_eq!(repo.calls.load(Ordering::SeqCst), 2);
    }
}
