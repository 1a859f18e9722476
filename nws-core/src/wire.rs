//! Records mirroring the JSON documents served by api.weather.gov.
//!
//! Only the fields the pipeline reads are declared; everything else in the
//! GeoJSON payloads is ignored.

use serde::Deserialize;

use crate::{error::ApiError, model::Weather};

/// `GET /points/{lat},{lon}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PointsProperties {
    /// Absolute URL of the gridpoint forecast resource.
    pub forecast: String,
}

/// `GET <forecast url>`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastProperties {
    pub periods: Vec<Period>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub temperature: i32,
    pub short_forecast: String,
    pub icon: String,
}

impl ForecastResponse {
    /// The soonest forecast period.
    pub fn first_period(&self) -> Result<&Period, ApiError> {
        self.properties.periods.first().ok_or(ApiError::NoForecastPeriods)
    }
}

impl Period {
    /// Map this period to the domain value, labelled with `location`.
    pub fn to_weather(&self, location: &str) -> Weather {
        Weather {
            temperature: self.temperature,
            short_forecast: self.short_forecast.clone(),
            icon: self.icon.clone(),
            location: location.to_string(),
        }
    }
}
