use serde::{Deserialize, Serialize};

/// Label attached to forecasts fetched for the default coordinates.
pub const DEFAULT_LOCATION: &str = "San Jose, CA";

/// Weather at a location for the soonest forecast period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    /// Degrees Fahrenheit.
    pub temperature: i32,
    pub short_forecast: String,
    /// URL of the condition glyph.
    pub icon: String,
    pub location: String,
}

impl Weather {
    pub fn new(temperature: i32, short_forecast: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            temperature,
            short_forecast: short_forecast.into(),
            icon: icon.into(),
            location: DEFAULT_LOCATION.to_string(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}
