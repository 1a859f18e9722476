use anyhow::anyhow;
use nws_core::{FetchResult, WeatherUiState};
use serde_json::{Value, json};

/// Fixed label shown for failed fetches; the detail follows it.
pub const ERROR_LABEL: &str = "Error loading weather";

pub fn text(state: &WeatherUiState, location: &str) -> String {
    if state.is_error {
        return format!("{ERROR_LABEL}: {}", state.error_message);
    }
    if state.is_loading {
        return "Loading...".to_string();
    }

    let mut out = format!("{location}\n{}°F  {}", state.temperature, state.short_forecast);
    if !state.icon.is_empty() {
        out.push_str(&format!("\nicon: {}", state.icon));
    }
    out
}

pub fn json(state: &WeatherUiState, location: &str) -> Value {
    if state.is_error {
        json!({ "error": state.error_message })
    } else {
        json!({
            "location": location,
            "temperature": state.temperature,
            "short_forecast": state.short_forecast,
            "icon": state.icon,
        })
    }
}

pub fn temperature(result: &FetchResult<i32>) -> anyhow::Result<String> {
    match result {
        FetchResult::Success { data } => Ok(data.to_string()),
        FetchResult::Error { message } => Err(anyhow!("{ERROR_LABEL}: {message}")),
        FetchResult::Loading => Err(anyhow!("Temperature is still loading")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> WeatherUiState {
        WeatherUiState {
            temperature: 78,
            short_forecast: "Sunny".into(),
            icon: "https://api.weather.gov/icons/land/day/skc?size=medium".into(),
            ..WeatherUiState::default()
        }
    }

    #[test]
    fn text_shows_location_temperature_and_forecast() {
        let out = text(&loaded(), "San Jose, CA");
        assert!(out.starts_with("San Jose, CA\n78°F  Sunny"));
        assert!(out.contains("icon: https://api.weather.gov/icons/land/day/skc?size=medium"));
    }

    #[test]
    fn text_shows_error_label() {
        let state = WeatherUiState {
            is_error: true,
            error_message: "Network error".into(),
            ..loaded()
        };
        assert_eq!(text(&state, "San Jose, CA"), "Error loading weather: Network error");
    }

    #[test]
    fn json_has_snake_case_fields() {
        let value = json(&loaded(), "San Jose, CA");
        assert_eq!(value["temperature"], 78);
        assert_eq!(value["short_forecast"], "Sunny");
        assert_eq!(value["location"], "San Jose, CA");
    }

    #[test]
    fn temperature_formats_success_and_rejects_error() {
        assert_eq!(temperature(&FetchResult::success(-3)).unwrap(), "-3");

        let err = temperature(&FetchResult::error("Network error")).unwrap_err();
        assert_eq!(err.to_string(), "Error loading weather: Network error");
    }
}
