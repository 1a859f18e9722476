use reqwest::StatusCode;
use thiserror::Error;

/// Named failures raised by the weather.gov client.
///
/// Transport and decode failures are reported through `anyhow` context instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("weather.gov {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Forecast response contained no periods")]
    NoForecastPeriods,
}

/// Cut an error body down to something that fits on one log line.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
