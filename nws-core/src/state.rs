//! Observable UI state for a weather display.

use std::sync::Arc;
use tokio::{runtime::Handle, sync::watch, task::JoinHandle};

use crate::{model::Weather, result::FetchResult, usecase::WeatherQuery};

/// Snapshot rendered by a front end.
///
/// Display fields are sticky: loading and error transitions keep whatever
/// the last successful fetch put there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherUiState {
    pub temperature: i32,
    pub short_forecast: String,
    pub icon: String,
    pub is_loading: bool,
    pub is_error: bool,
    pub error_message: String,
}

impl WeatherUiState {
    pub fn loading(&self) -> Self {
        Self { is_loading: true, is_error: false, ..self.clone() }
    }

    pub fn apply(&self, result: &FetchResult<Weather>) -> Self {
        match result {
            FetchResult::Success { data } => Self {
                temperature: data.temperature,
                short_forecast: data.short_forecast.clone(),
                icon: data.icon.clone(),
                is_loading: false,
                is_error: false,
                ..self.clone()
            },
            FetchResult::Error { message } => Self {
                is_loading: false,
                is_error: true,
                error_message: message.clone(),
                ..self.clone()
            },
            FetchResult::Loading => self.loading(),
        }
    }
}

/// Holds the latest [`WeatherUiState`] and drives fetches into it.
///
/// Fetches are independent tasks: a retry neither waits for nor cancels an
/// earlier one, so whichever finishes last decides the visible state.
pub struct WeatherViewModel {
    query: Arc<dyn WeatherQuery>,
    state: Arc<watch::Sender<WeatherUiState>>,
    runtime: Handle,
}

impl WeatherViewModel {
    /// Publish a loading snapshot and start the first fetch.
    ///
    /// Fetches run on the runtime this is called from; use
    /// [`WeatherViewModel::with_runtime`] outside of one.
    pub fn new(query: Arc<dyn WeatherQuery>) -> Self {
        Self::with_runtime(query, Handle::current())
    }

    /// Like [`WeatherViewModel::new`], spawning fetches onto `runtime`.
    pub fn with_runtime(query: Arc<dyn WeatherQuery>, runtime: Handle) -> Self {
        let (state, _) = watch::channel(WeatherUiState::default());
        let vm = Self { query, state: Arc::new(state), runtime };
        vm.load_weather();
        vm
    }

    /// Re-run the fetch. The returned handle resolves once its result is published.
    pub fn retry(&self) -> JoinHandle<()> {
        self.load_weather()
    }

    pub fn state(&self) -> WeatherUiState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WeatherUiState> {
        self.state.subscribe()
    }

    fn load_weather(&self) -> JoinHandle<()> {
        self.state.send_modify(|s| *s = s.loading());

        let query = Arc::clone(&self.query);
        let state = Arc::clone(&self.state);
        self.runtime.spawn(async move {
            let result = query.execute().await;
            match &result {
                FetchResult::Success { data } => {
                    tracing::info!(temperature = data.temperature, "weather loaded")
                }
                FetchResult::Error { message } => tracing::info!(%message, "weather failed"),
                FetchResult::Loading => tracing::debug!("weather still loading"),
            }
            state.send_modify(|s| *s = s.apply(&result));
        })
    }
}
