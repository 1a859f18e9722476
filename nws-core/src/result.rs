/// Message used when a failure renders to an empty string.
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Outcome of a fallible asynchronous fetch.
///
/// Every layer above the transport client speaks in this type: failures are
/// flattened into `Error` with a human-readable message and `Loading` marks
/// an in-flight or not-yet-started fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult<T> {
    Success { data: T },
    Error { message: String },
    Loading,
}

impl<T> FetchResult<T> {
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            Self::Error { message: UNKNOWN_ERROR.to_string() }
        } else {
            Self::Error { message }
        }
    }

    /// Build an `Error` from an `anyhow` error, keeping its whole context chain.
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self::error(format!("{err:#}"))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data } => Some(data),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> FetchResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success { data } => FetchResult::Success { data: f(data) },
            Self::Error { message } => FetchResult::Error { message },
            Self::Loading => FetchResult::Loading,
        }
    }
}

impl<T> From<anyhow::Result<T>> for FetchResult<T> {
    fn from(value: anyhow::Result<T>) -> Self {
        match value {
            Ok(data) => Self::success(data),
            Err(err) => Self::from_error(&err),
        }
    }
}
