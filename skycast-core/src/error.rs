//! Error kinds reported to the presentation layer.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    /// Geocoding returned no results for the requested city.
    #[error("No location found for '{0}'")]
    NoMatchFound(String),

    /// Network failure or non-success status from an upstream service.
    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Body could not be decoded, or the daily arrays are absent or the wrong length.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl WeatherError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoMatchFound(city) => format!("Could not find a location named '{city}'."),
            Self::UpstreamUnavailable(_) => {
                "Weather service is unavailable. Check your connection.".to_string()
            }
            Self::MalformedResponse(_) => {
                "Weather service returned data in an unexpected format.".to_string()
            }
        }
    }

    /// Whether trying the same request again could succeed. Nothing retries automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_))
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::UpstreamUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
