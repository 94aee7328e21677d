use thiserror::Error;

/// Fallback shown when the service gives no usable message.
pub const GENERIC_FETCH_MESSAGE: &str = "City not found or an error occurred.";

/// Failures of a request against the weather service.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("City name must not be empty")]
    EmptyCity,

    #[error("Failed to send request to OpenWeather ({endpoint}): {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: u16,
        /// `message` field of the error body, when present.
        message: Option<String>,
        body: String,
    },

    #[error("Failed to parse OpenWeather {endpoint} JSON: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to resolve your location to a city: {0}")]
    Resolve(String),

    #[error(transparent)]
    Location(#[from] LocationError),
}

impl FetchError {
    /// Message suitable for the dashboard's error banner.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::EmptyCity => "Please enter a city name.".to_string(),
            FetchError::Api { message: Some(m), .. } if !m.trim().is_empty() => capitalize(m.trim()),
            FetchError::Resolve(_) => self.to_string(),
            FetchError::Location(e) => e.user_message().to_string(),
            _ => GENERIC_FETCH_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures while obtaining the user's position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location service unavailable")]
    Unavailable,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location request timed out")]
    Timeout,
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::Unavailable => "Geolocation is not available on this device.",
            LocationError::PermissionDenied => "Location permission denied.",
            LocationError::Timeout => "Location request timed out.",
        }
    }
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Clip response bodies embedded in error text.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
