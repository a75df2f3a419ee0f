use thiserror::Error;

use crate::notify::Notice;

/// External service a transport failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Geocoding,
    Forecast,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::Geocoding => f.write_str("geocoding"),
            Service::Forecast => f.write_str("forecast"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported")]
    Unsupported,

    #[error("permission to read the location was denied")]
    PermissionDenied,

    #[error("location request timed out after {0}s")]
    Timeout(u64),

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Failures a lookup can surface to the user. None of them are fatal.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("search query is empty")]
    EmptyQuery,

    #[error("no results for '{query}'")]
    NoResults { query: String },

    #[error("{service} request failed: {reason}")]
    Transport { service: Service, reason: String },

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

impl LookupError {
    pub(crate) fn transport(service: Service, reason: impl Into<String>) -> Self {
        LookupError::Transport {
            service,
            reason: reason.into(),
        }
    }

    /// Text for the inline error line.
    pub fn inline_message(&self) -> &'static str {
        match self {
            LookupError::EmptyQuery => "Enter a city name to search.",
            LookupError::NoResults { .. } => "No results for that city. Try another query.",
            LookupError::Transport { service: Service::Geocoding, .. } => {
                "Search failed. Please try again later."
            }
            LookupError::Transport { .. } => "Could not retrieve weather. Please try again.",
            LookupError::Geolocation(GeolocationError::Unsupported) => {
                "Geolocation is not supported on this device."
            }
            LookupError::Geolocation(_) => "Unable to access your location.",
        }
    }

    /// Short advisory shown next to the inline message.
    pub fn notice(&self) -> Notice {
        match self {
            LookupError::EmptyQuery => Notice::info("Enter a city"),
            LookupError::NoResults { .. } => Notice::error("No results"),
            LookupError::Transport { service: Service::Geocoding, .. } => {
                Notice::error("Search failed")
            }
            LookupError::Transport { .. } => Notice::error("Fetch failed"),
            LookupError::Geolocation(GeolocationError::Unsupported) => {
                Notice::error("Geolocation unsupported")
            }
            LookupError::Geolocation(_) => Notice::error("Location denied"),
        }
    }
}
