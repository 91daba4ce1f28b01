use thiserror::Error;

/// Conditions reported back to the caller as plain text rather than as tool failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeatherError {
    /// Region key outside the supported set
    #[error("Unsupported region: {0}")]
    InvalidRegion(String),

    /// Upstream returned nothing usable; network, status and decode failures look the same
    #[error("Unable to fetch {0}.")]
    UpstreamUnavailable(String),
}

impl WeatherError {
    pub fn unavailable(what: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(what.into())
    }
}
