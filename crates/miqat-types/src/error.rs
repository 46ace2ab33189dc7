use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from miqat operations.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum MiqatError {
    /// Latitude or longitude outside the geographic domain.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// No location could be determined by any provider.
    #[error("Geolocation unavailable: {0}")]
    GeolocationUnavailable(String),

    /// Transport-level failure talking to a remote service.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// A calendar date that does not exist (e.g. month 13).
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl MiqatError {
    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }

    /// Creates a `GeolocationUnavailable` error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::GeolocationUnavailable(reason.into())
    }

    /// True for errors that a geolocation fallback should recover from.
    pub fn is_geolocation_failure(&self) -> bool {
        matches!(
            self,
            Self::GeolocationUnavailable(_) | Self::NetworkError(_) | Self::InvalidCoordinate(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MiqatError::invalid_config("fajr angle is NaN");
        assert_eq!(err.to_string(), "Invalid configuration: fajr angle is NaN");

        let err = MiqatError::InvalidCoordinate("Latitude 91 out of range [-90, 90]".into());
        assert!(err.to_string().starts_with("Invalid coordinate:"));
    }

    #[test]
    fn test_geolocation_failure_classification() {
        assert!(MiqatError::unavailable("denied").is_geolocation_failure());
        assert!(MiqatError::NetworkError("timeout".into()).is_geolocation_failure());
        assert!(!MiqatError::InvalidDate("2024-13".into()).is_geolocation_failure());
    }
}
