//! Error types for the external source providers.

use thiserror::Error;

/// Source name reported when the country list fetch fails.
pub const COUNTRIES_SOURCE: &str = "countries API";

/// Source name reported when the exchange-rate fetch fails.
pub const RATES_SOURCE: &str = "exchange rates API";

/// Errors produced by the remote data sources.
///
/// Both variants identify the failing source; the HTTP layer surfaces
/// that name to clients on a 503.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The request failed outright: network error, timeout, or a
    /// non-success HTTP status.
    #[error("{source_name} unavailable: {message}")]
    Unavailable {
        source_name: &'static str,
        message: String,
    },

    /// The response arrived but did not have the expected shape.
    #[error("{source_name} returned an invalid payload: {message}")]
    InvalidPayload {
        source_name: &'static str,
        message: String,
    },
}

impl SourceError {
    /// The name of the remote source that caused this error.
    pub fn source(&self) -> &'static str {
        match self {
            Self::Unavailable { source_name, .. } | Self::InvalidPayload { source_name, .. } => {
                source_name
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_name_is_preserved() {
        let err = SourceError::Unavailable {
            source_name: COUNTRIES_SOURCE,
            message: "connection refused".to_string(),
        };
        assert_eq!(err.source(), "countries API");

        let err = SourceError::InvalidPayload {
            source_name: RATES_SOURCE,
            message: "missing field `rates`".to_string(),
        };
        assert_eq!(err.source(), "exchange rates API");
    }

    #[test]
    fn test_error_display() {
        let err = SourceError::Unavailable {
            source_name: RATES_SOURCE,
            message: "timeout".to_string(),
        };
        assert_eq!(format!("{}", err), "exchange rates API unavailable: timeout");
    }
}
