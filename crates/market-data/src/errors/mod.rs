//! Error types for market data operations.

use thiserror::Error;

/// Errors that can occur while fetching market data.
///
/// An empty series is *not* an error — providers report that as
/// `Ok(None)`. These variants cover the "call failed" cases so callers can
/// tell a transport problem from a malformed payload.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider rate limited the request (HTTP 429 or an API note).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (bad status, API error message).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The response body did not match the expected shape: missing keys,
    /// non-numeric price fields, unparseable dates.
    #[error("Parse failed: {message}")]
    ParseFailed {
        /// Description of what failed to parse
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// True for failures of the transport class (network, status, quota),
    /// false for payload-shape failures.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::ParseFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failed_is_not_transport() {
        let error = MarketDataError::ParseFailed {
            message: "missing field `1. open`".to_string(),
        };
        assert!(!error.is_transport());
    }

    #[test]
    fn rate_limited_is_transport() {
        let error = MarketDataError::RateLimited {
            provider: "ALPHA_VANTAGE".to_string(),
        };
        assert!(error.is_transport());
    }

    #[test]
    fn error_display() {
        let error = MarketDataError::ProviderError {
            provider: "ALPHA_VANTAGE".to_string(),
            message: "API key invalid".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: ALPHA_VANTAGE - API key invalid"
        );
    }
}
