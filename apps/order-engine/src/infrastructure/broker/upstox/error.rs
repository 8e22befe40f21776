//! Upstox-specific error types.

use thiserror::Error;

use crate::application::ports::BrokerError;

/// Errors from the Upstox adapter.
#[derive(Debug, Error, Clone)]
pub enum UpstoxError {
    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Authentication failed (missing, expired, or invalid token).
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error; the outcome of the request is unknown.
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be parsed.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// The quote response did not contain the requested instrument.
    #[error("no quote in response for instrument token {token}")]
    MissingQuote {
        /// The instrument token that was queried.
        token: i64,
    },
}

impl From<UpstoxError> for BrokerError {
    fn from(err: UpstoxError) -> Self {
        match err {
            UpstoxError::Api { status, message } => Self::Rejected {
                reason: format!("{status}: {message}"),
            },
            UpstoxError::AuthenticationFailed => Self::Rejected {
                reason: "authentication failed".to_string(),
            },
            // A parse failure after a 2xx is as ambiguous as a dropped
            // connection: the order may be on the books.
            UpstoxError::Network(message) | UpstoxError::JsonParse(message) => {
                Self::Transport { message }
            }
            UpstoxError::MissingQuote { token } => Self::QuoteUnavailable { token },
        }
    }
}
