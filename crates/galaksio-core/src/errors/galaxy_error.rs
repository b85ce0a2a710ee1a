//! Galaxy API errors.

use super::error_code::{self, GalaksioErrorCode};

/// Errors raised by calls to the external Galaxy API.
#[derive(Debug, thiserror::Error)]
pub enum GalaxyError {
    #[error("Network error: {reason}")]
    Network { reason: String },

    #[error("Galaxy returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode Galaxy response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected Galaxy response: {0}")]
    InvalidResponse(String),

    #[error("All {attempts} attempts failed: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

impl GalaxyError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Network failures, server errors and rate limiting are transient;
    /// other client errors and malformed responses are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429 || *status == 408,
            Self::Decode { .. } | Self::InvalidResponse(_) | Self::RetriesExhausted { .. } => false,
        }
    }

    /// Whether the failure is a 4xx rejection of the request itself.
    pub fn is_client_rejection(&self) -> bool {
        matches!(self, Self::Http { status, .. } if (400..500).contains(status) && *status != 429 && *status != 408)
    }
}

impl GalaksioErrorCode for GalaxyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Network { .. } | Self::RetriesExhausted { .. } => error_code::GALAXY_UNAVAILABLE,
            _ => error_code::GALAXY_ERROR,
        }
    }
}
