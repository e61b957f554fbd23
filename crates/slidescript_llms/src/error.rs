//! Error types for backend calls

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by providers and the registry.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure: connect refused, DNS, timeout, broken body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No credential was supplied when building the provider
    #[error("Missing API key for provider: {0}")]
    MissingApiKey(String),

    /// Lookup of an unregistered provider ID
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// The backend refused the credential (401/403)
    #[error("{provider} rejected the credential ({status}): {message}")]
    AuthRejected {
        provider: String,
        status: u16,
        message: String,
    },

    /// The backend throttled the request (429)
    #[error("{provider} rate limited the request: {message}")]
    RateLimited { provider: String, message: String },

    /// Any other non-success status reported by the backend
    #[error("{provider} API error {status}: {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    /// Response arrived but could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl Error {
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Classify a non-success HTTP status returned by `provider`.
    pub fn from_status(provider: &str, status: StatusCode, body: impl Into<String>) -> Self {
        let message = body.into();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::AuthRejected {
                provider: provider.to_string(),
                status: status.as_u16(),
                message,
            },
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited {
                provider: provider.to_string(),
                message,
            },
            _ => Self::Api {
                provider: provider.to_string(),
                status: status.as_u16(),
                message,
            },
        }
    }

    /// True when the request never produced a backend answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(err) if err.status().is_none())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Http(_) => "HTTP_ERROR",
            Self::MissingApiKey(_) => "MISSING_API_KEY",
            Self::ProviderNotFound(_) => "PROVIDER_NOT_FOUND",
            Self::AuthRejected { .. } => "AUTH_REJECTED",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::Api { .. } => "API_ERROR",
            Self::InvalidResponse(_) => "INVALID_RESPONSE",
        }
    }
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, Error>;
