//! Pipeline error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("element {index} has no page_number")]
    MissingPageIdentifier { index: usize },

    #[error("element {index} has an invalid page_number: {value}")]
    InvalidPageIdentifier { index: usize, value: String },

    /// The backend call never completed (connect failure, timeout, broken transport).
    #[error("generation backend unavailable: {0}")]
    BackendUnavailable(#[source] slidescript_llms::Error),

    /// The backend answered with a refusal or an error.
    #[error("generation backend rejected the request: {0}")]
    BackendRejected(#[source] slidescript_llms::Error),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingPageIdentifier { .. } => "MISSING_PAGE_IDENTIFIER",
            Self::InvalidPageIdentifier { .. } => "INVALID_PAGE_IDENTIFIER",
            Self::BackendUnavailable(_) => "BACKEND_UNAVAILABLE",
            Self::BackendRejected(_) => "BACKEND_REJECTED",
            Self::Extraction(_) => "EXTRACTION_FAILED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// The underlying backend error, for callers that need the exact cause.
    pub fn backend_error(&self) -> Option<&slidescript_llms::Error> {
        match self {
            Self::BackendUnavailable(e) | Self::BackendRejected(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_auth_rejected(&self) -> bool {
        matches!(
            self,
            Self::BackendRejected(slidescript_llms::Error::AuthRejected { .. })
        )
    }
}

impl From<slidescript_llms::Error> for PipelineError {
    fn from(err: slidescript_llms::Error) -> Self {
        use slidescript_llms::Error as E;
        match err {
            // Precondition failures owned by whoever built the backend
            E::MissingApiKey(_) | E::ProviderNotFound(_) => Self::Config(err.to_string()),
            e if e.is_transport() => Self::BackendUnavailable(e),
            e => Self::BackendRejected(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
