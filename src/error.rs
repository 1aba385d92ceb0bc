use thiserror::Error;

/// Errors produced by the review analysis API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected locally, no request was sent
    #[error("Review must be at least {min_length} characters long")]
    Validation { min_length: usize },

    /// The service could not be reached
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered but reported a failure
    #[error("{message}")]
    Service { status: Option<u16>, message: String },
}

impl ApiError {
    pub fn service(status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::Service {
            status,
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation { .. })
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    pub fn is_service(&self) -> bool {
        matches!(self, ApiError::Service { .. })
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
