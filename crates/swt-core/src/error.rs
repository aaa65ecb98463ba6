//! Grader error types.
//!
//! Remote graders return these wrapped in `anyhow::Error`. The grading
//! engine downcasts them to decide how to log a fallback.

use thiserror::Error;

/// Errors that can occur when calling a remote AI grader.
#[derive(Debug, Error)]
pub enum GraderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// No API key is configured for the provider.
    #[error("no API key configured for provider '{0}'")]
    MissingCredential(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The model answered, but not with a usable assessment.
    #[error("malformed assessment: {0}")]
    MalformedAssessment(String),
}

impl GraderError {
    /// Configuration problems that will fail again on every call.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            GraderError::AuthenticationFailed(_)
                | GraderError::MissingCredential(_)
                | GraderError::ModelNotFound(_)
        )
    }
}
