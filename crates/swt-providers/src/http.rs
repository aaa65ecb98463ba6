//! HTTP plumbing shared by the remote graders.

use std::time::Duration;

use anyhow::Context;

use swt_core::GraderError;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub(crate) fn build_client(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build HTTP client")
}

/// Classify a transport failure.
pub(crate) fn transport_error(e: reqwest::Error, timeout_secs: u64) -> GraderError {
    if e.is_timeout() {
        GraderError::Timeout(timeout_secs)
    } else {
        GraderError::NetworkError(e.to_string())
    }
}

/// Map a non-success status to a [`GraderError`]; pass successful responses through.
///
/// `error_message` pulls the human-readable message out of a provider's
/// error body, if it has the expected shape.
pub(crate) async fn check_status(
    response: reqwest::Response,
    model: &str,
    error_message: fn(&str) -> Option<String>,
) -> Result<reqwest::Response, GraderError> {
    let status = response.status().as_u16();
    if status < 400 {
        return Ok(response);
    }
    if status == 429 {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5)
            * 1000;
        return Err(GraderError::RateLimited {
            retry_after_ms: retry_after,
        });
    }
    if status == 404 {
        return Err(GraderError::ModelNotFound(model.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or(body);
    if status == 401 || status == 403 {
        return Err(GraderError::AuthenticationFailed(message));
    }
    Err(GraderError::ApiError { status, message })
}
