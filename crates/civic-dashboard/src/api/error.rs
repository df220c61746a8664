//! Gateway error type and response classification.

use civic_api_models::ErrorBody;
use reqwest::{Response, StatusCode};
use thiserror::Error;

/// Convenience alias for gateway results.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure raised by a gateway call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or non-success response.
    #[error("request to {endpoint} failed: {message}")]
    RequestFailed {
        /// Endpoint path relative to the API base.
        endpoint: String,
        /// HTTP status, absent when no response arrived.
        status: Option<u16>,
        /// Backend detail when provided, otherwise a transport description.
        message: String,
    },
    /// Endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint path '{path}'")]
    InvalidEndpoint {
        /// Offending path.
        path: String,
        /// URL parser failure.
        #[source]
        source: url::ParseError,
    },
    /// HTTP client could not be constructed.
    #[error("failed to configure HTTP client: {message}")]
    ClientSetup {
        /// Builder failure description.
        message: String,
    },
}

impl ApiError {
    /// HTTP status of the failed response, if one arrived.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            Self::InvalidEndpoint { .. } | Self::ClientSetup { .. } => None,
        }
    }

    /// Message suitable for showing to an operator.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::RequestFailed { message, .. } => message.clone(),
            Self::InvalidEndpoint { .. } | Self::ClientSetup { .. } => self.to_string(),
        }
    }

    /// Message to surface for a failed write, or `fallback` when blank.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        let message = self.message();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }

    /// Whether the backend answered with a 4xx status.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        self.status().is_some_and(|status| (400..500).contains(&status))
    }

    pub(crate) fn transport(endpoint: &str, err: &reqwest::Error) -> Self {
        Self::RequestFailed {
            endpoint: endpoint.to_string(),
            status: err.status().map(|status| status.as_u16()),
            message: err.to_string(),
        }
    }

    pub(crate) fn decode(endpoint: &str, status: StatusCode, err: &reqwest::Error) -> Self {
        Self::RequestFailed {
            endpoint: endpoint.to_string(),
            status: Some(status.as_u16()),
            message: format!("failed to parse response: {err}"),
        }
    }
}

/// Turn a non-success response into an [`ApiError`].
pub(crate) async fn classify_failure(endpoint: &str, response: Response) -> ApiError {
    let status = response.status();
    let bytes = response.bytes().await.unwrap_or_default();
    let body_text = String::from_utf8_lossy(&bytes).trim().to_string();

    let message = serde_json::from_slice::<ErrorBody>(&bytes)
        .ok()
        .and_then(|body| body.message())
        .unwrap_or_else(|| {
            if body_text.is_empty() {
                format!("request failed with status {status}")
            } else {
                body_text
            }
        });

    ApiError::RequestFailed {
        endpoint: endpoint.to_string(),
        status: Some(status.as_u16()),
        message,
    }
}
