//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nav_core::NavError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Requested url failed sanitation.
    #[error("Invalid url: {0}")]
    InvalidUrl(String),

    /// Query string could not be parsed.
    #[error("Invalid query for {url}: {message}")]
    InvalidQuery {
        /// Requested url.
        url: String,
        /// Parser message.
        message: String,
    },

    /// Navigation failure for a url.
    #[error("{source}")]
    Nav {
        /// Requested url.
        url: String,
        /// Underlying error.
        source: NavError,
    },

    /// Traversal did not finish before the deadline.
    #[error("Navigation for {url} timed out after {timeout_ms}ms")]
    Timeout {
        /// Requested url.
        url: String,
        /// Deadline in milliseconds.
        timeout_ms: u128,
    },

    /// Blocking task panicked or was aborted.
    #[error("Navigation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ServerError {
    /// Attach the requested url to a navigation error.
    pub(crate) fn nav(source: NavError, url: &str) -> Self {
        Self::Nav {
            url: url.to_owned(),
            source,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidUrl(_) | Self::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            Self::Nav { source, .. } => match source {
                NavError::NodeNotFound { .. } => StatusCode::NOT_FOUND,
                NavError::InvalidDepth(_) => StatusCode::BAD_REQUEST,
                NavError::Cancelled => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn url(&self) -> Option<&str> {
        match self {
            Self::InvalidUrl(url)
            | Self::InvalidQuery { url, .. }
            | Self::Nav { url, .. }
            | Self::Timeout { url, .. } => Some(url),
            Self::Join(_) => None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Navigation request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Navigation request rejected");
        }

        let body = json!({"error": self.to_string(), "url": self.url()});
        (status, axum::Json(body)).into_response()
    }
}
