//! Backend error types.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Errors from a single inference call.
///
/// Every variant is recovered per record by the caller; the category from
/// [`DispatchError::kind`] only feeds logging.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The per-call timeout elapsed before the response was fully read.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// HTTP transport error (connection refused, reset, body read failure).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend returned a non-success status code, 429 included.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The response body is not the provider's envelope.
    #[error("malformed response envelope: {0}")]
    MalformedEnvelope(String),

    /// Success status, but the envelope carried no generated text.
    #[error("backend returned no generated text")]
    EmptyResponse,
}

/// Coarse failure category of a [`DispatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The backend could not be reached, or its reply could not be read.
    Transport,
    /// The backend was reached but refused the request.
    BackendStatus,
    /// The backend accepted the request but produced nothing.
    EmptyResponse,
}

impl FaultKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::BackendStatus => "backend_status",
            Self::EmptyResponse => "empty_response",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DispatchError {
    #[must_use]
    pub const fn kind(&self) -> FaultKind {
        match self {
            Self::Timeout(_) | Self::Transport(_) | Self::MalformedEnvelope(_) => {
                FaultKind::Transport
            }
            Self::Status { .. } => FaultKind::BackendStatus,
            Self::EmptyResponse => FaultKind::EmptyResponse,
        }
    }

    /// Map a reqwest error, keeping timeouts distinct from other transport faults.
    pub(crate) fn from_transport(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Transport(error)
        }
    }
}

/// Errors raised while selecting and building a backend, before any record
/// is dispatched.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The configured identifier has no registered variant.
    #[error("unknown backend: {0}")]
    UnknownBackend(String),

    /// The selected backend has no endpoint or credential.
    #[error("backend '{backend}' is not configured: set {section}.url and {section}.api_key")]
    NotConfigured {
        backend: &'static str,
        section: &'static str,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
