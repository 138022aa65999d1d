use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the gleif workspace.
///
/// Only `InvalidArg` is ever returned from a search; every other variant is
/// recorded as a warning on the report and degrades completeness instead.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GleifError {
    /// Invalid caller input, raised before any network activity.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The registry answered with a non-success status (after retries, if any).
    #[error("http status {status} from {url}")]
    Http {
        /// Final HTTP status code.
        status: u16,
        /// URL that produced the status.
        url: String,
    },

    /// The transport failed before a status was available (DNS, TLS, reset, ...).
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Transport name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A single request exceeded the configured per-request timeout.
    #[error("request timed out: {url}")]
    RequestTimeout {
        /// URL of the request that timed out.
        url: String,
    },

    /// The response body was not JSON or did not have the expected shape.
    #[error("data issue: {0}")]
    Data(String),

    /// Local I/O failure (snapshot files).
    #[error("io error: {0}")]
    Io(String),
}

impl GleifError {
    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Helper: build an `Http` error for a final status code.
    pub fn http(status: u16, url: impl Into<String>) -> Self {
        Self::Http {
            status,
            url: url.into(),
        }
    }

    /// Helper: build a `Connector` error with the transport name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    pub fn request_timeout(url: impl Into<String>) -> Self {
        Self::RequestTimeout { url: url.into() }
    }

    /// Helper: build a `Data` error.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Returns true if this error stems from caller input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArg(_))
    }
}

impl From<serde_json::Error> for GleifError {
    fn from(e: serde_json::Error) -> Self {
        Self::Data(e.to_string())
    }
}

impl From<std::io::Error> for GleifError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
