use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::GleifError;

/// Ordered query parameters. Order is preserved on the wire.
pub type QueryParams = Vec<(String, String)>;

/// Status and raw body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: u16,
    body: Vec<u8>,
}

impl HttpResponse {
    /// Build a response from a status and raw body bytes.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Build a response whose body is `value` serialized as JSON.
    #[must_use]
    pub fn from_json(status: u16, value: &Value) -> Self {
        Self::new(status, value.to_string())
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    /// Returns `GleifError::Data` when the body is not valid JSON.
    pub fn json(&self) -> Result<Value, GleifError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| GleifError::data(format!("invalid json body: {e}")))
    }
}

/// HTTP GET capability used by the orchestrator.
///
/// Implementations return every status as `Ok`, including 4xx/5xx; `Err` is
/// reserved for failures where no status exists (connection, TLS, timeout).
/// Retrying is the caller's concern.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Transport name used in error attribution.
    fn name(&self) -> &'static str;

    /// Issue a GET for `url` with `query` appended, bounded by `timeout`.
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, GleifError>;
}
