//! gleif-reqwest
//!
//! Production [`HttpTransport`] on top of `reqwest`. Every HTTP status is
//! returned as a response; only failures without a status (connect, TLS,
//! timeout, body read) become errors. Retrying is left to the orchestrator.
#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use gleif_core::{DEFAULT_USER_AGENT, GleifError, HttpResponse, HttpTransport};

/// Transport backed by a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Name used when attributing transport errors.
    pub const NAME: &'static str = "gleif-reqwest";

    /// Transport with a default client sending [`DEFAULT_USER_AGENT`].
    ///
    /// # Errors
    /// Returns `GleifError::Connector` if the TLS backend cannot be initialized.
    pub fn new_default() -> Result<Self, GleifError> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| GleifError::connector(Self::NAME, e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap a preconfigured client (proxies, custom TLS, connection limits).
    #[must_use]
    pub const fn new_with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn map_error(e: &reqwest::Error, url: &str) -> GleifError {
        if e.is_timeout() {
            GleifError::request_timeout(url)
        } else {
            GleifError::connector(Self::NAME, e.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "gleif_reqwest::get", skip(self, query, timeout))
    )]
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, GleifError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::map_error(&e, url))?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(|e| Self::map_error(&e, url))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(status, bytes = body.len(), "response received");
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
