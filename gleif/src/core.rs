use std::sync::Arc;
use std::time::Duration;

use gleif_core::{GleifConfig, GleifError, HttpTransport, MAX_SEARCH_PAGE_SIZE, RetryConfig};
use url::Url;

use crate::retry::Requester;

/// Orchestrator that drives searches, enrichment and reference snapshots over
/// one transport.
pub struct Gleif {
    pub(crate) transport: Arc<dyn HttpTransport>,
    pub(crate) cfg: GleifConfig,
}

/// Builder for constructing a `Gleif` orchestrator with custom configuration.
pub struct GleifBuilder {
    transport: Option<Arc<dyn HttpTransport>>,
    cfg: GleifConfig,
}

impl Default for GleifBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GleifBuilder {
    /// Create a new builder with the public registry defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts without a transport; you must provide one via [`with_transport`](Self::with_transport).
    /// - Defaults follow the public API: 10s per request, 3 retries with a 500ms
    ///   base delay and no jitter, search pages of 100 and an enrichment budget
    ///   of 20 sub-requests per search.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transport: None,
            cfg: GleifConfig::default(),
        }
    }

    /// Set the transport every request goes through.
    #[must_use]
    pub fn with_transport(mut self, t: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(t);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: GleifConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the API root. A trailing slash is dropped.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.cfg.base_url = url.into();
        self
    }

    /// Set the timeout applied to every individual request.
    ///
    /// Behavior and trade-offs:
    /// - Bounds each attempt, not the whole logical GET. A request that keeps
    ///   timing out costs up to `(max_retries + 1) * timeout` plus backoff.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = timeout;
        self
    }

    /// Replace the retry policy.
    #[must_use]
    pub const fn retry(mut self, retry: RetryConfig) -> Self {
        self.cfg.retry = retry;
        self
    }

    /// Set the number of retries after the first attempt.
    ///
    /// Behavior and trade-offs:
    /// - Zero disables retrying; transient statuses then surface on the first
    ///   response.
    #[must_use]
    pub const fn max_retries(mut self, n: u32) -> Self {
        self.cfg.retry.max_retries = n;
        self
    }

    /// Set the base backoff delay (doubled per attempt).
    #[must_use]
    pub const fn backoff_base(mut self, base: Duration) -> Self {
        self.cfg.retry.backoff_base = base;
        self
    }

    /// Add up to `percent` random jitter to each backoff delay.
    ///
    /// Behavior and trade-offs:
    /// - Spreads retries from concurrent clients at the cost of
    ///   non-deterministic timing. Values above 100 are rejected by `build`.
    #[must_use]
    pub const fn jitter_percent(mut self, percent: u8) -> Self {
        self.cfg.retry.jitter_percent = percent;
        self
    }

    /// Set the search page size. Values above the server cap of 100 are clamped.
    #[must_use]
    pub fn search_page_size(mut self, size: u32) -> Self {
        self.cfg.search_page_size = size.min(MAX_SEARCH_PAGE_SIZE);
        self
    }

    /// Set the page size for reference-data resources.
    #[must_use]
    pub const fn reference_page_size(mut self, size: u32) -> Self {
        self.cfg.reference_page_size = size;
        self
    }

    /// Set the page size for linked-instrument resources.
    #[must_use]
    pub const fn instrument_page_size(mut self, size: u32) -> Self {
        self.cfg.instrument_page_size = size;
        self
    }

    /// Set the number of enrichment sub-requests available per search call.
    ///
    /// Behavior and trade-offs:
    /// - Each page of a linked-instruments resource costs one unit, so a record
    ///   with many ISINs can consume several.
    /// - Once spent, remaining records keep their BICs but get no ISINs.
    #[must_use]
    pub const fn enrichment_budget(mut self, units: u32) -> Self {
        self.cfg.enrichment_budget = units;
        self
    }

    /// Build the orchestrator.
    ///
    /// The search page size is capped at [`MAX_SEARCH_PAGE_SIZE`] however it
    /// was set.
    ///
    /// # Errors
    /// Returns `GleifError::InvalidArg` when no transport was set, the base URL
    /// does not parse, a page size is zero or the jitter exceeds 100%.
    pub fn build(mut self) -> Result<Gleif, GleifError> {
        let Some(transport) = self.transport else {
            return Err(GleifError::invalid_arg("no transport configured"));
        };
        let trimmed = self.cfg.base_url.trim_end_matches('/').to_string();
        Url::parse(&trimmed)
            .map_err(|e| GleifError::invalid_arg(format!("base url '{trimmed}': {e}")))?;
        self.cfg.base_url = trimmed;
        self.cfg.search_page_size = self.cfg.search_page_size.min(MAX_SEARCH_PAGE_SIZE);
        if self.cfg.search_page_size == 0
            || self.cfg.reference_page_size == 0
            || self.cfg.instrument_page_size == 0
        {
            return Err(GleifError::invalid_arg("page sizes must be positive"));
        }
        if self.cfg.retry.jitter_percent > 100 {
            return Err(GleifError::invalid_arg("jitter_percent must be within 0..=100"));
        }
        Ok(Gleif {
            transport,
            cfg: self.cfg,
        })
    }
}

impl Gleif {
    /// Start building a new `Gleif` instance.
    #[must_use]
    pub fn builder() -> GleifBuilder {
        GleifBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &GleifConfig {
        &self.cfg
    }

    /// Absolute URL of `path` under the API root.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.cfg.base_url, path.trim_start_matches('/'))
    }

    /// Requester bound to this instance's transport and retry policy.
    #[must_use]
    pub fn requester(&self) -> Requester<'_> {
        Requester::new(
            self.transport.as_ref(),
            self.cfg.request_timeout,
            self.cfg.retry,
        )
    }

    /// Resolve a link found in a response body against the API root.
    ///
    /// Absolute links are returned unchanged; relative ones are joined onto
    /// the base URL.
    pub(crate) fn resolve_link(&self, link: &str) -> Result<String, GleifError> {
        if let Ok(abs) = Url::parse(link) {
            return Ok(abs.into());
        }
        let base = Url::parse(&format!("{}/", self.cfg.base_url))
            .map_err(|e| GleifError::data(format!("base url: {e}")))?;
        base.join(link.trim_start_matches('/'))
            .map(Into::into)
            .map_err(|e| GleifError::data(format!("link '{link}': {e}")))
    }
}
