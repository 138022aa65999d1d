//! Configuration types shared by the orchestrator and transports.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Registry API root.
pub const DEFAULT_BASE_URL: &str = "https://api.gleif.org/api/v1";

/// User agent sent by the production transport.
pub const DEFAULT_USER_AGENT: &str = concat!("gleif-rs/", env!("CARGO_PKG_VERSION"));

/// Status codes treated as rate limiting or transient server failure.
pub const TRANSIENT_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

/// Server-imposed cap on `page[size]` for the search resource.
pub const MAX_SEARCH_PAGE_SIZE: u32 = 100;

/// Returns true if `status` is in [`TRANSIENT_STATUS_CODES`].
#[must_use]
pub fn is_transient_status(status: u16) -> bool {
    TRANSIENT_STATUS_CODES.contains(&status)
}

/// Exponential backoff for a single logical GET.
///
/// The delay before retry `n` (0-indexed) is `backoff_base * 2^n`, plus up to
/// `jitter_percent` of that value when jitter is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt. Zero disables retrying.
    pub max_retries: u32,
    /// Base delay scaled by `2^attempt`.
    pub backoff_base: Duration,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl RetryConfig {
    /// A configuration that never retries.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            max_retries: 0,
            backoff_base: Duration::ZERO,
            jitter_percent: 0,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base: Duration::from_millis(500),
            jitter_percent: 0,
        }
    }
}

/// Global configuration for the `Gleif` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GleifConfig {
    /// API root, without trailing slash.
    pub base_url: String,
    /// Timeout applied to every individual request.
    pub request_timeout: Duration,
    /// Retry/backoff policy for every GET.
    pub retry: RetryConfig,
    /// Items per page for the search resource (capped at [`MAX_SEARCH_PAGE_SIZE`]).
    pub search_page_size: u32,
    /// Items per page for reference-data resources.
    pub reference_page_size: u32,
    /// Items per page for linked-instrument resources.
    pub instrument_page_size: u32,
    /// Sub-requests available to enrichment per search call.
    pub enrichment_budget: u32,
}

impl Default for GleifConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
            search_page_size: MAX_SEARCH_PAGE_SIZE,
            reference_page_size: 200,
            instrument_page_size: 200,
            enrichment_budget: 20,
        }
    }
}
