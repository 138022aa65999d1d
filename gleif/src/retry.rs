use std::time::Duration;

use gleif_core::{GleifError, HttpResponse, HttpTransport, RetryConfig, is_transient_status};
use rand::Rng;

/// Delay before retry `attempt` (0-indexed): `backoff_base * 2^attempt`,
/// plus jitter when configured.
#[must_use]
pub fn backoff_delay(retry: &RetryConfig, attempt: u32) -> Duration {
    let base_ms = u64::try_from(retry.backoff_base.as_millis()).unwrap_or(u64::MAX);
    let scaled = base_ms.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(jitter_wait(scaled, retry.jitter_percent))
}

/// `base_ms` plus a random share of up to `jitter_percent` of it.
pub(crate) fn jitter_wait(base_ms: u64, jitter_percent: u8) -> u64 {
    if jitter_percent == 0 || base_ms == 0 {
        return base_ms;
    }
    let range = std::cmp::max(1, base_ms.saturating_mul(u64::from(jitter_percent)) / 100);
    base_ms.saturating_add(rand::rng().random_range(0..range))
}

/// Single logical GET with bounded retry on transient statuses.
///
/// Behavior and trade-offs:
/// - Statuses outside [`TRANSIENT_STATUS_CODES`](gleif_core::TRANSIENT_STATUS_CODES)
///   are returned as-is on the first response, including 4xx.
/// - A transient status is retried up to `max_retries` times; when retries run
///   out the last response is returned, not an error. Callers check the status.
/// - Transport failures (no status available) are returned immediately.
/// - The attempt counter lives in one `get` call; nothing is shared between calls.
#[derive(Clone, Copy)]
pub struct Requester<'a> {
    transport: &'a dyn HttpTransport,
    timeout: Duration,
    retry: RetryConfig,
}

impl<'a> Requester<'a> {
    /// Bind a transport to a timeout and retry policy.
    #[must_use]
    pub fn new(transport: &'a dyn HttpTransport, timeout: Duration, retry: RetryConfig) -> Self {
        Self {
            transport,
            timeout,
            retry,
        }
    }

    /// Retry policy in use.
    #[must_use]
    pub const fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Issue the GET, retrying transient statuses with exponential backoff.
    ///
    /// # Errors
    /// Returns the transport's error when a request fails without a status.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gleif::retry::get",
            skip(self, query),
            fields(transport = self.transport.name()),
        )
    )]
    pub async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<HttpResponse, GleifError> {
        let mut attempt: u32 = 0;
        loop {
            let resp = self.transport.get(url, query, self.timeout).await?;
            let status = resp.status();
            if !is_transient_status(status) || attempt >= self.retry.max_retries {
                return Ok(resp);
            }
            let delay = backoff_delay(&self.retry, attempt);
            #[cfg(feature = "tracing")]
            tracing::warn!(
                status,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                attempt = attempt + 1,
                max_retries = self.retry.max_retries,
                "transient status; backing off"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
