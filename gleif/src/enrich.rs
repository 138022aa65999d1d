use std::fmt;

use gleif_core::{EnrichmentBudget, GleifError, Instrument, PageStop};
use serde_json::Value;

use crate::core::Gleif;
use crate::pages::fetch_pages_gated;

/// How the linked-instruments walk for one record ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentStop {
    /// The record carries no linked-instruments link.
    NoLink,
    /// Every page was fetched.
    Completed,
    /// The shared budget ran out before the next sub-request.
    BudgetExhausted,
    /// A sub-request failed; ISINs gathered before it were kept.
    Failed,
}

impl fmt::Display for EnrichmentStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoLink => "no link",
            Self::Completed => "completed",
            Self::BudgetExhausted => "budget exhausted",
            Self::Failed => "failed",
        })
    }
}

/// Identifiers gathered for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    /// ISINs in server order followed by BICs; `None` when nothing was found.
    pub instruments: Option<Vec<Instrument>>,
    /// How the ISIN walk ended.
    pub stop: EnrichmentStop,
    /// The failure behind `EnrichmentStop::Failed`.
    pub error: Option<GleifError>,
    /// Sub-requests issued for this record.
    pub requests: u32,
}

/// BIC codes carried on the record itself, as a string or an array of strings.
fn record_bics(raw: &Value) -> Vec<Instrument> {
    let bic = raw.pointer("/attributes/bic");
    let values: Vec<&str> = match bic {
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::Array(xs)) => xs.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    values
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Instrument::bic)
        .collect()
}

fn isins_link(raw: &Value) -> Option<&str> {
    raw.pointer("/relationships/isins/links/related")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn isin_of(item: &Value) -> Option<Instrument> {
    item.pointer("/attributes/isin")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(Instrument::isin)
}

impl Gleif {
    /// Gather instrument identifiers for one raw record.
    ///
    /// Behavior and trade-offs:
    /// - BICs on the record are always included and cost nothing.
    /// - The linked-instruments resource is paged like a search; one unit of
    ///   `budget` is taken before each sub-request. An empty budget stops the
    ///   walk without a request, so a record may end up with BICs only.
    /// - A failed sub-request keeps the ISINs gathered so far and never fails
    ///   the caller; the error is returned on [`Enrichment::error`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gleif::enrich",
            skip(self, raw, budget),
            fields(remaining = budget.remaining()),
        )
    )]
    pub async fn enrich(&self, raw: &Value, budget: &EnrichmentBudget) -> Enrichment {
        let mut instruments = Vec::new();
        let mut requests = 0;
        let mut error = None;

        let stop = match isins_link(raw) {
            None => EnrichmentStop::NoLink,
            Some(link) => match self.resolve_link(link) {
                Err(e) => {
                    error = Some(e);
                    EnrichmentStop::Failed
                }
                Ok(url) => {
                    let run = fetch_pages_gated(
                        &self.requester(),
                        &url,
                        &[],
                        self.cfg.instrument_page_size,
                        || budget.try_consume(),
                    )
                    .await;
                    requests = run.pages_fetched;
                    instruments.extend(run.items.iter().filter_map(isin_of));
                    match run.stop {
                        PageStop::BudgetExhausted => EnrichmentStop::BudgetExhausted,
                        PageStop::Failed => {
                            error = run.error;
                            EnrichmentStop::Failed
                        }
                        _ => EnrichmentStop::Completed,
                    }
                }
            },
        };

        #[cfg(feature = "tracing")]
        match stop {
            EnrichmentStop::BudgetExhausted => tracing::info!(
                isins = instruments.len(),
                "budget exhausted; skipping further instrument lookups"
            ),
            EnrichmentStop::Failed => tracing::warn!(
                isins = instruments.len(),
                error = ?error,
                "instrument lookup failed; keeping ISINs gathered so far"
            ),
            _ => {}
        }

        instruments.extend(record_bics(raw));
        Enrichment {
            instruments: (!instruments.is_empty()).then_some(instruments),
            stop,
            error,
            requests,
        }
    }
}
