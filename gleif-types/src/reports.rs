//! Report envelopes produced by the orchestrator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::LegalEntity;
use crate::error::GleifError;

/// Why a raw record did not produce an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SkipReason {
    /// The item was not a JSON object.
    NotAnObject,
    /// `attributes.lei` was missing, empty or not a string.
    MissingId,
    /// A structural part of the record had an unexpected type.
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("record is not an object"),
            Self::MissingId => f.write_str("record has no identifier"),
            Self::Malformed(detail) => write!(f, "malformed record: {detail}"),
        }
    }
}

/// A raw record that was dropped, with its position in the fetched sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Zero-based index across all fetched items.
    pub position: usize,
    /// Why it was dropped.
    pub reason: SkipReason,
}

/// Why a pagination loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PageStop {
    /// The last-page signal marked the current page as final.
    #[default]
    LastPage,
    /// A page had no `data` collection or an empty one.
    EmptyPage,
    /// The request gate refused to issue another request.
    BudgetExhausted,
    /// A request or response failed; earlier items were kept.
    Failed,
}

impl fmt::Display for PageStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LastPage => "last page",
            Self::EmptyPage => "empty page",
            Self::BudgetExhausted => "budget exhausted",
            Self::Failed => "failed",
        })
    }
}

/// Outcome of one search call.
///
/// Degraded outcomes (failed pages, skipped records, exhausted enrichment)
/// are reported here rather than as errors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchReport {
    /// Normalized entities in server order.
    pub entities: Vec<LegalEntity>,
    /// Raw records that were dropped.
    pub skipped: Vec<SkippedRecord>,
    /// Non-fatal failures from pagination and enrichment.
    pub warnings: Vec<GleifError>,
    /// Number of primary page requests issued.
    pub pages_fetched: u32,
    /// Why the primary pagination ended.
    pub stop: PageStop,
    /// Enrichment budget left at the end, when enrichment was requested.
    pub enrichment_budget_remaining: Option<u32>,
}

impl SearchReport {
    /// True when every fetched page succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stop != PageStop::Failed
    }
}
