//! Resilient search over the GLEIF legal-entity registry.
//!
//! Overview
//! - Drives the paginated `lei-records` resource page by page through a
//!   pluggable [`HttpTransport`](gleif_core::HttpTransport).
//! - Retries rate-limited and transient server responses with exponential
//!   backoff, per request.
//! - Normalizes each raw record into a flat [`LegalEntity`].
//! - Optionally enriches results with BIC and ISIN identifiers, walking each
//!   record's linked-instruments resource under a request budget shared by
//!   the whole search call.
//! - Snapshots the registry's reference-data lookup tables.
//!
//! Key behaviors and trade-offs
//! - Everything is sequential: one page, one record, one enrichment page at a
//!   time. Suspension only happens during backoff and the request itself.
//! - Partial results are a normal outcome. A failed page stops pagination but
//!   keeps what was collected; failures land in [`SearchReport::warnings`].
//! - Only invalid input is an error, and it is raised before any request
//!   (see [`SearchQuery::builder`] and [`Gleif::search_entities`]).
//! - The enrichment budget bounds total sub-requests, so later records in a
//!   large result set may come back without ISINs. BICs carried on the record
//!   itself are always included.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use gleif::{Gleif, SearchMode, SearchQuery};
//! use gleif_reqwest::ReqwestTransport;
//!
//! let gleif = Gleif::builder()
//!     .with_transport(Arc::new(ReqwestTransport::new_default()?))
//!     .enrichment_budget(50)
//!     .build()?;
//!
//! let query = SearchQuery::builder("Citibank")
//!     .mode(SearchMode::FullText)
//!     .country("gb")
//!     .include_instruments(true)
//!     .build()?;
//! let report = gleif.search(&query).await?;
//! for entity in &report.entities {
//!     println!("{} {:?}", entity.id, entity.name);
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
/// Enrichment sub-fetcher for BIC/ISIN identifiers.
pub mod enrich;
/// Pagination driver.
pub mod pages;
/// Reference-data snapshots.
pub mod reference;
/// Backoff-retrying requester.
pub mod retry;
/// Search orchestration.
pub mod search;

pub use core::{Gleif, GleifBuilder};
pub use enrich::{Enrichment, EnrichmentStop};
pub use pages::{PageRun, Pager};
pub use retry::Requester;

pub use gleif_core::{
    Address, DEFAULT_BASE_URL, EnrichmentBudget, Extraction, GleifConfig, GleifError,
    HttpResponse, HttpTransport, Instrument, InstrumentKind, LegalEntity, MAX_SEARCH_PAGE_SIZE,
    PageStop, ReferenceFailure, ReferenceKind, ReferenceReport, ReferenceSnapshot, RetryConfig,
    SearchMode, SearchQuery, SearchQueryBuilder, SearchReport, SkipReason, SkippedRecord,
    TRANSIENT_STATUS_CODES,
};
