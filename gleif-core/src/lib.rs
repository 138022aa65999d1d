//! gleif-core
//!
//! Contracts and pure building blocks shared across the gleif workspace.
//!
//! - `transport`: the `HttpTransport` capability the orchestrator drives.
//! - `pagination`: the last-page rule and page-item access for JSON:API bodies.
//! - `extract`: maps one raw registry record into a [`LegalEntity`].
//! - `budget`: the shared counter bounding enrichment sub-requests.
//!
//! Nothing here performs I/O on its own; the `gleif` crate composes these
//! pieces with a transport into the search pipeline.
#![warn(missing_docs)]

/// Enrichment request budget shared across one search call.
pub mod budget;
/// Raw record → normalized entity.
pub mod extract;
/// Pagination metadata and page bodies.
pub mod pagination;
/// HTTP transport capability.
pub mod transport;

pub use budget::EnrichmentBudget;
pub use extract::{Extraction, extract_entity};
pub use pagination::{LastPage, PaginationSignal, page_items};
pub use transport::{HttpResponse, HttpTransport, QueryParams};

pub use gleif_types::*;
