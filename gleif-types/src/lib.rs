//! Registry-specific data transfer objects, configuration primitives and the
//! unified error type shared by every crate in the gleif workspace.
#![warn(missing_docs)]

mod config;
mod entity;
mod error;
mod query;
mod reference;
mod reports;

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, GleifConfig, MAX_SEARCH_PAGE_SIZE, RetryConfig,
    TRANSIENT_STATUS_CODES, is_transient_status,
};
pub use entity::{Address, Instrument, InstrumentKind, LegalEntity};
pub use error::GleifError;
pub use query::{COUNTRY_CODE_LENGTH, SearchMode, SearchQuery, SearchQueryBuilder, VALID_SEARCH_MODES};
pub use reference::{ReferenceFailure, ReferenceKind, ReferenceReport, ReferenceSnapshot};
pub use reports::{PageStop, SearchReport, SkipReason, SkippedRecord};
