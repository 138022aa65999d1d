//! Validated search input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GleifError;

/// Recognized textual search modes.
pub const VALID_SEARCH_MODES: [&str; 2] = ["name", "fulltext"];

/// Required length of a country filter (ISO 3166-1 alpha-2).
pub const COUNTRY_CODE_LENGTH: usize = 2;

/// Which field of the search resource the query text is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SearchMode {
    /// Match the legal entity name only.
    #[default]
    #[serde(rename = "name")]
    NameOnly,
    /// Match across the whole record (names, addresses, metadata).
    #[serde(rename = "fulltext")]
    FullText,
}

impl SearchMode {
    /// Textual name as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameOnly => "name",
            Self::FullText => "fulltext",
        }
    }

    /// Filter field on the search resource for this mode.
    #[must_use]
    pub const fn filter_field(self) -> &'static str {
        match self {
            Self::NameOnly => "entity.legalName",
            Self::FullText => "fulltext",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = GleifError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::NameOnly),
            "fulltext" => Ok(Self::FullText),
            _ => Err(GleifError::invalid_arg(format!(
                "invalid search mode '{s}', must be one of: {}",
                VALID_SEARCH_MODES.join(", ")
            ))),
        }
    }
}

/// Immutable, validated search request.
///
/// Construct through [`SearchQuery::builder`]; a value of this type always
/// has non-empty text and, if present, a two-character upper-case country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    text: String,
    mode: SearchMode,
    country: Option<String>,
    include_instruments: bool,
}

impl SearchQuery {
    /// Name-mode query without country filter or enrichment.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `text` is empty.
    pub fn new(text: impl Into<String>) -> Result<Self, GleifError> {
        Self::builder(text).build()
    }

    /// Start building a query for `text`.
    pub fn builder(text: impl Into<String>) -> SearchQueryBuilder {
        SearchQueryBuilder {
            text: text.into(),
            mode: SearchMode::default(),
            country: None,
            include_instruments: false,
        }
    }

    /// Query text as given by the caller.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Selected search mode.
    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Upper-cased country filter, if any.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Whether BIC/ISIN enrichment was requested.
    #[must_use]
    pub const fn include_instruments(&self) -> bool {
        self.include_instruments
    }
}

/// Builder for [`SearchQuery`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
#[must_use]
pub struct SearchQueryBuilder {
    text: String,
    mode: SearchMode,
    country: Option<String>,
    include_instruments: bool,
}

impl SearchQueryBuilder {
    /// Select the search mode.
    pub const fn mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Restrict results to a legal-address country (two characters, any case).
    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.country = Some(code.into());
        self
    }

    /// Set or clear the country filter from an optional value.
    pub fn country_opt(mut self, code: Option<impl Into<String>>) -> Self {
        self.country = code.map(Into::into);
        self
    }

    /// Request BIC/ISIN enrichment for every result.
    pub const fn include_instruments(mut self, yes: bool) -> Self {
        self.include_instruments = yes;
        self
    }

    /// Validate and produce the query.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the text is empty or whitespace, or when a
    /// country filter is present but not exactly two characters long.
    pub fn build(self) -> Result<SearchQuery, GleifError> {
        if self.text.trim().is_empty() {
            return Err(GleifError::invalid_arg("query must be a non-empty string"));
        }
        let country = match self.country {
            Some(code) if code.chars().count() != COUNTRY_CODE_LENGTH => {
                return Err(GleifError::invalid_arg(format!(
                    "invalid country code '{code}', must be a {COUNTRY_CODE_LENGTH}-letter ISO country code"
                )));
            }
            Some(code) => Some(code.to_uppercase()),
            None => None,
        };
        Ok(SearchQuery {
            text: self.text,
            mode: self.mode,
            country,
            include_instruments: self.include_instruments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("name".parse::<SearchMode>().unwrap(), SearchMode::NameOnly);
        assert_eq!("FullText".parse::<SearchMode>().unwrap(), SearchMode::FullText);
    }

    #[test]
    fn unknown_mode_is_invalid_arg() {
        let err = "fuzzy".parse::<SearchMode>().unwrap_err();
        assert!(err.is_validation(), "unexpected: {err:?}");
    }

    #[test]
    fn filter_fields_follow_mode() {
        assert_eq!(SearchMode::NameOnly.filter_field(), "entity.legalName");
        assert_eq!(SearchMode::FullText.filter_field(), "fulltext");
    }

    #[test]
    fn country_is_upper_cased() {
        let q = SearchQuery::builder("Citibank").country("gb").build().unwrap();
        assert_eq!(q.country(), Some("GB"));
    }

    #[test]
    fn country_length_is_enforced() {
        for bad in ["", "G", "GBR"] {
            let err = SearchQuery::builder("Citibank")
                .country(bad)
                .build()
                .unwrap_err();
            assert!(err.is_validation(), "{bad:?} -> {err:?}");
        }
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(SearchQuery::new("").is_err());
        assert!(SearchQuery::new("   ").is_err());
    }
}
