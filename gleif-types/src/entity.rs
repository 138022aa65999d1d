//! Normalized output schema.

use serde::{Deserialize, Serialize};

/// One legal entity in flat, stable form.
///
/// Serializes with the field names downstream consumers expect
/// (`legal_entity_id`, `legal_entity_name`, `country_of_jurisdiction`, ...).
/// `tickers_and_instruments` is omitted when enrichment was not requested or
/// found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalEntity {
    /// Registry identifier (LEI). Never empty.
    #[serde(rename = "legal_entity_id")]
    pub id: String,
    /// Legal name.
    #[serde(rename = "legal_entity_name")]
    pub name: Option<String>,
    /// Legal-address region (ISO 3166-2).
    pub region: Option<String>,
    /// Legal-address country (ISO 3166-1 alpha-2).
    pub country: Option<String>,
    /// Registration jurisdiction, or the legal-address country when absent.
    #[serde(rename = "country_of_jurisdiction")]
    pub jurisdiction: Option<String>,
    /// Legal address; absent when the source carried no usable line.
    pub address: Option<Address>,
    /// Linked identifiers: ISINs in server order followed by BICs.
    #[serde(
        rename = "tickers_and_instruments",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub instruments: Option<Vec<Instrument>>,
}

impl LegalEntity {
    /// Entity carrying only its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            region: None,
            country: None,
            jurisdiction: None,
            address: None,
            instruments: None,
        }
    }
}

/// Structured legal address. Only non-empty fields are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// First address line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// Additional address line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional: Option<String>,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.additional.is_none()
            && self.city.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
    }
}

/// Kind of linked financial identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// Business Identifier Code (ISO 9362).
    #[serde(rename = "BIC")]
    Bic,
    /// International Securities Identification Number (ISO 6166).
    #[serde(rename = "ISIN")]
    Isin,
}

/// A linked identifier attached during enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    /// Identifier kind.
    #[serde(rename = "type")]
    pub kind: InstrumentKind,
    /// Identifier value.
    pub value: String,
}

impl Instrument {
    /// ISIN entry.
    pub fn isin(value: impl Into<String>) -> Self {
        Self {
            kind: InstrumentKind::Isin,
            value: value.into(),
        }
    }

    /// BIC entry.
    pub fn bic(value: impl Into<String>) -> Self {
        Self {
            kind: InstrumentKind::Bic,
            value: value.into(),
        }
    }
}
