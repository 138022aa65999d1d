use serde_json::{Map, Value};

use crate::{Address, LegalEntity, SkipReason};

type Object = Map<String, Value>;

/// Result of normalizing one raw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The record produced an entity (without instruments).
    Extracted(LegalEntity),
    /// The record was dropped.
    Skipped(SkipReason),
}

impl Extraction {
    /// The entity, if one was extracted.
    #[must_use]
    pub fn entity(self) -> Option<LegalEntity> {
        match self {
            Self::Extracted(e) => Some(e),
            Self::Skipped(_) => None,
        }
    }

    /// The skip reason, if the record was dropped.
    #[must_use]
    pub const fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Extracted(_) => None,
            Self::Skipped(r) => Some(r),
        }
    }
}

/// Normalize one `lei-records` item.
///
/// Missing (or null) intermediate objects read as empty. A record is skipped
/// when it is not an object, when `attributes.lei` is missing or empty, or
/// when `attributes`, `entity`, `legalAddress` or `registration` is present
/// with a non-object type.
#[must_use]
pub fn extract_entity(raw: &Value) -> Extraction {
    match try_extract(raw) {
        Ok(entity) => Extraction::Extracted(entity),
        Err(reason) => Extraction::Skipped(reason),
    }
}

fn try_extract(raw: &Value) -> Result<LegalEntity, SkipReason> {
    let record = raw.as_object().ok_or(SkipReason::NotAnObject)?;
    let empty = Object::new();

    let attributes = section(record, "attributes", "attributes")?.unwrap_or(&empty);
    let id = text(attributes, "lei").ok_or(SkipReason::MissingId)?;

    let entity = section(attributes, "entity", "attributes.entity")?.unwrap_or(&empty);
    let registration =
        section(attributes, "registration", "attributes.registration")?.unwrap_or(&empty);
    let legal_address = section(entity, "legalAddress", "attributes.entity.legalAddress")?;

    let country = legal_address.and_then(|a| text(a, "country"));
    let jurisdiction = text(registration, "jurisdiction").or_else(|| country.clone());

    Ok(LegalEntity {
        id,
        name: legal_name(entity),
        region: legal_address.and_then(|a| text(a, "region")),
        country,
        jurisdiction,
        address: legal_address.and_then(address),
        instruments: None,
    })
}

/// Child object at `key`; `None` when missing or null.
fn section<'a>(
    parent: &'a Object,
    key: &str,
    path: &str,
) -> Result<Option<&'a Object>, SkipReason> {
    match parent.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(o)) => Ok(Some(o)),
        Some(_) => Err(SkipReason::Malformed(format!("{path} is not an object"))),
    }
}

/// Non-empty string at `key`.
fn text(obj: &Object, key: &str) -> Option<String> {
    obj.get(key).and_then(non_empty)
}

fn non_empty(v: &Value) -> Option<String> {
    v.as_str().filter(|s| !s.trim().is_empty()).map(str::to_string)
}

// `legalName` is `{ "name": .., "language": .. }` on the live API; older
// payloads carry a bare string.
fn legal_name(entity: &Object) -> Option<String> {
    match entity.get("legalName")? {
        Value::Object(o) => text(o, "name"),
        other => non_empty(other),
    }
}

fn address(legal: &Object) -> Option<Address> {
    let lines: Vec<String> = legal
        .get("addressLines")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(non_empty).collect())
        .unwrap_or_default();

    let additional = match legal.get("additionalAddressLine") {
        Some(Value::Array(a)) => a.iter().find_map(non_empty),
        Some(v) => non_empty(v),
        None => None,
    };

    let addr = Address {
        street: text(legal, "firstAddressLine").or_else(|| lines.first().cloned()),
        additional: additional.or_else(|| lines.get(1).cloned()),
        city: text(legal, "city"),
        postal_code: text(legal, "postalCode"),
        country: text(legal, "country"),
    };
    (!addr.is_empty()).then_some(addr)
}
