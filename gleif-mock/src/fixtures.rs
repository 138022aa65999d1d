//! JSON:API bodies shaped like the registry's, plus a small demo dataset.

use gleif_core::ReferenceKind;
use serde_json::{Value, json};

use crate::MockTransport;

/// Base URL the demo dataset is registered under.
pub const DEMO_BASE_URL: &str = "https://mock.gleif.local/api/v1";

/// A `lei-records` item with a name and legal-address country.
#[must_use]
pub fn lei_record(lei: &str, name: &str, country: &str) -> Value {
    json!({
        "type": "lei-records",
        "id": lei,
        "attributes": {
            "lei": lei,
            "entity": {
                "legalName": { "name": name, "language": "en" },
                "legalAddress": {
                    "addressLines": ["1 Example Street"],
                    "city": "Example City",
                    "postalCode": "00000",
                    "country": country,
                },
            },
            "registration": {},
        },
        "relationships": {},
    })
}

/// Attach a BIC to `record`.
#[must_use]
pub fn with_bic(mut record: Value, bic: &str) -> Value {
    record["attributes"]["bic"] = json!(bic);
    record
}

/// Attach a linked-instruments link to `record`.
#[must_use]
pub fn with_isins_link(mut record: Value, related: &str) -> Value {
    record["relationships"]["isins"] = json!({ "links": { "related": related } });
    record
}

/// Set the registration jurisdiction of `record`.
#[must_use]
pub fn with_jurisdiction(mut record: Value, jurisdiction: &str) -> Value {
    record["attributes"]["registration"]["jurisdiction"] = json!(jurisdiction);
    record
}

/// A page body with `meta.pagination`. `last_page: None` omits `lastPage`.
#[must_use]
pub fn page(items: Vec<Value>, current: u32, last_page: Option<u32>) -> Value {
    let mut pagination = json!({ "currentPage": current, "perPage": items.len() });
    if let Some(last) = last_page {
        pagination["lastPage"] = json!(last);
    }
    json!({ "data": items, "meta": { "pagination": pagination } })
}

/// A linked-instruments page carrying `isins` in order.
#[must_use]
pub fn isin_page(isins: &[&str], current: u32, last_page: Option<u32>) -> Value {
    let items = isins
        .iter()
        .map(|isin| json!({ "type": "isins", "attributes": { "isin": isin } }))
        .collect();
    page(items, current, last_page)
}

/// A reference-data item.
#[must_use]
pub fn reference_item(id: &str, name: &str) -> Value {
    json!({ "type": "reference", "id": id, "attributes": { "code": id, "name": name } })
}

/// Mock preloaded with a small dataset under [`DEMO_BASE_URL`]:
/// two pages of search results (one record enriched with BIC and ISINs, one
/// record without identifier) and one page per reference resource.
#[must_use]
pub fn demo_transport() -> MockTransport {
    let records = format!("{DEMO_BASE_URL}/lei-records");
    let isins = format!("{records}/E57ODZWZ7FF32TWEFA76/isins");

    let first = with_isins_link(
        with_bic(
            with_jurisdiction(
                lei_record("E57ODZWZ7FF32TWEFA76", "CITIBANK, N.A.", "US"),
                "US",
            ),
            "CITIUS33XXX",
        ),
        &isins,
    );
    let second = lei_record("N1FBEDJ5J41VKZLO2475", "CITIBANK EUROPE PLC", "IE");
    let broken = json!({ "type": "lei-records", "attributes": { "entity": {} } });
    let third = lei_record("549300U8H3KN0K301B23", "CITIBANK UK LIMITED", "GB");

    let mut transport = MockTransport::new()
        .with_page(&records, 1, &page(vec![first, second, broken], 1, Some(2)))
        .with_page(&records, 2, &page(vec![third], 2, Some(2)))
        .with_page(&isins, 1, &isin_page(&["US1729674242", "US172967MP39"], 1, Some(1)));

    for kind in ReferenceKind::ALL {
        let url = format!("{DEMO_BASE_URL}/{}", kind.as_str());
        let body = page(
            vec![
                reference_item(&format!("{}-1", kind.as_str()), "First"),
                reference_item(&format!("{}-2", kind.as_str()), "Second"),
            ],
            1,
            Some(1),
        );
        transport = transport.with_page(url, 1, &body);
    }
    transport
}
