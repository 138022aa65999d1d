// Shared builders so tests can `use helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use gleif::{Gleif, RetryConfig};
use gleif_mock::MockTransport;
use serde_json::Value;

pub const BASE: &str = "http://registry.test/api/v1";
pub const RECORDS: &str = "http://registry.test/api/v1/lei-records";

/// URL of a record's linked-instruments resource.
pub fn isins_url(lei: &str) -> String {
    format!("{RECORDS}/{lei}/isins")
}

/// Orchestrator over `mock` with retries enabled at a 500ms base.
pub fn gleif_over(mock: MockTransport) -> (Arc<MockTransport>, Gleif) {
    gleif_with(mock, |b| b)
}

/// Orchestrator over `mock`, with extra builder settings.
pub fn gleif_with(
    mock: MockTransport,
    configure: impl FnOnce(gleif::GleifBuilder) -> gleif::GleifBuilder,
) -> (Arc<MockTransport>, Gleif) {
    let mock = Arc::new(mock);
    let builder = Gleif::builder()
        .with_transport(mock.clone())
        .base_url(BASE)
        .retry(RetryConfig {
            max_retries: 3,
            backoff_base: Duration::from_millis(500),
            jitter_percent: 0,
        });
    let gleif = configure(builder).build().expect("gleif builds");
    (mock, gleif)
}

/// Identifiers of `entities`, in order.
pub fn ids(report: &gleif::SearchReport) -> Vec<String> {
    report.entities.iter().map(|e| e.id.clone()).collect()
}

/// A record with a linked-instruments link and optional BIC.
pub fn linked_record(lei: &str, bic: Option<&str>) -> Value {
    let rec = gleif_mock::fixtures::with_isins_link(
        gleif_mock::fixtures::lei_record(lei, lei, "US"),
        &isins_url(lei),
    );
    match bic {
        Some(b) => gleif_mock::fixtures::with_bic(rec, b),
        None => rec,
    }
}
