use gleif::{EnrichmentBudget, GleifError, Instrument, SearchQuery};
use gleif_mock::{MockTransport, fixtures};

use crate::helpers::*;

fn enriched_query() -> SearchQuery {
    SearchQuery::builder("x")
        .include_instruments(true)
        .build()
        .unwrap()
}

fn records(items: Vec<serde_json::Value>) -> MockTransport {
    MockTransport::new().with_page(RECORDS, 1, &fixtures::page(items, 1, Some(1)))
}

#[tokio::test]
async fn zero_budget_keeps_bic_without_sub_requests() {
    let (mock, gleif) = gleif_with(
        records(vec![linked_record("L1", Some("BANKUS33"))]),
        |b| b.enrichment_budget(0),
    );
    let report = gleif.search(&enriched_query()).await.unwrap();

    assert_eq!(
        report.entities[0].instruments,
        Some(vec![Instrument::bic("BANKUS33")])
    );
    assert!(mock.calls_to(&isins_url("L1")).await.is_empty());
    assert_eq!(report.enrichment_budget_remaining, Some(0));
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn budget_of_one_fetches_only_first_instrument_page() {
    let mock = records(vec![linked_record("L1", None)])
        .with_page(isins_url("L1"), 1, &fixtures::isin_page(&["I1", "I2"], 1, Some(2)))
        .with_page(isins_url("L1"), 2, &fixtures::isin_page(&["I3"], 2, Some(2)));
    let (mock, gleif) = gleif_over(mock);
    let budget = EnrichmentBudget::new(1);

    let report = gleif
        .search_with_budget(&enriched_query(), &budget)
        .await
        .unwrap();

    assert_eq!(mock.calls_to(&isins_url("L1")).await.len(), 1);
    assert_eq!(budget.remaining(), 0);
    assert_eq!(
        report.entities[0].instruments,
        Some(vec![Instrument::isin("I1"), Instrument::isin("I2")])
    );
}

#[tokio::test]
async fn budget_is_shared_across_records() {
    let mock = records(vec![
        linked_record("L1", None),
        linked_record("L2", Some("SECONDXX")),
    ])
    .with_page(isins_url("L1"), 1, &fixtures::isin_page(&["I1"], 1, Some(1)))
    .with_page(isins_url("L2"), 1, &fixtures::isin_page(&["I2"], 1, Some(1)));
    let (mock, gleif) = gleif_with(mock, |b| b.enrichment_budget(1));

    let report = gleif.search(&enriched_query()).await.unwrap();

    assert_eq!(report.entities[0].instruments, Some(vec![Instrument::isin("I1")]));
    assert_eq!(
        report.entities[1].instruments,
        Some(vec![Instrument::bic("SECONDXX")])
    );
    assert!(mock.calls_to(&isins_url("L2")).await.is_empty());
    assert_eq!(report.enrichment_budget_remaining, Some(0));
}

#[tokio::test]
async fn each_search_call_gets_a_fresh_budget() {
    let mock = records(vec![linked_record("L1", None)])
        .with_page(isins_url("L1"), 1, &fixtures::isin_page(&["I1"], 1, Some(1)));
    let (mock, gleif) = gleif_with(mock, |b| b.enrichment_budget(1));

    let first = gleif.search(&enriched_query()).await.unwrap();
    let second = gleif.search(&enriched_query()).await.unwrap();

    assert_eq!(first.entities, second.entities);
    assert_eq!(mock.calls_to(&isins_url("L1")).await.len(), 2);
}

#[tokio::test]
async fn enrichment_off_issues_no_sub_requests() {
    let (mock, gleif) = gleif_over(records(vec![linked_record("L1", Some("BANKUS33"))]));
    let report = gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();

    assert_eq!(report.entities[0].instruments, None);
    assert_eq!(report.enrichment_budget_remaining, None);
    assert_eq!(mock.call_count().await, 1);
}

#[tokio::test]
async fn failed_instrument_lookup_is_a_warning() {
    let mock = records(vec![linked_record("L1", Some("BANKUS33")), linked_record("L2", None)])
        .with_status(isins_url("L1"), 1, 404)
        .with_page(isins_url("L2"), 1, &fixtures::isin_page(&["I2"], 1, None));
    let (_, gleif) = gleif_over(mock);

    let report = gleif.search(&enriched_query()).await.unwrap();

    assert_eq!(report.entities.len(), 2);
    assert_eq!(
        report.entities[0].instruments,
        Some(vec![Instrument::bic("BANKUS33")])
    );
    assert_eq!(report.entities[1].instruments, Some(vec![Instrument::isin("I2")]));
    assert_eq!(report.warnings, vec![GleifError::http(404, isins_url("L1"))]);
}

#[tokio::test]
async fn each_page_is_enriched_before_the_next_is_fetched() {
    let mock = MockTransport::new()
        .with_page(RECORDS, 1, &fixtures::page(vec![linked_record("L1", None)], 1, Some(2)))
        .with_page(RECORDS, 2, &fixtures::page(vec![linked_record("L2", None)], 2, Some(2)))
        .with_page(isins_url("L1"), 1, &fixtures::isin_page(&["I1"], 1, Some(1)))
        .with_page(isins_url("L2"), 1, &fixtures::isin_page(&["I2"], 1, Some(1)));
    let (mock, gleif) = gleif_over(mock);

    let report = gleif.search(&enriched_query()).await.unwrap();

    let order: Vec<(String, u32)> = mock
        .calls()
        .await
        .iter()
        .map(|c| (c.url.clone(), c.page()))
        .collect();
    assert_eq!(
        order,
        vec![
            (RECORDS.to_string(), 1),
            (isins_url("L1"), 1),
            (RECORDS.to_string(), 2),
            (isins_url("L2"), 1),
        ]
    );
    assert_eq!(ids(&report), vec!["L1", "L2"]);
    assert_eq!(report.pages_fetched, 2);
}
