use std::time::Duration;

use gleif::{GleifError, PageStop, SearchQuery};
use gleif_mock::{MockReply, MockTransport, fixtures};

use crate::helpers::*;

fn page_one() -> serde_json::Value {
    fixtures::page(vec![fixtures::lei_record("A", "A", "US")], 1, Some(1))
}

#[tokio::test(start_paused = true)]
async fn success_on_final_retry_surfaces_no_error() {
    let (mock, gleif) = gleif_over(
        MockTransport::new()
            .with_status(RECORDS, 1, 429)
            .with_status(RECORDS, 1, 503)
            .with_status(RECORDS, 1, 500)
            .with_page(RECORDS, 1, &page_one()),
    );
    let start = tokio::time::Instant::now();
    let report = gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();

    assert_eq!(ids(&report), vec!["A"]);
    assert!(report.warnings.is_empty());
    assert!(report.is_complete());
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(mock.call_count().await, 4);
    // 500 + 1000 + 2000 ms
    assert_eq!(start.elapsed(), Duration::from_millis(3500));
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_stop_pagination() {
    let (mock, gleif) = gleif_over(MockTransport::new().with_status(RECORDS, 1, 503));
    let report = gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();

    assert!(report.entities.is_empty());
    assert_eq!(report.stop, PageStop::Failed);
    assert_eq!(report.warnings, vec![GleifError::http(503, RECORDS)]);
    assert_eq!(mock.call_count().await, 4);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let (mock, gleif) = gleif_over(MockTransport::new().with_status(RECORDS, 1, 400));
    let report = gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();

    assert_eq!(report.stop, PageStop::Failed);
    assert_eq!(mock.call_count().await, 1);
}

#[tokio::test]
async fn zero_retries_behaves_as_plain_fetcher() {
    let (mock, gleif) = gleif_with(
        MockTransport::new()
            .with_status(RECORDS, 1, 429)
            .with_page(RECORDS, 1, &page_one()),
        |b| b.max_retries(0),
    );
    let report = gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();

    assert!(report.entities.is_empty());
    assert_eq!(report.warnings, vec![GleifError::http(429, RECORDS)]);
    assert_eq!(mock.call_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn request_timeout_is_reported_not_retried() {
    let (mock, gleif) = gleif_with(
        MockTransport::new().with_reply(RECORDS, 1, MockReply::Hang),
        |b| b.request_timeout(Duration::from_secs(10)),
    );
    let report = gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();

    assert_eq!(report.warnings, vec![GleifError::request_timeout(RECORDS)]);
    assert_eq!(mock.call_count().await, 1);
}
