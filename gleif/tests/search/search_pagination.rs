use gleif::{PageStop, SearchQuery, SkipReason};
use gleif_mock::{MockTransport, fixtures};
use serde_json::json;

use crate::helpers::*;

#[tokio::test]
async fn two_pages_with_last_page_two() {
    let (mock, gleif) = gleif_over(
        MockTransport::new()
            .with_page(
                RECORDS,
                1,
                &fixtures::page(
                    vec![
                        fixtures::lei_record("A", "A", "US"),
                        fixtures::lei_record("B", "B", "US"),
                    ],
                    1,
                    Some(2),
                ),
            )
            .with_page(
                RECORDS,
                2,
                &fixtures::page(vec![fixtures::lei_record("C", "C", "US")], 2, Some(2)),
            ),
    );
    let report = gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();

    assert_eq!(ids(&report), vec!["A", "B", "C"]);
    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.stop, PageStop::LastPage);
    let pages: Vec<u32> = mock.calls().await.iter().map(|c| c.page()).collect();
    assert_eq!(pages, vec![1, 2]);
}

#[tokio::test]
async fn absent_last_page_stops_after_first() {
    let (mock, gleif) = gleif_over(
        MockTransport::new()
            .with_page(
                RECORDS,
                1,
                &fixtures::page(vec![fixtures::lei_record("A", "A", "US")], 1, None),
            )
            .with_page(
                RECORDS,
                2,
                &fixtures::page(vec![fixtures::lei_record("B", "B", "US")], 2, None),
            ),
    );
    let report = gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();
    assert_eq!(ids(&report), vec!["A"]);
    assert_eq!(mock.call_count().await, 1);
}

#[tokio::test]
async fn boolean_last_page_is_terminal() {
    let mut body = fixtures::page(vec![fixtures::lei_record("A", "A", "US")], 1, None);
    body["meta"]["pagination"]["lastPage"] = json!(false);
    let (mock, gleif) = gleif_over(MockTransport::new().with_page(RECORDS, 1, &body));
    gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();
    assert_eq!(mock.call_count().await, 1);
}

#[tokio::test]
async fn empty_first_page_yields_nothing() {
    let (_, gleif) = gleif_over(
        MockTransport::new().with_page(RECORDS, 1, &fixtures::page(vec![], 1, Some(5))),
    );
    let report = gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();
    assert!(report.entities.is_empty());
    assert_eq!(report.stop, PageStop::EmptyPage);
    assert!(report.is_complete());
}

#[tokio::test]
async fn records_without_identifier_are_never_emitted() {
    let no_lei = json!({
        "attributes": {
            "entity": {
                "legalName": { "name": "Nameless" },
                "legalAddress": { "city": "Berlin", "country": "DE" }
            }
        }
    });
    let (_, gleif) = gleif_over(MockTransport::new().with_page(
        RECORDS,
        1,
        &fixtures::page(
            vec![
                fixtures::lei_record("A", "A", "US"),
                no_lei,
                json!("not a record"),
                fixtures::lei_record("B", "B", "US"),
            ],
            1,
            Some(1),
        ),
    ));
    let report = gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();

    assert_eq!(ids(&report), vec!["A", "B"]);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].position, 1);
    assert_eq!(report.skipped[0].reason, SkipReason::MissingId);
    assert_eq!(report.skipped[1].reason, SkipReason::NotAnObject);
}

#[tokio::test]
async fn identical_queries_yield_identical_results() {
    let (_, demo) = gleif_with(fixtures::demo_transport(), |b| {
        b.base_url(fixtures::DEMO_BASE_URL)
    });

    let q = SearchQuery::builder("citibank")
        .include_instruments(true)
        .build()
        .unwrap();
    let first = demo.search(&q).await.unwrap();
    let second = demo.search(&q).await.unwrap();
    assert_eq!(first.entities, second.entities);
    assert_eq!(first.entities.len(), 3);
}
