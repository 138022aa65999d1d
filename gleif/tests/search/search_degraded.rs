use gleif::{GleifError, PageStop, SearchQuery};
use gleif_mock::{MockReply, MockTransport, fixtures};

use crate::helpers::*;

#[tokio::test]
async fn failed_second_page_keeps_first_page() {
    let (_, gleif) = gleif_with(
        MockTransport::new()
            .with_page(
                RECORDS,
                1,
                &fixtures::page(vec![fixtures::lei_record("A", "A", "US")], 1, Some(3)),
            )
            .with_status(RECORDS, 2, 502),
        |b| b.max_retries(1).backoff_base(std::time::Duration::ZERO),
    );
    let report = gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();

    assert_eq!(ids(&report), vec!["A"]);
    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.stop, PageStop::Failed);
    assert!(!report.is_complete());
}

#[tokio::test]
async fn malformed_json_stops_with_data_warning() {
    let (_, gleif) = gleif_over(
        MockTransport::new()
            .with_page(
                RECORDS,
                1,
                &fixtures::page(vec![fixtures::lei_record("A", "A", "US")], 1, Some(2)),
            )
            .with_reply(
                RECORDS,
                2,
                MockReply::Respond(gleif::HttpResponse::new(200, "<html>oops</html>")),
            ),
    );
    let report = gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();

    assert_eq!(ids(&report), vec!["A"]);
    assert!(matches!(report.warnings.as_slice(), [GleifError::Data(_)]));
}

#[tokio::test]
async fn connection_failure_is_a_warning() {
    let (_, gleif) = gleif_over(MockTransport::new().with_reply(
        RECORDS,
        1,
        MockReply::Fail(GleifError::connector("gleif-mock", "connection refused")),
    ));
    let report = gleif.search(&SearchQuery::new("x").unwrap()).await.unwrap();

    assert!(report.entities.is_empty());
    assert_eq!(report.stop, PageStop::Failed);
    assert_eq!(report.warnings.len(), 1);
}
