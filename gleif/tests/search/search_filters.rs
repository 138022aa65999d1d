use gleif::{GleifConfig, SearchMode, SearchQuery};
use gleif_mock::{MockTransport, fixtures};

use crate::helpers::*;

fn one_page() -> MockTransport {
    MockTransport::new().with_page(
        RECORDS,
        1,
        &fixtures::page(vec![fixtures::lei_record("L1", "Acme", "DE")], 1, None),
    )
}

#[tokio::test]
async fn name_mode_sends_legal_name_filter() {
    let (mock, gleif) = gleif_over(one_page());
    let q = SearchQuery::new("Acme").unwrap();
    gleif.search(&q).await.unwrap();

    let calls = mock.calls_to(RECORDS).await;
    assert_eq!(calls[0].param("filter[entity.legalName]"), Some("Acme"));
    assert_eq!(calls[0].param("filter[fulltext]"), None);
}

#[tokio::test]
async fn fulltext_mode_sends_fulltext_filter() {
    let (mock, gleif) = gleif_over(one_page());
    let q = SearchQuery::builder("Acme")
        .mode(SearchMode::FullText)
        .build()
        .unwrap();
    gleif.search(&q).await.unwrap();

    let calls = mock.calls_to(RECORDS).await;
    assert_eq!(calls[0].param("filter[fulltext]"), Some("Acme"));
    assert_eq!(calls[0].param("filter[entity.legalName]"), None);
}

#[tokio::test]
async fn country_is_sent_upper_cased() {
    let (mock, gleif) = gleif_over(one_page());
    let report = gleif
        .search_entities("Acme", "name", Some("de"), false)
        .await
        .unwrap();
    assert_eq!(ids(&report), vec!["L1"]);

    let calls = mock.calls_to(RECORDS).await;
    assert_eq!(calls[0].param("filter[entity.legalAddress.country]"), Some("DE"));
    assert_eq!(calls[0].param("page[size]"), Some("100"));
}

#[tokio::test]
async fn invalid_input_fails_before_any_request() {
    let (mock, gleif) = gleif_over(one_page());

    for (text, mode, country) in [
        ("", "name", None),
        ("   ", "name", None),
        ("Acme", "fuzzy", None),
        ("Acme", "name", Some("DEU")),
        ("Acme", "name", Some("D")),
        ("Acme", "name", Some("")),
    ] {
        let err = gleif
            .search_entities(text, mode, country, false)
            .await
            .unwrap_err();
        assert!(err.is_validation(), "{text:?}/{mode}/{country:?}: {err:?}");
    }
    assert_eq!(mock.call_count().await, 0);
}

#[tokio::test]
async fn oversized_page_size_in_config_is_capped_on_the_wire() {
    let cfg = GleifConfig {
        search_page_size: 500,
        ..GleifConfig::default()
    };
    let (mock, gleif) = gleif_with(one_page(), |b| b.config(cfg).base_url(BASE));
    gleif.search(&SearchQuery::new("Acme").unwrap()).await.unwrap();

    let calls = mock.calls_to(RECORDS).await;
    assert_eq!(calls[0].param("page[size]"), Some("100"));
}
