use gleif_core::{
    EnrichmentBudget, Extraction, GleifError, QueryParams, SearchQuery, SearchReport,
    SkippedRecord, extract_entity,
};

use crate::core::Gleif;
use crate::pages::Pager;

/// Path of the search resource under the API root.
pub const SEARCH_PATH: &str = "lei-records";

/// Country filter parameter on the search resource.
pub const COUNTRY_FILTER_PARAM: &str = "filter[entity.legalAddress.country]";

/// Filter parameters for `query`: the mode's text filter, then the country filter.
#[must_use]
pub fn filter_params(query: &SearchQuery) -> QueryParams {
    let mut params = vec![(
        format!("filter[{}]", query.mode().filter_field()),
        query.text().to_string(),
    )];
    if let Some(cc) = query.country() {
        params.push((COUNTRY_FILTER_PARAM.to_string(), cc.to_string()));
    }
    params
}

impl Gleif {
    /// Run a search, with a fresh enrichment budget from the configuration.
    ///
    /// Behavior and trade-offs:
    /// - Works one page at a time: each page's records are extracted, and
    ///   enriched when requested, before the next page is fetched. Records
    ///   without identifier are dropped and listed in [`SearchReport::skipped`].
    /// - A failed page ends the search with the records gathered so far; the
    ///   failure is recorded in [`SearchReport::warnings`].
    /// - When enrichment is requested, all records draw from one budget. Late
    ///   records may therefore get BICs only.
    ///
    /// # Errors
    /// Returns `GleifError::InvalidArg` only; degraded outcomes are reported.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchReport, GleifError> {
        let budget = EnrichmentBudget::new(self.cfg.enrichment_budget);
        self.search_with_budget(query, &budget).await
    }

    /// Run a search drawing enrichment sub-requests from a caller-owned budget.
    ///
    /// The budget is left as consumed, so the caller can inspect it afterwards
    /// or share it across several calls.
    ///
    /// # Errors
    /// Does not fail at present: a [`SearchQuery`] is validated when it is
    /// built, and degraded outcomes are reported.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gleif::search",
            skip(self, query, budget),
            fields(mode = %query.mode(), country = ?query.country()),
        )
    )]
    pub async fn search_with_budget(
        &self,
        query: &SearchQuery,
        budget: &EnrichmentBudget,
    ) -> Result<SearchReport, GleifError> {
        let mut pager = Pager::new(
            self.requester(),
            self.url(SEARCH_PATH),
            &filter_params(query),
            self.cfg.search_page_size,
        );
        let mut report = SearchReport::default();
        let mut position = 0;
        while let Some(page) = pager.next_page().await {
            for raw in &page {
                let index = position;
                position += 1;
                let mut entity = match extract_entity(raw) {
                    Extraction::Extracted(entity) => entity,
                    Extraction::Skipped(reason) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(position = index, reason = %reason, "skipping record");
                        report.skipped.push(SkippedRecord {
                            position: index,
                            reason,
                        });
                        continue;
                    }
                };
                if query.include_instruments() {
                    let enrichment = self.enrich(raw, budget).await;
                    entity.instruments = enrichment.instruments;
                    if let Some(e) = enrichment.error {
                        report.warnings.push(e);
                    }
                }
                report.entities.push(entity);
            }
        }

        let run = pager.finish(Vec::new());
        report.pages_fetched = run.pages_fetched;
        report.stop = run.stop;
        if let Some(e) = run.error {
            report.warnings.push(e);
        }
        if query.include_instruments() {
            report.enrichment_budget_remaining = Some(budget.remaining());
        }
        #[cfg(feature = "tracing")]
        tracing::info!(
            results = report.entities.len(),
            skipped = report.skipped.len(),
            pages = report.pages_fetched,
            stop = %report.stop,
            "search finished"
        );
        Ok(report)
    }

    /// Validate loosely typed input and run the search.
    ///
    /// `mode` must be `"name"` or `"fulltext"` (case-insensitive); `country`,
    /// when given, exactly two characters. Validation happens before any request.
    ///
    /// # Errors
    /// Returns `GleifError::InvalidArg` for blank text, an unknown mode or a
    /// malformed country code.
    pub async fn search_entities(
        &self,
        text: &str,
        mode: &str,
        country: Option<&str>,
        include_instruments: bool,
    ) -> Result<SearchReport, GleifError> {
        let query = SearchQuery::builder(text)
            .mode(mode.parse()?)
            .country_opt(country)
            .include_instruments(include_instruments)
            .build()?;
        self.search(&query).await
    }
}
