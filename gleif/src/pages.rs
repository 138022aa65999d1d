use gleif_core::{GleifError, PageStop, PaginationSignal, page_items};
use serde_json::Value;

use crate::core::Gleif;
use crate::retry::Requester;

/// Raw items gathered by one pagination loop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageRun {
    /// Items of every page, in page order then item order.
    pub items: Vec<Value>,
    /// Page requests issued (retries of the same page count once).
    pub pages_fetched: u32,
    /// Why the loop ended.
    pub stop: PageStop,
    /// The failure behind `PageStop::Failed`.
    pub error: Option<GleifError>,
}

impl PageRun {
    /// True when the loop ended on its own terms rather than on a failure.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

fn page_query(filter: &[(String, String)], page: u32, page_size: u32) -> Vec<(String, String)> {
    let mut q = filter.to_vec();
    q.push(("page[number]".to_string(), page.to_string()));
    q.push(("page[size]".to_string(), page_size.to_string()));
    q
}

/// Fetch and decode page `page`, returning its items and whether it is the last.
async fn fetch_page(
    requester: &Requester<'_>,
    url: &str,
    query: &[(String, String)],
    page: u32,
) -> Result<(Vec<Value>, bool), GleifError> {
    let resp = requester.get(url, query).await?;
    if !resp.is_success() {
        return Err(GleifError::http(resp.status(), url));
    }
    let body = resp.json()?;
    let items = page_items(&body)?.to_vec();
    let last = PaginationSignal::from_body(&body, page).is_final();
    Ok((items, last))
}

/// Step-wise pagination over one resource.
///
/// Each call to [`next_page`](Self::next_page) issues at most one page request
/// and yields that page's items, so callers can finish with a page before the
/// next one is requested. Once the last-page signal, an empty page, a closed
/// gate or a failure ends the walk, every further call yields `None`.
pub struct Pager<'a> {
    requester: Requester<'a>,
    url: String,
    filter: Vec<(String, String)>,
    page_size: u32,
    page: u32,
    pages_fetched: u32,
    items_seen: usize,
    stop: Option<PageStop>,
    error: Option<GleifError>,
}

impl<'a> Pager<'a> {
    /// Start at page 1 of `url` with `filter` and `page_size`.
    #[must_use]
    pub fn new(
        requester: Requester<'a>,
        url: impl Into<String>,
        filter: &[(String, String)],
        page_size: u32,
    ) -> Self {
        Self {
            requester,
            url: url.into(),
            filter: filter.to_vec(),
            page_size,
            page: 1,
            pages_fetched: 0,
            items_seen: 0,
            stop: None,
            error: None,
        }
    }

    /// Fetch the next page; `None` once the walk has ended.
    pub async fn next_page(&mut self) -> Option<Vec<Value>> {
        self.next_page_gated(|| true).await
    }

    /// Like [`next_page`](Self::next_page), but `gate` is consulted before the
    /// request; returning false ends the walk with `PageStop::BudgetExhausted`
    /// without issuing it.
    pub async fn next_page_gated(&mut self, gate: impl FnOnce() -> bool) -> Option<Vec<Value>> {
        if self.stop.is_some() {
            return None;
        }
        if !gate() {
            self.stop = Some(PageStop::BudgetExhausted);
            return None;
        }
        let page = self.page;
        let query = page_query(&self.filter, page, self.page_size);
        self.pages_fetched += 1;
        match fetch_page(&self.requester, &self.url, &query, page).await {
            Ok((items, _)) if items.is_empty() => {
                self.stop = Some(PageStop::EmptyPage);
                None
            }
            Ok((items, last)) => {
                if last {
                    self.stop = Some(PageStop::LastPage);
                }
                self.page += 1;
                self.items_seen += items.len();
                Some(items)
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(
                    url = %self.url,
                    page,
                    collected = self.items_seen,
                    error = %e,
                    "page fetch failed; keeping partial results"
                );
                self.stop = Some(PageStop::Failed);
                self.error = Some(e);
                None
            }
        }
    }

    /// Page requests issued so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Why the walk ended, or `None` while it can continue.
    #[must_use]
    pub const fn stop(&self) -> Option<PageStop> {
        self.stop
    }

    /// Close the walk, pairing its outcome with the items the caller kept.
    #[must_use]
    pub fn finish(self, items: Vec<Value>) -> PageRun {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            url = %self.url,
            pages = self.pages_fetched,
            items = self.items_seen,
            stop = ?self.stop,
            "pagination finished"
        );
        PageRun {
            items,
            pages_fetched: self.pages_fetched,
            stop: self.stop.unwrap_or_default(),
            error: self.error,
        }
    }
}

/// Drive every page of `url` with `filter`, stopping on the last-page signal,
/// an empty page, or the first failure.
///
/// `gate` is consulted before each request; returning false ends the loop
/// with `PageStop::BudgetExhausted` without issuing it.
pub async fn fetch_pages_gated<G>(
    requester: &Requester<'_>,
    url: &str,
    filter: &[(String, String)],
    page_size: u32,
    mut gate: G,
) -> PageRun
where
    G: FnMut() -> bool,
{
    let mut pager = Pager::new(*requester, url, filter, page_size);
    let mut items = Vec::new();
    while let Some(page) = pager.next_page_gated(&mut gate).await {
        items.extend(page);
    }
    pager.finish(items)
}

/// [`fetch_pages_gated`] with no gate.
pub async fn fetch_pages(
    requester: &Requester<'_>,
    url: &str,
    filter: &[(String, String)],
    page_size: u32,
) -> PageRun {
    fetch_pages_gated(requester, url, filter, page_size, || true).await
}

impl Gleif {
    /// Fetch every page of `url` with `filter` and `page_size`, through this
    /// instance's retrying requester.
    ///
    /// Behavior and trade-offs:
    /// - Never fails: a failed page stops the loop and the items gathered so far
    ///   are kept, with the failure on [`PageRun::error`].
    /// - Only an integer `lastPage` beyond the current page keeps the loop going.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "gleif::pages::fetch_all_pages", skip(self, filter))
    )]
    pub async fn fetch_all_pages(
        &self,
        url: &str,
        filter: &[(String, String)],
        page_size: u32,
    ) -> PageRun {
        fetch_pages(&self.requester(), url, filter, page_size).await
    }
}
