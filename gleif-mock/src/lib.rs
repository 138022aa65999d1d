//! Deterministic `HttpTransport` for tests and offline runs.
//!
//! Replies are scripted per `(url, page[number])`. Each route holds a queue of
//! replies: every call pops the front until one reply is left, which is then
//! repeated. A route scripted with `[503, 200]` therefore fails once and
//! succeeds from then on. Unscripted routes answer 404.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use gleif_core::{GleifError, HttpResponse, HttpTransport, QueryParams};
use serde_json::Value;
use tokio::sync::Mutex;

pub mod fixtures;

/// Instruction for how one call to a route should behave.
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Answer with this status and body.
    Respond(HttpResponse),
    /// Fail at the transport level with this error.
    Fail(GleifError),
    /// Never answer; resolves to `RequestTimeout` once the request timeout elapses.
    Hang,
}

/// One request observed by the mock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    /// Requested URL without query.
    pub url: String,
    /// Query parameters in the order sent.
    pub query: QueryParams,
}

impl RecordedCall {
    /// Value of query parameter `key`, if sent.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `page[number]` as sent, or 0 when absent.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.param("page[number]")
            .and_then(|p| p.parse().ok())
            .unwrap_or(0)
    }
}

#[derive(Default)]
struct InternalState {
    routes: HashMap<(String, u32), VecDeque<MockReply>>,
    calls: Vec<RecordedCall>,
}

/// Scripted transport.
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<InternalState>,
}

impl MockTransport {
    /// Empty mock: every route answers 404.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `url` page `page` (0 matches requests without `page[number]`).
    #[must_use]
    pub fn with_reply(mut self, url: impl Into<String>, page: u32, reply: MockReply) -> Self {
        self.state
            .get_mut()
            .routes
            .entry((url.into(), page))
            .or_default()
            .push_back(reply);
        self
    }

    /// Queue a 200 response carrying `body` as JSON.
    #[must_use]
    pub fn with_page(self, url: impl Into<String>, page: u32, body: &Value) -> Self {
        self.with_reply(url, page, MockReply::Respond(HttpResponse::from_json(200, body)))
    }

    /// Queue a response with `status` and an empty JSON object body.
    #[must_use]
    pub fn with_status(self, url: impl Into<String>, page: u32, status: u16) -> Self {
        self.with_reply(url, page, MockReply::Respond(HttpResponse::new(status, "{}")))
    }

    /// Every call observed so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().await.calls.clone()
    }

    /// Calls made to `url`, in order.
    pub async fn calls_to(&self, url: &str) -> Vec<RecordedCall> {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|c| c.url == url)
            .cloned()
            .collect()
    }

    /// Number of calls observed so far.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    fn not_found(url: &str) -> HttpResponse {
        let body = serde_json::json!({
            "errors": [{ "status": "404", "title": "Not Found", "detail": url }]
        });
        HttpResponse::from_json(404, &body)
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    fn name(&self) -> &'static str {
        "gleif-mock"
    }

    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, GleifError> {
        let call = RecordedCall {
            url: url.to_string(),
            query: query.to_vec(),
        };
        let key = (url.to_string(), call.page());
        let reply = {
            let mut guard = self.state.lock().await;
            guard.calls.push(call);
            match guard.routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };
        match reply {
            Some(MockReply::Respond(resp)) => Ok(resp),
            Some(MockReply::Fail(err)) => Err(err),
            Some(MockReply::Hang) => {
                tokio::time::sleep(timeout).await;
                Err(GleifError::request_timeout(url))
            }
            None => Ok(Self::not_found(url)),
        }
    }
}
