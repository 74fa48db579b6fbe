//! Flattening of paged `events.list` results into one lazy sequence.

use std::collections::{HashSet, VecDeque};

use calfetch_core::Event;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::{ProviderError, ProviderResult};
use crate::query::{PAGE_TOKEN, Query};
use crate::transport::{ApiMethod, CalendarTransport};

/// One page of an events listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Events on this page, in the service's order.
    #[serde(default)]
    pub items: Vec<Event>,
    /// Cursor for the next page; absent on the last one.
    pub next_page_token: Option<String>,
}

impl Page {
    /// Decodes a page from an API response body.
    pub fn from_value(data: Value) -> ProviderResult<Self> {
        serde_json::from_value(data).map_err(|e| {
            ProviderError::invalid_response(format!("unexpected events page: {}", e))
                .with_source(e)
        })
    }
}

/// Iterator over every event of a listing, fetching pages on demand.
///
/// One request is made per page, and only once the previous page has been
/// fully consumed. The sequence ends after the first page without a
/// `nextPageToken`, when a page hands back a token that was already used, or
/// right after yielding an error.
pub struct EventPages<'a, T> {
    client: &'a mut ApiClient<T>,
    buffered: VecDeque<Event>,
    /// Query for the next page to fetch; `None` once the last page was seen.
    next_query: Option<Query>,
    /// Page tokens already requested.
    seen_tokens: HashSet<String>,
    pages: usize,
}

impl<'a, T: CalendarTransport> EventPages<'a, T> {
    /// Starts a listing. Nothing is fetched until the first call to `next`.
    pub fn new(client: &'a mut ApiClient<T>, query: Query) -> Self {
        Self {
            client,
            buffered: VecDeque::new(),
            next_query: Some(query),
            seen_tokens: HashSet::new(),
            pages: 0,
        }
    }

    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    fn fetch_page(&mut self, query: Query) -> ProviderResult<()> {
        let data = self.client.fetch(ApiMethod::EventsList, &query)?;
        let page = Page::from_value(data)?;
        self.pages += 1;
        debug!(
            page = self.pages,
            items = page.items.len(),
            more = page.next_page_token.is_some(),
            "fetched events page"
        );

        self.buffered.extend(page.items);
        self.next_query = match page.next_page_token {
            Some(token) if self.seen_tokens.contains(&token) => {
                warn!(token = %token, "server returned an already used page token, stopping");
                None
            }
            Some(token) => {
                self.seen_tokens.insert(token.clone());
                Some(query.with(PAGE_TOKEN, token))
            }
            None => None,
        };
        Ok(())
    }
}

impl<T: CalendarTransport> Iterator for EventPages<'_, T> {
    type Item = ProviderResult<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.buffered.pop_front() {
                return Some(Ok(event));
            }
            let query = self.next_query.take()?;
            if let Err(e) = self.fetch_page(query) {
                return Some(Err(e));
            }
        }
    }
}
