//! Test helpers: a transport that replays scripted responses.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use serde_json::{Value, json};

use crate::credentials::Credentials;
use crate::error::{ProviderError, ProviderResult};
use crate::query::Query;
use crate::transport::{ApiMethod, CalendarTransport};

pub(crate) struct ScriptedTransport {
    responses: RefCell<VecDeque<ProviderResult<Value>>>,
    calls: RefCell<Vec<(Query, String)>>,
    refreshes: Cell<usize>,
    refresh_error: RefCell<Option<ProviderError>>,
}

impl ScriptedTransport {
    pub(crate) fn new(responses: Vec<ProviderResult<Value>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: RefCell::new(Vec::new()),
            refreshes: Cell::new(0),
            refresh_error: RefCell::new(None),
        }
    }

    pub(crate) fn with_refresh_error(self, err: ProviderError) -> Self {
        *self.refresh_error.borrow_mut() = Some(err);
        self
    }

    /// Query and access token of every executed request.
    pub(crate) fn calls(&self) -> Vec<(Query, String)> {
        self.calls.borrow().clone()
    }

    pub(crate) fn refreshes(&self) -> usize {
        self.refreshes.get()
    }
}

impl CalendarTransport for ScriptedTransport {
    fn execute(
        &self,
        _method: ApiMethod,
        query: &Query,
        access_token: &str,
    ) -> ProviderResult<Value> {
        self.calls
            .borrow_mut()
            .push((query.clone(), access_token.to_string()));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {:?}", query))
    }

    fn refresh_access_token(&self, _credentials: &Credentials) -> ProviderResult<String> {
        if let Some(err) = self.refresh_error.borrow_mut().take() {
            return Err(err);
        }
        self.refreshes.set(self.refreshes.get() + 1);
        Ok(format!("fresh-token-{}", self.refreshes.get()))
    }
}

pub(crate) fn credentials() -> Credentials {
    Credentials {
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        scope: "https://www.googleapis.com/auth/calendar".to_string(),
        refresh_token: "refresh".to_string(),
        access_token: "stale-token".to_string(),
    }
}

/// An events-list page with one `{"id": ...}` item per id.
pub(crate) fn page(ids: &[&str], next_page_token: Option<&str>) -> Value {
    let items: Vec<Value> = ids.iter().map(|id| json!({ "id": id })).collect();
    let mut body = json!({ "kind": "calendar#events", "items": items });
    if let Some(token) = next_page_token {
        body["nextPageToken"] = json!(token);
    }
    body
}

pub(crate) fn auth_error() -> Value {
    json!({
        "error": {
            "errors": [{
                "domain": "global",
                "reason": "authError",
                "message": "Invalid Credentials"
            }],
            "code": 401,
            "message": "Invalid Credentials"
        }
    })
}
