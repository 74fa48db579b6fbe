//! Query parameters for API calls.

/// Parameter carrying the calendar identifier.
pub const CALENDAR_ID: &str = "calendarId";

/// Parameter carrying the pagination cursor.
pub const PAGE_TOKEN: &str = "pageToken";

/// An ordered set of API parameters (`calendarId`, `timeMin`, `pageToken`, ...).
///
/// Setting a parameter that already exists overwrites its value in place, so
/// the original insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for the given calendar.
    pub fn for_calendar(calendar_id: impl Into<String>) -> Self {
        Self::new().with(CALENDAR_ID, calendar_id)
    }

    /// Sets `key` to `value`, adding or overwriting it.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.params.push((key, value)),
        }
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets every pair from `params`.
    #[must_use]
    pub fn merge<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in params {
            self.set(key, value);
        }
        self
    }

    /// Returns the value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the calendar identifier, if set.
    pub fn calendar_id(&self) -> Option<&str> {
        self.get(CALENDAR_ID)
    }

    /// Iterates over all parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
