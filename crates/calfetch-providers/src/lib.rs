//! Calendar API access: credentials, token refresh, retry and pagination.
//!
//! ```text
//! Credentials ──► ApiClient<T: CalendarTransport> ──► EventPages ──► Event, Event, ...
//!                   │  fetch(): one refresh + one retry
//!                   ▼
//!             HttpTransport (google)
//! ```

pub mod api;
pub mod credentials;
pub mod error;
#[cfg(feature = "google")]
pub mod google;
pub mod pagination;
pub mod query;
pub mod secret;
pub mod transport;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, data_error};
pub use credentials::Credentials;
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use pagination::{EventPages, Page};
pub use query::Query;
pub use transport::{ApiMethod, CalendarTransport};
