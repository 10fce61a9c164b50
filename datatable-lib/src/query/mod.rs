//! Record queries against the remote record service.
//!
//! - [`RecordQuery`] - the parameter set sent to the service
//! - [`Window`] - a limit/offset slice of the result set
//! - [`RecordSource`] - the service itself
//! - [`RecordFetcher`] - builds queries from a [`TableConfig`](crate::config::TableConfig)

mod fetcher;
mod memory;
mod params;

pub use fetcher::RecordFetcher;
pub use memory::InMemoryRecordSource;
pub use params::RecordQuery;
pub use params::Window;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::Record;

/// Trait for the remote record-query service.
///
/// Implementations apply the query's filter and sort expressions, restrict
/// results to the requested fields and, when the query carries a window,
/// clip to `limit_size` records starting at `offset`. A query with no window
/// returns the full result set in one call.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use datatable_lib::query::{RecordQuery, RecordSource};
///
/// struct ApexSource { /* ... */ }
///
/// #[async_trait]
/// impl RecordSource for ApexSource {
///     async fn get_records(&self, query: &RecordQuery) -> Result<Vec<Record>, FetchError> {
///         let body = serde_json::to_string(query)?;
///         // POST body to the service and decode the response...
///         todo!()
///     }
/// }
/// ```
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Runs the query and returns matching records in service order.
    async fn get_records(&self, query: &RecordQuery) -> Result<Vec<Record>, FetchError>;
}
