//! Query parameters.

use serde::Deserialize;
use serde::Serialize;

/// A limit/offset slice of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Maximum number of records to return.
    pub limit: u32,
    /// Number of records to skip.
    pub offset: u32,
}

impl Window {
    /// Creates a new window.
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }
}

/// Parameters for one call to a [`RecordSource`](super::RecordSource).
///
/// Serializes to the service's parameter shape. An unpaginated query carries
/// explicit nulls for `limitSize` and `offset`, never zeros:
///
/// ```
/// use datatable_lib::query::RecordQuery;
///
/// let query = RecordQuery::new("Account", "Name,Industry");
/// let json = serde_json::to_value(&query).unwrap();
///
/// assert_eq!(json["limitSize"], serde_json::Value::Null);
/// assert_eq!(json["offset"], serde_json::Value::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordQuery {
    /// Comma-separated field list, as configured.
    pub field_names: String,
    /// API name of the object to query.
    #[serde(rename = "sObjectApiName")]
    pub object_api_name: String,
    /// Server-side filter expression.
    pub filter: Option<String>,
    /// Server-side sort expression.
    pub sorting_params: Option<String>,
    /// Page size, or `None` for the full result set.
    pub limit_size: Option<u32>,
    /// Page start, or `None` for the full result set.
    pub offset: Option<u32>,
}

impl RecordQuery {
    /// Creates an unfiltered, unpaginated query.
    pub fn new(object_api_name: impl Into<String>, field_names: impl Into<String>) -> Self {
        Self {
            field_names: field_names.into(),
            object_api_name: object_api_name.into(),
            filter: None,
            sorting_params: None,
            limit_size: None,
            offset: None,
        }
    }

    /// Restricts the query to a window (builder pattern).
    pub fn with_window(mut self, window: Window) -> Self {
        self.limit_size = Some(window.limit);
        self.offset = Some(window.offset);
        self
    }

    /// Returns the requested window, if the query is paginated.
    pub fn window(&self) -> Option<Window> {
        match (self.limit_size, self.offset) {
            (Some(limit), offset) => Some(Window::new(limit, offset.unwrap_or(0))),
            (None, _) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_windowed_query() {
        let mut query =
            RecordQuery::new("Opportunity", "Name,Amount").with_window(Window::new(20, 40));
        query.filter = Some("Amount > 0".to_string());

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fieldNames": "Name,Amount",
                "sObjectApiName": "Opportunity",
                "filter": "Amount > 0",
                "sortingParams": null,
                "limitSize": 20,
                "offset": 40
            })
        );
    }

    #[test]
    fn test_window_defaults_missing_offset() {
        let mut query = RecordQuery::new("Account", "Name");
        assert_eq!(query.window(), None);

        query.limit_size = Some(10);
        assert_eq!(query.window(), Some(Window::new(10, 0)));
    }
}
