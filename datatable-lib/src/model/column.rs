//! Column definitions

use serde::Deserialize;
use serde::Serialize;

/// One displayed column.
///
/// The rendering layer owns the meaning of these definitions; this crate only
/// decodes them and passes them through. Keys other than `label`,
/// `fieldName` and `type` (for example `typeAttributes` or `sortable`) are
/// preserved in [`attributes`](Self::attributes) and written back unchanged.
///
/// # Example
///
/// ```
/// use datatable_lib::model::ColumnDef;
///
/// let json = r#"{"label": "Name", "fieldName": "urlLink", "type": "url",
///                "typeAttributes": {"label": {"fieldName": "Name"}}}"#;
/// let column: ColumnDef = serde_json::from_str(json).unwrap();
///
/// assert_eq!(column.field_name.as_deref(), Some("urlLink"));
/// assert!(column.attributes.contains_key("typeAttributes"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    /// Header text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// The record field this column displays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// Rendering type (e.g. `text`, `url`, `currency`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Every other key, untouched.
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl ColumnDef {
    /// Creates a column for the given label and field.
    pub fn new(label: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            field_name: Some(field_name.into()),
            ..Self::default()
        }
    }

    /// Sets the rendering type.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}
