//! Dynamic record

use std::collections::HashMap;

use super::Value;

/// Name of the identity field on every record.
pub const ID_FIELD: &str = "Id";

/// Name of the synthesized navigation link field.
pub const URL_LINK_FIELD: &str = "urlLink";

/// A dynamic record returned by the record source.
///
/// Records hold field values as a `HashMap<String, Value>`. The identity key
/// is the `Id` field.
///
/// # Example
///
/// ```
/// use datatable_lib::model::Record;
/// use datatable_lib::model::Value;
///
/// let record = Record::new()
///     .set("Id", "001")
///     .set("Name", "Acme");
///
/// assert_eq!(record.id().as_deref(), Some("001"));
/// assert_eq!(record.get("Name"), Some(&Value::from("Acme")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// The object type from the `attributes` annotation, if present.
    pub(crate) object_type: Option<String>,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty record of the given object type.
    pub fn of_type(object_type: impl Into<String>) -> Self {
        Self {
            object_type: Some(object_type.into()),
            fields: HashMap::new(),
        }
    }

    // =========================================================================
    // Metadata accessors
    // =========================================================================

    /// Returns the object type, if known.
    pub fn object_type(&self) -> Option<&str> {
        self.object_type.as_deref()
    }

    /// Returns the record identity as text, if the `Id` field is set.
    pub fn id(&self) -> Option<String> {
        self.fields
            .get(ID_FIELD)
            .filter(|v| !v.is_null())
            .map(Value::to_string)
    }

    /// Returns the synthesized navigation link, if the record was decorated.
    pub fn url_link(&self) -> Option<&str> {
        match self.fields.get(URL_LINK_FIELD) {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }
}
