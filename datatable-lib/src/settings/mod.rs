//! Custom setting storage.
//!
//! A custom setting is the stored record that describes one table: which
//! object to query, which fields to select, how to filter and sort on the
//! server, and the column definitions to render. [`SettingsBackend`]
//! abstracts where those records live.

mod memory;
mod sqlite;

pub use memory::*;
pub use sqlite::*;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::error::SettingsError;

/// A stored table configuration record, as the settings service returns it.
///
/// Field names follow the settings service (`FieldAPINames__c`, ...). The
/// unsuffixed names are accepted when reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSetting {
    /// Comma-separated list of field API names, e.g. `"Name, Amount"`.
    #[serde(rename = "FieldAPINames__c", alias = "FieldAPINames", default)]
    pub field_api_names: String,
    /// Server-side filter expression, passed through untouched.
    #[serde(rename = "FilteringString__c", alias = "FilteringString", default)]
    pub filtering_string: Option<String>,
    /// API name of the object to query.
    #[serde(rename = "sObjectAPIName__c", alias = "sObjectAPIName", default)]
    pub object_api_name: String,
    /// Server-side sort expression, passed through untouched.
    #[serde(rename = "SortingString__c", alias = "SortingString", default)]
    pub sorting_string: Option<String>,
    /// Column definitions as a JSON array in a string.
    #[serde(rename = "ColumnsConfiguration__c", alias = "ColumnsConfiguration", default)]
    pub columns_configuration: String,
}

impl CustomSetting {
    /// Creates a setting for the given object and field list.
    pub fn new(object_api_name: impl Into<String>, field_api_names: impl Into<String>) -> Self {
        Self {
            object_api_name: object_api_name.into(),
            field_api_names: field_api_names.into(),
            columns_configuration: "[]".to_string(),
            ..Self::default()
        }
    }

    /// Sets the filter expression.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filtering_string = Some(filter.into());
        self
    }

    /// Sets the sort expression.
    pub fn with_sorting(mut self, sorting: impl Into<String>) -> Self {
        self.sorting_string = Some(sorting.into());
        self
    }

    /// Sets the raw column configuration JSON.
    pub fn with_columns(mut self, columns_json: impl Into<String>) -> Self {
        self.columns_configuration = columns_json.into();
        self
    }
}

/// Backend trait for custom setting storage.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Looks up a setting by name.
    async fn get_setting(&self, name: &str) -> Result<Option<CustomSetting>, SettingsError>;

    /// Stores a setting under the given name, replacing any existing one.
    async fn put_setting(&self, name: &str, setting: CustomSetting) -> Result<(), SettingsError>;
}
