//! Table configuration resolution

use std::sync::Arc;

use crate::error::ConfigError;
use crate::model::ColumnDef;
use crate::settings::CustomSetting;
use crate::settings::SettingsBackend;

/// The decoded shape of one table.
///
/// Loaded once per table and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    object_api_name: String,
    raw_fields: String,
    field_names: Vec<String>,
    filter_expression: Option<String>,
    sort_expression: Option<String>,
    columns: Vec<ColumnDef>,
}

impl TableConfig {
    /// Decodes a stored setting.
    ///
    /// `name` is only used to label a [`ConfigError::Malformed`] error.
    pub fn from_setting(name: &str, setting: CustomSetting) -> Result<Self, ConfigError> {
        let columns: Vec<ColumnDef> = serde_json::from_str(&setting.columns_configuration)
            .map_err(|e| ConfigError::malformed(name, e))?;

        Ok(Self {
            field_names: parse_field_names(&setting.field_api_names),
            object_api_name: setting.object_api_name,
            raw_fields: setting.field_api_names,
            filter_expression: setting.filtering_string,
            sort_expression: setting.sorting_string,
            columns,
        })
    }

    /// Returns the API name of the queried object.
    pub fn object_api_name(&self) -> &str {
        &self.object_api_name
    }

    /// Returns the field list exactly as stored.
    pub fn raw_fields(&self) -> &str {
        &self.raw_fields
    }

    /// Returns the trimmed field names, in configured order.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Returns the server-side filter expression.
    pub fn filter_expression(&self) -> Option<&str> {
        self.filter_expression.as_deref()
    }

    /// Returns the server-side sort expression.
    pub fn sort_expression(&self) -> Option<&str> {
        self.sort_expression.as_deref()
    }

    /// Returns the column definitions for the rendering layer.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }
}

/// Splits a comma-separated field list, trimming whitespace and dropping
/// empty entries.
pub fn parse_field_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// Looks up named custom settings and decodes them into [`TableConfig`]s.
///
/// # Example
///
/// ```ignore
/// let resolver = ConfigResolver::new(InMemorySettings::new().with_setting(
///     "Accounts",
///     CustomSetting::new("Account", "Name, Industry"),
/// ));
///
/// let config = resolver.resolve("Accounts").await?;
/// assert_eq!(config.field_names(), ["Name", "Industry"]);
/// ```
#[derive(Clone)]
pub struct ConfigResolver {
    backend: Arc<dyn SettingsBackend>,
}

impl ConfigResolver {
    /// Creates a resolver over the given settings backend.
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Creates a resolver over a shared settings backend.
    pub fn from_shared(backend: Arc<dyn SettingsBackend>) -> Self {
        Self { backend }
    }

    /// Resolves the named configuration.
    pub async fn resolve(&self, name: &str) -> Result<TableConfig, ConfigError> {
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidName);
        }

        let setting = self
            .backend
            .get_setting(name)
            .await?
            .ok_or_else(|| ConfigError::not_found(name))?;

        let config = TableConfig::from_setting(name, setting)?;
        log::debug!(
            "[config] resolved '{}': object={} fields={:?} columns={}",
            name,
            config.object_api_name,
            config.field_names,
            config.columns.len()
        );
        Ok(config)
    }
}
