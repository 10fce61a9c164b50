//! In-memory settings backend using DashMap

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use super::CustomSetting;
use super::SettingsBackend;
use crate::error::SettingsError;

/// Settings held in a concurrent hash map.
///
/// Data is lost when the process exits. Useful for tests and for hosts that
/// ship their table definitions as a JSON document.
///
/// # Example
///
/// ```
/// use datatable_lib::settings::InMemorySettings;
///
/// let settings = InMemorySettings::from_json(r#"{
///     "Opportunities": {"FieldAPINames__c": "Name", "sObjectAPIName__c": "Opportunity",
///                       "ColumnsConfiguration__c": "[]"}
/// }"#).unwrap();
///
/// assert_eq!(settings.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemorySettings {
    store: DashMap<String, CustomSetting>,
}

impl InMemorySettings {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Creates a store from a JSON object mapping names to settings.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let entries: HashMap<String, CustomSetting> = serde_json::from_str(json)?;
        Ok(entries.into_iter().collect())
    }

    /// Adds a setting (builder pattern).
    pub fn with_setting(self, name: impl Into<String>, setting: CustomSetting) -> Self {
        self.store.insert(name.into(), setting);
        self
    }

    /// Returns the number of stored settings.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if no settings are stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl FromIterator<(String, CustomSetting)> for InMemorySettings {
    fn from_iter<I: IntoIterator<Item = (String, CustomSetting)>>(iter: I) -> Self {
        Self {
            store: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl SettingsBackend for InMemorySettings {
    async fn get_setting(&self, name: &str) -> Result<Option<CustomSetting>, SettingsError> {
        Ok(self.store.get(name).map(|entry| entry.value().clone()))
    }

    async fn put_setting(&self, name: &str, setting: CustomSetting) -> Result<(), SettingsError> {
        self.store.insert(name.to_string(), setting);
        Ok(())
    }
}
