//! SQLite settings backend with in-memory cache.

use std::path::Path;

use async_sqlite::Client;
use async_sqlite::rusqlite;
use async_sqlite::rusqlite::OptionalExtension;
use async_trait::async_trait;
use dashmap::DashMap;

use super::CustomSetting;
use super::SettingsBackend;
use crate::error::SettingsError;

/// SQLite-backed custom setting storage with DashMap cache.
///
/// Each setting is one row of the `custom_settings` table, one column per
/// setting field.
pub struct SqliteSettings {
    client: Client,
    cache: DashMap<String, CustomSetting>,
}

impl SqliteSettings {
    /// Opens (or creates) a settings database at the given path.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let client = async_sqlite::ClientBuilder::new()
            .path(path)
            .open()
            .await?;

        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS custom_settings (
                        name TEXT PRIMARY KEY,
                        field_api_names TEXT NOT NULL,
                        filtering_string TEXT,
                        object_api_name TEXT NOT NULL,
                        sorting_string TEXT,
                        columns_configuration TEXT NOT NULL
                    )",
                    [],
                )
            })
            .await?;

        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteSettings {
    async fn get_setting(&self, name: &str) -> Result<Option<CustomSetting>, SettingsError> {
        if let Some(setting) = self.cache.get(name) {
            return Ok(Some(setting.clone()));
        }

        let name_owned = name.to_string();
        let result = self
            .client
            .conn(move |conn| {
                conn.query_row(
                    "SELECT field_api_names, filtering_string, object_api_name,
                            sorting_string, columns_configuration
                     FROM custom_settings WHERE name = ?",
                    [&name_owned],
                    |row| {
                        Ok(CustomSetting {
                            field_api_names: row.get(0)?,
                            filtering_string: row.get(1)?,
                            object_api_name: row.get(2)?,
                            sorting_string: row.get(3)?,
                            columns_configuration: row.get(4)?,
                        })
                    },
                )
                .optional()
            })
            .await?;

        if let Some(ref setting) = result {
            self.cache.insert(name.to_string(), setting.clone());
        }

        Ok(result)
    }

    async fn put_setting(&self, name: &str, setting: CustomSetting) -> Result<(), SettingsError> {
        let name_owned = name.to_string();
        let row = setting.clone();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO custom_settings (name, field_api_names, filtering_string,
                         object_api_name, sorting_string, columns_configuration)
                     VALUES (?, ?, ?, ?, ?, ?)
                     ON CONFLICT(name) DO UPDATE SET
                         field_api_names = excluded.field_api_names,
                         filtering_string = excluded.filtering_string,
                         object_api_name = excluded.object_api_name,
                         sorting_string = excluded.sorting_string,
                         columns_configuration = excluded.columns_configuration",
                    rusqlite::params![
                        &name_owned,
                        &row.field_api_names,
                        &row.filtering_string,
                        &row.object_api_name,
                        &row.sorting_string,
                        &row.columns_configuration,
                    ],
                )
            })
            .await?;

        self.cache.insert(name.to_string(), setting);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "datatable-settings-{}-{}.db",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[tokio::test]
    async fn test_round_trip_through_database() {
        let path = temp_db("round-trip");
        let setting = CustomSetting::new("Opportunity", "Name, Amount")
            .with_filter("Amount > 0")
            .with_columns(r#"[{"label":"Name","fieldName":"Name"}]"#);

        {
            let store = SqliteSettings::new(&path).await.unwrap();
            store.put_setting("Deals", setting.clone()).await.unwrap();
        }

        // A fresh handle has an empty cache and must read from disk.
        let store = SqliteSettings::new(&path).await.unwrap();
        assert_eq!(store.get_setting("Deals").await.unwrap(), Some(setting.clone()));
        assert_eq!(store.get_setting("Missing").await.unwrap(), None);

        let updated = setting.with_sorting("Name ASC");
        store.put_setting("Deals", updated.clone()).await.unwrap();
        drop(store);

        let store = SqliteSettings::new(&path).await.unwrap();
        assert_eq!(store.get_setting("Deals").await.unwrap(), Some(updated));

        let _ = std::fs::remove_file(&path);
    }
}
