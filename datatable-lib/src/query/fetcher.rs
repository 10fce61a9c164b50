//! Query construction and execution.

use std::sync::Arc;

use super::RecordQuery;
use super::RecordSource;
use super::Window;
use crate::config::TableConfig;
use crate::error::FetchError;
use crate::link;
use crate::model::Record;

/// Builds [`RecordQuery`]s from a table configuration and runs them.
///
/// Failures are returned as-is; nothing is retried.
#[derive(Clone)]
pub struct RecordFetcher {
    source: Arc<dyn RecordSource>,
}

impl RecordFetcher {
    /// Creates a fetcher over the given record source.
    pub fn new(source: impl RecordSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Creates a fetcher over a shared record source.
    pub fn from_shared(source: Arc<dyn RecordSource>) -> Self {
        Self { source }
    }

    /// Builds the query for a configuration and optional window.
    ///
    /// Without a window the limit and offset stay `None` so the service
    /// returns the whole result set.
    pub fn query_for(config: &TableConfig, window: Option<Window>) -> RecordQuery {
        let query = RecordQuery {
            field_names: config.raw_fields().to_string(),
            object_api_name: config.object_api_name().to_string(),
            filter: config.filter_expression().map(str::to_string),
            sorting_params: config.sort_expression().map(str::to_string),
            limit_size: None,
            offset: None,
        };
        match window {
            Some(window) => query.with_window(window),
            None => query,
        }
    }

    /// Fetches records for a configuration.
    pub async fn fetch(
        &self,
        config: &TableConfig,
        window: Option<Window>,
    ) -> Result<Vec<Record>, FetchError> {
        let query = Self::query_for(config, window);
        log::debug!(
            "[fetch] {} window={:?}",
            query.object_api_name,
            query.window()
        );

        let records = self.source.get_records(&query).await.inspect_err(|e| {
            log::warn!("[fetch] {} failed: {}", query.object_api_name, e);
        })?;

        log::debug!("[fetch] {} returned {} records", query.object_api_name, records.len());
        Ok(records)
    }

    /// Fetches records and decorates each with its navigation link.
    pub async fn fetch_with_links(
        &self,
        config: &TableConfig,
        window: Option<Window>,
    ) -> Result<Vec<Record>, FetchError> {
        self.fetch(config, window).await.map(link::decorate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CustomSetting;

    fn config() -> TableConfig {
        TableConfig::from_setting(
            "Deals",
            CustomSetting::new("Opportunity", "Name,Amount")
                .with_filter("Amount > 0")
                .with_sorting("Name ASC"),
        )
        .unwrap()
    }

    #[test]
    fn test_query_without_window_has_null_paging() {
        let query = RecordFetcher::query_for(&config(), None);

        assert_eq!(query.field_names, "Name,Amount");
        assert_eq!(query.object_api_name, "Opportunity");
        assert_eq!(query.filter.as_deref(), Some("Amount > 0"));
        assert_eq!(query.sorting_params.as_deref(), Some("Name ASC"));
        assert_eq!(query.limit_size, None);
        assert_eq!(query.offset, None);
    }

    #[test]
    fn test_query_with_window() {
        let query = RecordFetcher::query_for(&config(), Some(Window::new(20, 20)));

        assert_eq!(query.limit_size, Some(20));
        assert_eq!(query.offset, Some(20));
    }
}
