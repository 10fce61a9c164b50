//! In-memory record source

use std::sync::Mutex;
use std::sync::PoisonError;

use async_trait::async_trait;
use dashmap::DashMap;

use super::RecordQuery;
use super::RecordSource;
use crate::config::parse_field_names;
use crate::error::FetchError;
use crate::model::ID_FIELD;
use crate::model::Record;

/// A record source serving fixed record sets from memory.
///
/// Records are grouped by object API name and returned in insertion order.
/// Field restriction and windowing are applied; the filter and sort
/// expressions are not interpreted. Every query is kept so callers can
/// inspect what was asked.
///
/// # Example
///
/// ```
/// use datatable_lib::model::Record;
/// use datatable_lib::query::InMemoryRecordSource;
///
/// let source = InMemoryRecordSource::new()
///     .with_records("Account", vec![Record::new().set("Id", "001").set("Name", "Acme")]);
///
/// assert_eq!(source.record_count("Account"), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRecordSource {
    records: DashMap<String, Vec<Record>>,
    queries: Mutex<Vec<RecordQuery>>,
}

impl InMemoryRecordSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds records for an object (builder pattern).
    pub fn with_records(self, object_api_name: impl Into<String>, records: Vec<Record>) -> Self {
        self.records
            .entry(object_api_name.into())
            .or_default()
            .extend(records);
        self
    }

    /// Returns the number of records held for an object.
    pub fn record_count(&self, object_api_name: &str) -> usize {
        self.records.get(object_api_name).map_or(0, |r| r.len())
    }

    /// Returns every query received so far.
    pub fn queries(&self) -> Vec<RecordQuery> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    async fn get_records(&self, query: &RecordQuery) -> Result<Vec<Record>, FetchError> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());

        let Some(records) = self.records.get(&query.object_api_name) else {
            return Err(FetchError::remote(format!(
                "sObject type '{}' is not supported",
                query.object_api_name
            )));
        };

        let fields = parse_field_names(&query.field_names);
        let (skip, take) = match query.window() {
            Some(window) => (window.offset as usize, window.limit as usize),
            None => (0, usize::MAX),
        };

        Ok(records
            .iter()
            .skip(skip)
            .take(take)
            .map(|record| restrict(record, &fields))
            .collect())
    }
}

/// Keeps the identity field and the requested fields.
fn restrict(record: &Record, fields: &[String]) -> Record {
    let mut out = Record {
        object_type: record.object_type.clone(),
        ..Record::default()
    };
    for (key, value) in record.fields() {
        if key == ID_FIELD || fields.iter().any(|f| f == key) {
            out.insert(key.clone(), value.clone());
        }
    }
    out
}
