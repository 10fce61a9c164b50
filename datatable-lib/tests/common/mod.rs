//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use datatable_lib::DataTable;
use datatable_lib::TableOptions;
use datatable_lib::config::ConfigResolver;
use datatable_lib::error::FetchError;
use datatable_lib::error::HostError;
use datatable_lib::host::Host;
use datatable_lib::host::Toast;
use datatable_lib::model::Record;
use datatable_lib::query::RecordFetcher;
use datatable_lib::query::RecordQuery;
use datatable_lib::query::RecordSource;
use datatable_lib::settings::CustomSetting;
use datatable_lib::settings::InMemorySettings;
use tokio::sync::Notify;

pub const SETTING: &str = "Opportunities";

pub fn settings() -> InMemorySettings {
    InMemorySettings::new().with_setting(
        SETTING,
        CustomSetting::new("Opportunity", "Name, Amount")
            .with_filter("IsClosed = false")
            .with_sorting("CloseDate DESC")
            .with_columns(
                r#"[{"label":"Name","fieldName":"urlLink","type":"url",
                     "typeAttributes":{"label":{"fieldName":"Name"}}},
                    {"label":"Amount","fieldName":"Amount","type":"currency"}]"#,
            ),
    )
}

pub fn record(id: &str, name: &str, amount: i64) -> Record {
    Record::of_type("Opportunity")
        .set("Id", id)
        .set("Name", name)
        .set("Amount", amount)
}

pub fn page(start: usize, len: usize) -> Vec<Record> {
    (start..start + len)
        .map(|i| record(&format!("006{:03}", i), &format!("Deal {}", i), i as i64 * 100))
        .collect()
}

pub fn ids(records: &[Record]) -> Vec<String> {
    records.iter().filter_map(Record::id).collect()
}

// =============================================================================
// Record sources
// =============================================================================

/// Answers each query with the next scripted response and keeps every query.
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<Record>, FetchError>>>,
    queries: Mutex<Vec<RecordQuery>>,
}

impl ScriptedSource {
    pub fn new(responses: impl IntoIterator<Item = Result<Vec<Record>, FetchError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<RecordQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordSource for ScriptedSource {
    async fn get_records(&self, query: &RecordQuery) -> Result<Vec<Record>, FetchError> {
        self.queries.lock().unwrap().push(query.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Like [`ScriptedSource`], but holds every request after the first until
/// [`release`](Self::release) is called.
pub struct GatedSource {
    inner: Arc<ScriptedSource>,
    gate: Notify,
    calls: AtomicUsize,
}

impl GatedSource {
    pub fn new(responses: impl IntoIterator<Item = Result<Vec<Record>, FetchError>>) -> Arc<Self> {
        Arc::new(Self {
            inner: ScriptedSource::new(responses),
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn queries(&self) -> Vec<RecordQuery> {
        self.inner.queries()
    }
}

#[async_trait]
impl RecordSource for GatedSource {
    async fn get_records(&self, query: &RecordQuery) -> Result<Vec<Record>, FetchError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) > 0 {
            self.gate.notified().await;
        }
        self.inner.get_records(query).await
    }
}

// =============================================================================
// Host
// =============================================================================

/// Everything a [`RecordingHost`] has seen.
#[derive(Default)]
pub struct HostLog {
    pub toasts: Mutex<Vec<Toast>>,
    pub style_loads: AtomicUsize,
    pub style_failures_left: AtomicUsize,
    pub print_command_fails: AtomicBool,
    pub window_prints: AtomicUsize,
}

/// Records toasts and print calls; style loads fail a set number of times.
#[derive(Clone, Default)]
pub struct RecordingHost(Arc<HostLog>);

impl RecordingHost {
    pub fn toasts(&self) -> Vec<Toast> {
        self.0.toasts.lock().unwrap().clone()
    }
}

impl Deref for RecordingHost {
    type Target = HostLog;

    fn deref(&self) -> &HostLog {
        &self.0
    }
}

#[async_trait]
impl Host for RecordingHost {
    async fn load_style(&self, _url: &str) -> Result<(), HostError> {
        self.style_loads.fetch_add(1, Ordering::SeqCst);
        let left = self.style_failures_left.load(Ordering::SeqCst);
        if left > 0 {
            self.style_failures_left.store(left - 1, Ordering::SeqCst);
            return Err(HostError::new("resource not found"));
        }
        Ok(())
    }

    fn exec_print_command(&self) -> Result<(), HostError> {
        if self.print_command_fails.load(Ordering::SeqCst) {
            Err(HostError::new("execCommand is not supported"))
        } else {
            Ok(())
        }
    }

    fn window_print(&self) {
        self.window_prints.fetch_add(1, Ordering::SeqCst);
    }

    fn show_toast(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

// =============================================================================
// Table construction
// =============================================================================

pub fn build_table(
    options: TableOptions,
    source: Arc<dyn RecordSource>,
    host: RecordingHost,
) -> DataTable {
    DataTable::new(
        options,
        ConfigResolver::new(settings()),
        RecordFetcher::from_shared(source),
        host,
    )
    .unwrap()
}

pub fn lazy_options() -> TableOptions {
    TableOptions::new(SETTING).unwrap().with_lazy_loading(true)
}

pub fn eager_options() -> TableOptions {
    TableOptions::new(SETTING).unwrap()
}
