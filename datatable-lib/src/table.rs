//! The data table component.

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::config::ConfigResolver;
use crate::config::TableConfig;
use crate::error::Error;
use crate::error::OptionsError;
use crate::host::Host;
use crate::host::PRINT_STYLESHEET;
use crate::host::SAVE_AS_PDF_LABEL;
use crate::host::Toast;
use crate::loader::Blocked;
use crate::loader::DEFAULT_PAGE_SIZE;
use crate::loader::IncrementalLoader;
use crate::loader::LoaderState;
use crate::loader::OffsetPolicy;
use crate::loader::PageState;
use crate::model::ColumnDef;
use crate::model::Record;
use crate::query::RecordFetcher;
use crate::search;
use crate::sort;
use crate::sort::SortDirection;

/// Row count from which the table gets a fixed height.
pub const FIXED_HEIGHT_THRESHOLD: usize = 8;

/// Fixed table height, in pixels.
pub const FIXED_HEIGHT_PX: u32 = 300;

/// Options supplied by the host when the table is created.
///
/// # Example
///
/// ```
/// use datatable_lib::table::TableOptions;
///
/// let options = TableOptions::new("Opportunities")
///     .unwrap()
///     .with_lazy_loading(true)
///     .with_page_size(50);
///
/// assert!(TableOptions::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Name of the custom setting describing the table.
    pub custom_setting_name: String,
    /// Whether records are loaded page by page.
    ///
    /// Default: `false`
    pub enable_lazy_loading: bool,
    /// Records per page when lazy loading.
    ///
    /// Default: 20
    pub page_size: u32,
    /// Offset handling after a failed page load.
    ///
    /// Default: [`OffsetPolicy::Advance`]
    pub offset_policy: OffsetPolicy,
}

impl TableOptions {
    /// Creates options for the named custom setting.
    pub fn new(custom_setting_name: impl Into<String>) -> Result<Self, OptionsError> {
        let custom_setting_name = custom_setting_name.into();
        if custom_setting_name.trim().is_empty() {
            return Err(OptionsError::EmptySettingName);
        }
        Ok(Self {
            custom_setting_name,
            enable_lazy_loading: false,
            page_size: DEFAULT_PAGE_SIZE,
            offset_policy: OffsetPolicy::default(),
        })
    }

    /// Enables or disables lazy loading.
    pub fn with_lazy_loading(mut self, enabled: bool) -> Self {
        self.enable_lazy_loading = enabled;
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the offset policy.
    pub fn with_offset_policy(mut self, policy: OffsetPolicy) -> Self {
        self.offset_policy = policy;
        self
    }
}

/// Height hint for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableHeight {
    /// Size to content.
    Auto,
    /// Fixed height in pixels, with scrolling.
    Fixed(u32),
}

impl fmt::Display for TableHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("height: auto;"),
            Self::Fixed(px) => write!(f, "height: {}px;", px),
        }
    }
}

/// Result of [`DataTable::initialize`].
#[derive(Debug)]
pub enum InitOutcome {
    /// Configuration resolved and the first records are displayed.
    Ready {
        /// Number of records fetched.
        records: usize,
    },
    /// Initialization failed. A toast has been shown.
    Failed(Error),
    /// `initialize` had already been called.
    AlreadyInitialized,
    /// The table was torn down before initialization finished.
    TornDown,
}

/// Result of [`DataTable::load_more`].
#[derive(Debug)]
pub enum LoadMoreOutcome {
    /// A page was fetched and appended. A `count` of zero ends lazy loading.
    Loaded {
        /// Number of records in the page.
        count: usize,
    },
    /// Another page request is in flight; nothing was done.
    Busy,
    /// Every page has been loaded; nothing was done.
    Exhausted,
    /// Lazy loading is off for this table; nothing was done.
    Disabled,
    /// The table has not finished initializing; nothing was done.
    NotReady,
    /// The table was torn down; the fetched page was discarded.
    TornDown,
    /// The fetch failed. A toast has been shown.
    Failed(Error),
}

/// Which print path ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMethod {
    /// The host's print command.
    Command,
    /// The generic print dialog, after the command failed.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StyleState {
    NotLoaded,
    Loading,
    Loaded,
}

struct TableState {
    started: bool,
    torn_down: bool,
    show_spinner: bool,
    styles: StyleState,
    config: Option<Arc<TableConfig>>,
    loader: IncrementalLoader,
    buffer: Vec<Record>,
    displayed: Vec<Record>,
    search_term: String,
    sorted_by: Option<(String, SortDirection)>,
}

impl TableState {
    /// Rebuilds the displayed records from the buffer.
    fn refresh_displayed(&mut self) {
        let fields = self
            .config
            .as_ref()
            .map(|c| c.field_names())
            .unwrap_or_default();
        let filtered = search::search(&self.buffer, fields, &self.search_term);
        self.displayed = match &self.sorted_by {
            Some((field, direction)) => sort::sort_records(&filtered, field, *direction),
            None => filtered,
        };
    }
}

/// A configurable, lazily loaded, searchable and sortable record table.
///
/// The handle is cheap to clone (uses `Arc` internally); clones share the
/// same state. Mutable state is never locked across an `.await`, so
/// searches and sorts stay responsive while a fetch is in flight.
///
/// # Example
///
/// ```ignore
/// let table = DataTable::new(
///     TableOptions::new("Opportunities")?.with_lazy_loading(true),
///     ConfigResolver::new(settings),
///     RecordFetcher::new(source),
///     host,
/// )?;
///
/// table.initialize().await;
/// table.handle_search("acme");
/// table.handle_sort("Amount", SortDirection::Desc);
/// table.load_more().await;
/// ```
#[derive(Clone)]
pub struct DataTable {
    inner: Arc<DataTableInner>,
}

struct DataTableInner {
    options: TableOptions,
    resolver: ConfigResolver,
    fetcher: RecordFetcher,
    host: Arc<dyn Host>,
    state: Mutex<TableState>,
}

impl DataTable {
    /// Creates a table. Nothing is fetched until [`initialize`](Self::initialize).
    pub fn new(
        options: TableOptions,
        resolver: ConfigResolver,
        fetcher: RecordFetcher,
        host: impl Host + 'static,
    ) -> Result<Self, OptionsError> {
        let loader = IncrementalLoader::new(
            options.page_size,
            options.enable_lazy_loading,
            options.offset_policy,
        )?;

        Ok(Self {
            inner: Arc::new(DataTableInner {
                options,
                resolver,
                fetcher,
                host: Arc::new(host),
                state: Mutex::new(TableState {
                    started: false,
                    torn_down: false,
                    show_spinner: true,
                    styles: StyleState::NotLoaded,
                    config: None,
                    loader,
                    buffer: Vec::new(),
                    displayed: Vec::new(),
                    search_term: String::new(),
                    sorted_by: None,
                }),
            }),
        })
    }

    fn state(&self) -> MutexGuard<'_, TableState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn report(&self, error: &Error) {
        self.inner.host.show_toast(Toast::from_error(error));
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Resolves the configuration and fetches the first records.
    ///
    /// Runs once per table. On failure a toast is shown, the spinner stays
    /// on and no records are displayed.
    pub async fn initialize(&self) -> InitOutcome {
        let name = self.inner.options.custom_setting_name.clone();
        {
            let mut state = self.state();
            if state.torn_down {
                return InitOutcome::TornDown;
            }
            if state.started {
                return InitOutcome::AlreadyInitialized;
            }
            state.started = true;
        }

        let config = match self.inner.resolver.resolve(&name).await {
            Ok(config) => Arc::new(config),
            Err(e) => return self.init_failed(Error::from(e)),
        };

        let window = {
            let mut state = self.state();
            if state.torn_down {
                log::warn!("[table] '{}' torn down during config resolution", name);
                return InitOutcome::TornDown;
            }
            state.config = Some(Arc::clone(&config));
            state.loader.initial_window()
        };

        let fetched = self.inner.fetcher.fetch_with_links(&config, window).await;

        let mut state = self.state();
        if state.torn_down {
            log::warn!("[table] '{}' torn down during initial fetch", name);
            return InitOutcome::TornDown;
        }
        match fetched {
            Ok(records) => {
                let count = records.len();
                state.buffer = records;
                state.refresh_displayed();
                state.show_spinner = false;
                log::debug!("[table] '{}' ready with {} records", name, count);
                InitOutcome::Ready { records: count }
            }
            Err(e) => {
                drop(state);
                self.init_failed(Error::from(e))
            }
        }
    }

    fn init_failed(&self, error: Error) -> InitOutcome {
        if self.state().torn_down {
            return InitOutcome::TornDown;
        }
        log::error!(
            "[table] '{}' failed to initialize: {}",
            self.inner.options.custom_setting_name,
            error
        );
        self.report(&error);
        InitOutcome::Failed(error)
    }

    /// Marks the table as defunct.
    ///
    /// Fetches still in flight complete without touching the table.
    pub fn teardown(&self) {
        self.state().torn_down = true;
    }

    /// Returns `true` once [`teardown`](Self::teardown) has been called.
    pub fn is_torn_down(&self) -> bool {
        self.state().torn_down
    }

    /// Loads the print stylesheet once.
    ///
    /// Returns `true` when the stylesheet is loaded. A failed load is logged
    /// and retried on the next call.
    pub async fn ensure_styles_loaded(&self) -> bool {
        {
            let mut state = self.state();
            match state.styles {
                StyleState::Loaded => return true,
                StyleState::Loading => return false,
                StyleState::NotLoaded => state.styles = StyleState::Loading,
            }
        }

        let result = self.inner.host.load_style(PRINT_STYLESHEET).await;

        let mut state = self.state();
        match result {
            Ok(()) => {
                state.styles = StyleState::Loaded;
                log::debug!("[table] stylesheet {} loaded", PRINT_STYLESHEET);
                true
            }
            Err(e) => {
                state.styles = StyleState::NotLoaded;
                log::warn!("[table] stylesheet {} failed to load: {}", PRINT_STYLESHEET, e);
                false
            }
        }
    }

    // =========================================================================
    // User actions
    // =========================================================================

    /// Fetches the next page and appends it to the buffer.
    ///
    /// Ignored while another page request is in flight, after the result set
    /// is exhausted, when lazy loading is off, and before initialization.
    pub async fn load_more(&self) -> LoadMoreOutcome {
        let (config, window) = {
            let mut state = self.state();
            if state.torn_down {
                return LoadMoreOutcome::TornDown;
            }
            let Some(config) = state.config.clone() else {
                return LoadMoreOutcome::NotReady;
            };
            if state.show_spinner {
                return LoadMoreOutcome::NotReady;
            }
            match state.loader.begin() {
                Ok(window) => (config, window),
                Err(Blocked::Busy) => return LoadMoreOutcome::Busy,
                Err(Blocked::Exhausted) => return LoadMoreOutcome::Exhausted,
                Err(Blocked::Disabled) => return LoadMoreOutcome::Disabled,
            }
        };
        log::debug!("[table] loading more at offset {}", window.offset);

        let mut in_flight = InFlight {
            table: self,
            settled: false,
        };
        let fetched = self.inner.fetcher.fetch_with_links(&config, Some(window)).await;
        in_flight.settled = true;

        let mut state = self.state();
        if state.torn_down {
            log::warn!("[table] torn down while loading offset {}", window.offset);
            return LoadMoreOutcome::TornDown;
        }
        match fetched {
            Ok(records) => {
                let count = records.len();
                if state.loader.complete(count) == LoaderState::Exhausted {
                    log::debug!("[table] all records loaded ({})", state.buffer.len());
                }
                state.buffer.extend(records);
                state.refresh_displayed();
                LoadMoreOutcome::Loaded { count }
            }
            Err(e) => {
                state.loader.fail();
                drop(state);
                let error = Error::from(e);
                self.report(&error);
                LoadMoreOutcome::Failed(error)
            }
        }
    }

    /// Filters the buffer by `term` and displays the result.
    ///
    /// Always starts from the full buffer, so successive searches do not
    /// narrow each other. The current sort is kept. Returns the number of
    /// displayed records.
    pub fn handle_search(&self, term: &str) -> usize {
        let mut state = self.state();
        state.search_term = term.to_string();
        state.refresh_displayed();
        log::debug!(
            "[table] search {:?}: {} of {} records",
            term,
            state.displayed.len(),
            state.buffer.len()
        );
        state.displayed.len()
    }

    /// Sorts the displayed records by `field`.
    ///
    /// The sort replaces any previous one and is reapplied after later
    /// searches and page loads.
    pub fn handle_sort(&self, field: &str, direction: SortDirection) {
        let mut state = self.state();
        state.sorted_by = Some((field.to_string(), direction));
        state.refresh_displayed();
        log::debug!("[table] sorted by {} {}", field, direction);
    }

    /// Prints the table through the host, falling back to the generic
    /// print dialog if the print command fails.
    pub fn trigger_print(&self) -> PrintMethod {
        match self.inner.host.exec_print_command() {
            Ok(()) => PrintMethod::Command,
            Err(e) => {
                log::warn!("[table] print command failed, using fallback: {}", e);
                self.inner.host.window_print();
                PrintMethod::Fallback
            }
        }
    }

    // =========================================================================
    // Rendering outputs
    // =========================================================================

    /// Returns the options the table was created with.
    pub fn options(&self) -> &TableOptions {
        &self.inner.options
    }

    /// Returns the resolved configuration, once available.
    pub fn config(&self) -> Option<Arc<TableConfig>> {
        self.state().config.clone()
    }

    /// Returns `true` until the first records are displayed.
    pub fn show_spinner(&self) -> bool {
        self.state().show_spinner
    }

    /// Returns `true` while a [`load_more`](Self::load_more) request is in flight.
    pub fn is_loading_more(&self) -> bool {
        self.state().loader.is_busy()
    }

    /// Returns `true` while further pages may be requested.
    pub fn is_lazy_loading_enabled(&self) -> bool {
        self.state().loader.is_active()
    }

    /// Returns the loader state.
    pub fn loader_state(&self) -> LoaderState {
        self.state().loader.state()
    }

    /// Returns the page bookkeeping.
    pub fn page_state(&self) -> PageState {
        self.state().loader.page()
    }

    /// Returns the column definitions.
    pub fn columns(&self) -> Vec<ColumnDef> {
        self.state()
            .config
            .as_ref()
            .map(|c| c.columns().to_vec())
            .unwrap_or_default()
    }

    /// Returns the records currently displayed.
    pub fn displayed_records(&self) -> Vec<Record> {
        self.state().displayed.clone()
    }

    /// Returns every record fetched so far.
    pub fn buffer(&self) -> Vec<Record> {
        self.state().buffer.clone()
    }

    /// Returns the number of records fetched so far.
    pub fn buffer_len(&self) -> usize {
        self.state().buffer.len()
    }

    /// Returns the last search term.
    pub fn search_term(&self) -> String {
        self.state().search_term.clone()
    }

    /// Returns the last sort field and direction.
    pub fn sorted_by(&self) -> Option<(String, SortDirection)> {
        self.state().sorted_by.clone()
    }

    /// Returns the height hint for the current row count.
    pub fn table_height(&self) -> TableHeight {
        if self.state().displayed.len() < FIXED_HEIGHT_THRESHOLD {
            TableHeight::Auto
        } else {
            TableHeight::Fixed(FIXED_HEIGHT_PX)
        }
    }

    /// Returns the label of the print trigger.
    pub fn label_save_as_pdf(&self) -> &'static str {
        SAVE_AS_PDF_LABEL
    }
}

/// Settles the loader if a `load_more` future is dropped mid-fetch.
struct InFlight<'a> {
    table: &'a DataTable,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            log::warn!("[table] page request dropped before completion");
            self.table.state().loader.fail();
        }
    }
}
