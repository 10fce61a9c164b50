//! Incremental (lazy) loading state.
//!
//! [`IncrementalLoader`] tracks the limit/offset window and whether more
//! pages may be requested:
//!
//! ```text
//!   Idle ──begin──▶ Loading ──complete(n > 0)──▶ Idle
//!                      │
//!                      ├──complete(0)──▶ Exhausted (terminal)
//!                      └──fail──▶ Idle
//! ```
//!
//! The loader does no I/O. The caller fetches the window returned by
//! [`begin`](IncrementalLoader::begin) and reports the outcome.

use crate::error::OptionsError;
use crate::query::Window;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// What happens to the offset when a page fails to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OffsetPolicy {
    /// Keep the advanced offset. A retry requests the page after the failed
    /// one, so the failed page is never shown.
    #[default]
    Advance,
    /// Restore the offset to its value before the failed request, so a retry
    /// requests the same page again.
    Rollback,
}

/// Limit/offset bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// Records per page. Always greater than zero.
    pub limit: u32,
    /// Start of the most recently requested page.
    pub offset: u32,
    /// Whether further pages may be requested.
    pub lazy_loading_active: bool,
}

/// Loader state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    /// Ready to load the next page.
    Idle,
    /// A page request is in flight.
    Loading,
    /// A page came back empty; no further pages will be requested.
    Exhausted,
}

/// Why [`IncrementalLoader::begin`] refused to start a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocked {
    /// Lazy loading was never enabled for this table.
    Disabled,
    /// A request is already in flight.
    Busy,
    /// The result set has been fully loaded.
    Exhausted,
}

/// Offset/limit state machine for lazily loaded tables.
#[derive(Debug, Clone)]
pub struct IncrementalLoader {
    page: PageState,
    state: LoaderState,
    policy: OffsetPolicy,
    offset_before_request: u32,
}

impl IncrementalLoader {
    /// Creates a loader.
    ///
    /// Fails if `limit` is zero.
    pub fn new(limit: u32, lazy_loading: bool, policy: OffsetPolicy) -> Result<Self, OptionsError> {
        if limit == 0 {
            return Err(OptionsError::ZeroPageSize);
        }
        Ok(Self {
            page: PageState {
                limit,
                offset: 0,
                lazy_loading_active: lazy_loading,
            },
            state: LoaderState::Idle,
            policy,
            offset_before_request: 0,
        })
    }

    /// Creates a loader with lazy loading turned off.
    pub fn disabled() -> Self {
        Self {
            page: PageState {
                limit: DEFAULT_PAGE_SIZE,
                offset: 0,
                lazy_loading_active: false,
            },
            state: LoaderState::Idle,
            policy: OffsetPolicy::Advance,
            offset_before_request: 0,
        }
    }

    /// Returns the window for the first page, or `None` when lazy loading is
    /// off and the whole result set should be fetched.
    pub fn initial_window(&self) -> Option<Window> {
        self.page
            .lazy_loading_active
            .then(|| Window::new(self.page.limit, self.page.offset))
    }

    /// Starts loading the next page.
    ///
    /// Advances the offset by one page and returns the window to fetch.
    pub fn begin(&mut self) -> Result<Window, Blocked> {
        match self.state {
            LoaderState::Loading => return Err(Blocked::Busy),
            LoaderState::Exhausted => return Err(Blocked::Exhausted),
            LoaderState::Idle if !self.page.lazy_loading_active => return Err(Blocked::Disabled),
            LoaderState::Idle => {}
        }

        self.offset_before_request = self.page.offset;
        self.page.offset = self.page.offset.saturating_add(self.page.limit);
        self.state = LoaderState::Loading;
        Ok(Window::new(self.page.limit, self.page.offset))
    }

    /// Records a successful page load of `count` records.
    pub fn complete(&mut self, count: usize) -> LoaderState {
        if self.state != LoaderState::Loading {
            return self.state;
        }
        if count == 0 {
            self.page.lazy_loading_active = false;
            self.state = LoaderState::Exhausted;
        } else {
            self.state = LoaderState::Idle;
        }
        self.state
    }

    /// Records a failed page load.
    pub fn fail(&mut self) {
        if self.state != LoaderState::Loading {
            return;
        }
        if self.policy == OffsetPolicy::Rollback {
            self.page.offset = self.offset_before_request;
        }
        self.state = LoaderState::Idle;
    }

    /// Returns the current state.
    pub fn state(&self) -> LoaderState {
        self.state
    }

    /// Returns the page bookkeeping.
    pub fn page(&self) -> PageState {
        self.page
    }

    /// Returns `true` while a page request is in flight.
    pub fn is_busy(&self) -> bool {
        self.state == LoaderState::Loading
    }

    /// Returns `true` if further pages may be requested.
    pub fn is_active(&self) -> bool {
        self.page.lazy_loading_active
    }

    /// Returns the offset policy.
    pub fn policy(&self) -> OffsetPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lazy() -> IncrementalLoader {
        IncrementalLoader::new(20, true, OffsetPolicy::Advance).unwrap()
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert_eq!(
            IncrementalLoader::new(0, true, OffsetPolicy::Advance).unwrap_err(),
            OptionsError::ZeroPageSize
        );
    }

    #[test]
    fn test_initial_window() {
        assert_eq!(lazy().initial_window(), Some(Window::new(20, 0)));
        assert_eq!(IncrementalLoader::disabled().initial_window(), None);
    }

    #[test]
    fn test_begin_advances_by_limit() {
        let mut loader = lazy();

        assert_eq!(loader.begin(), Ok(Window::new(20, 20)));
        assert!(loader.is_busy());
        assert_eq!(loader.complete(20), LoaderState::Idle);

        assert_eq!(loader.begin(), Ok(Window::new(20, 40)));
        assert_eq!(loader.page().offset, 40);
    }

    #[test]
    fn test_begin_while_loading_is_busy() {
        let mut loader = lazy();
        loader.begin().unwrap();

        assert_eq!(loader.begin(), Err(Blocked::Busy));
        assert_eq!(loader.page().offset, 20);
    }

    #[test]
    fn test_empty_page_exhausts_permanently() {
        let mut loader = lazy();
        loader.begin().unwrap();

        assert_eq!(loader.complete(0), LoaderState::Exhausted);
        assert!(!loader.is_active());
        assert!(!loader.is_busy());

        for _ in 0..3 {
            assert_eq!(loader.begin(), Err(Blocked::Exhausted));
        }
        assert_eq!(loader.page().offset, 20);

        // Stray completions cannot revive it.
        assert_eq!(loader.complete(5), LoaderState::Exhausted);
        loader.fail();
        assert_eq!(loader.state(), LoaderState::Exhausted);
    }

    #[test]
    fn test_disabled_never_begins() {
        let mut loader = IncrementalLoader::new(20, false, OffsetPolicy::Advance).unwrap();
        assert_eq!(loader.begin(), Err(Blocked::Disabled));
        assert_eq!(loader.page().offset, 0);
    }

    #[test]
    fn test_failure_keeps_offset_advanced() {
        let mut loader = lazy();
        loader.begin().unwrap();
        loader.fail();

        assert_eq!(loader.state(), LoaderState::Idle);
        assert_eq!(loader.page().offset, 20);
        assert_eq!(loader.begin(), Ok(Window::new(20, 40)));
    }

    #[test]
    fn test_failure_with_rollback_policy() {
        let mut loader = IncrementalLoader::new(10, true, OffsetPolicy::Rollback).unwrap();
        loader.begin().unwrap();
        loader.complete(10);
        loader.begin().unwrap();
        loader.fail();

        assert_eq!(loader.page().offset, 10);
        assert_eq!(loader.begin(), Ok(Window::new(10, 20)));
    }
}
