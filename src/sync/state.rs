//! Per-view state record
//!
//! A view's fetched collection plus its loading/error flags. Mutated only
//! through the transition methods below, which the sync engine calls while
//! holding the watch channel's write lock.

use chrono::{DateTime, Utc};

/// What happens to displayed data while a request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPolicy {
    /// Prior data stays visible
    KeepData,
    /// Prior data is cleared and a loading message shown
    ClearData,
}

/// How a failed request is reflected in the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Surface the error, keep the previous collection
    KeepData,
    /// Surface the error, fall back to an empty collection
    ClearData,
    /// Log the failure only; the view shows no error
    LogOnly,
}

/// Loading and error behavior of one view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPolicy {
    pub on_loading: LoadingPolicy,
    pub on_error: ErrorPolicy,
}

impl SyncPolicy {
    pub const HOSPITALS: SyncPolicy = SyncPolicy {
        on_loading: LoadingPolicy::KeepData,
        on_error: ErrorPolicy::KeepData,
    };

    pub const MEDICINES: SyncPolicy = SyncPolicy {
        on_loading: LoadingPolicy::ClearData,
        on_error: ErrorPolicy::ClearData,
    };

    pub const ALERTS: SyncPolicy = SyncPolicy {
        on_loading: LoadingPolicy::KeepData,
        on_error: ErrorPolicy::LogOnly,
    };

    pub const TRENDS: SyncPolicy = SyncPolicy {
        on_loading: LoadingPolicy::KeepData,
        on_error: ErrorPolicy::LogOnly,
    };
}

/// Ephemeral state of one view's resource
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    data: T,
    loading: bool,
    error: Option<String>,
    last_synced: Option<DateTime<Utc>>,
    /// Bumped whenever `data` is replaced
    version: u64,
    /// Sequence number of the most recently issued request
    issued: u64,
}

impl<T: Default> ViewState<T> {
    /// Empty state in loading position, as on mount
    pub fn new() -> Self {
        Self {
            data: T::default(),
            loading: true,
            error: None,
            last_synced: None,
            version: 0,
            issued: 0,
        }
    }

    /// Issue a new request and return its sequence number
    pub fn begin_request(&mut self, policy: LoadingPolicy) -> u64 {
        self.issued += 1;
        self.set_loading(policy);
        self.issued
    }

    /// Whether a response for `seq` is still current
    pub fn accepts(&self, seq: u64) -> bool {
        seq == self.issued
    }

    pub fn set_loading(&mut self, policy: LoadingPolicy) {
        self.loading = true;
        if policy == LoadingPolicy::ClearData {
            self.data = T::default();
        }
    }

    pub fn set_data(&mut self, data: T, at: DateTime<Utc>) {
        self.data = data;
        self.loading = false;
        self.error = None;
        self.last_synced = Some(at);
        self.version += 1;
    }

    pub fn set_error(&mut self, message: String, policy: ErrorPolicy) {
        self.loading = false;
        match policy {
            ErrorPolicy::KeepData => {
                self.error = Some(message);
            }
            ErrorPolicy::ClearData => {
                self.error = Some(message);
                self.data = T::default();
                self.version += 1;
            }
            ErrorPolicy::LogOnly => {}
        }
    }
}

impl<T: Default> Default for ViewState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ViewState<T> {
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.last_synced
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// True once any successful response has been applied
    pub fn has_loaded(&self) -> bool {
        self.last_synced.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(items: Vec<u32>) -> ViewState<Vec<u32>> {
        let mut state = ViewState::new();
        let seq = state.begin_request(LoadingPolicy::KeepData);
        assert!(state.accepts(seq));
        state.set_data(items, Utc::now());
        state
    }

    #[test]
    fn test_mount_state_is_empty_and_loading() {
        let state: ViewState<Vec<u32>> = ViewState::new();
        assert!(state.is_loading());
        assert!(state.data().is_empty());
        assert!(state.error().is_none());
        assert!(!state.has_loaded());
    }

    #[test]
    fn test_keep_data_while_loading() {
        let mut state = loaded(vec![1, 2, 3]);
        state.begin_request(LoadingPolicy::KeepData);
        assert!(state.is_loading());
        assert_eq!(state.data(), &vec![1, 2, 3]);
    }

    #[test]
    fn test_clear_data_while_loading() {
        let mut state = loaded(vec![1, 2, 3]);
        state.begin_request(LoadingPolicy::ClearData);
        assert!(state.data().is_empty());
    }

    #[test]
    fn test_set_data_clears_error() {
        let mut state = loaded(vec![1]);
        state.set_error("down".to_string(), ErrorPolicy::KeepData);
        assert_eq!(state.error(), Some("down"));

        state.set_data(vec![4], Utc::now());
        assert!(state.error().is_none());
        assert_eq!(state.version(), 2);
    }

    #[test]
    fn test_error_policies() {
        let mut keep = loaded(vec![1, 2]);
        keep.set_error("x".into(), ErrorPolicy::KeepData);
        assert_eq!(keep.data(), &vec![1, 2]);
        assert!(!keep.is_loading());

        let mut clear = loaded(vec![1, 2]);
        clear.set_error("x".into(), ErrorPolicy::ClearData);
        assert!(clear.data().is_empty());
        assert_eq!(clear.error(), Some("x"));

        let mut quiet = loaded(vec![1, 2]);
        quiet.begin_request(LoadingPolicy::KeepData);
        quiet.set_error("x".into(), ErrorPolicy::LogOnly);
        assert!(quiet.error().is_none());
        assert!(!quiet.is_loading());
        assert_eq!(quiet.data(), &vec![1, 2]);
    }

    #[test]
    fn test_only_latest_request_is_accepted() {
        let mut state: ViewState<Vec<u32>> = ViewState::new();
        let first = state.begin_request(LoadingPolicy::KeepData);
        let second = state.begin_request(LoadingPolicy::KeepData);
        assert!(!state.accepts(first));
        assert!(state.accepts(second));
    }
}
