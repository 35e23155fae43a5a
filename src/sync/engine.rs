//! Data-Sync Engine
//!
//! A [`SyncCell`] owns one view's [`ViewState`] behind a `tokio::sync::watch`
//! channel. Drivers decide *when* to fetch (fixed interval, debounced input,
//! input change plus interval, once); [`dispatch`] runs each fetch as its own
//! task that only holds a weak reference to the cell.
//!
//! Every request gets a sequence number. Only the response to the most
//! recently issued request is applied; older ones are dropped. Requests
//! already in flight are never aborted.

use chrono::Utc;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::state::{ErrorPolicy, SyncPolicy, ViewState};
use crate::client::ClientResult;
use crate::endpoints::Resource;

/// Shared owner of one view's state
pub struct SyncCell<T> {
    resource: Resource,
    policy: SyncPolicy,
    state: watch::Sender<ViewState<T>>,
    closed: AtomicBool,
}

impl<T> SyncCell<T>
where
    T: Default + Send + Sync + 'static,
{
    pub fn new(resource: Resource, policy: SyncPolicy) -> Arc<Self> {
        let (state, _) = watch::channel(ViewState::new());
        Arc::new(Self {
            resource,
            policy,
            state,
            closed: AtomicBool::new(false),
        })
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.subscribe()
    }

    /// Issue a request: bump the sequence number and enter loading
    pub fn begin(&self) -> u64 {
        let on_loading = self.policy.on_loading;
        let mut seq = 0;
        self.state.send_modify(|state| {
            seq = state.begin_request(on_loading);
        });
        tracing::debug!(resource = %self.resource, seq, "Request issued");
        seq
    }

    /// Apply the outcome of request `seq`.
    ///
    /// Returns `false` when the response was discarded because the view was
    /// torn down or a newer request has been issued since.
    pub fn complete(&self, seq: u64, result: ClientResult<T>) -> bool {
        if self.closed.load(Ordering::Acquire) {
            tracing::debug!(resource = %self.resource, seq, "Response after teardown discarded");
            return false;
        }

        let resource = self.resource;
        let on_error = self.policy.on_error;

        self.state.send_if_modified(|state| {
            if !state.accepts(seq) {
                tracing::debug!(resource = %resource, seq, "Stale response discarded");
                return false;
            }

            match result {
                Ok(data) => {
                    state.set_data(data, Utc::now());
                }
                Err(e) => {
                    match on_error {
                        ErrorPolicy::LogOnly => {
                            tracing::warn!(resource = %resource, error = %e, "Fetch failed");
                        }
                        _ => {
                            tracing::error!(resource = %resource, error = %e, "Fetch failed");
                        }
                    }
                    state.set_error(e.to_string(), on_error);
                }
            }
            true
        })
    }

    /// Stop accepting responses
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl<T> SyncCell<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    /// Current state
    pub fn snapshot(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }
}

/// Start one fetch for `cell`; the response is applied when it arrives
pub fn dispatch<T, Fut>(cell: &Arc<SyncCell<T>>, fetch: Fut)
where
    T: Default + Send + Sync + 'static,
    Fut: Future<Output = ClientResult<T>> + Send + 'static,
{
    let seq = cell.begin();
    let weak: Weak<SyncCell<T>> = Arc::downgrade(cell);
    let resource = cell.resource();

    tokio::spawn(async move {
        let result = fetch.await;
        match weak.upgrade() {
            Some(cell) => {
                cell.complete(seq, result);
            }
            None => {
                tracing::debug!(resource = %resource, seq, "Response after teardown discarded");
            }
        }
    });
}

/// Fetch immediately, then every `period`
pub fn poll_every<T, F, Fut>(cell: Arc<SyncCell<T>>, period: Duration, mut fetch: F) -> JoinHandle<()>
where
    T: Default + Send + Sync + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ClientResult<T>> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            dispatch(&cell, fetch());
        }
    })
}

/// Fetch immediately, then every `period` or as soon as `input` changes.
///
/// A changed input restarts the interval.
pub fn poll_on_change<T, I, F, Fut>(
    cell: Arc<SyncCell<T>>,
    period: Duration,
    mut input: watch::Receiver<I>,
    mut fetch: F,
) -> JoinHandle<()>
where
    T: Default + Send + Sync + 'static,
    I: Clone + Send + Sync + 'static,
    F: FnMut(&I) -> Fut + Send + 'static,
    Fut: Future<Output = ClientResult<T>> + Send + 'static,
{
    tokio::spawn(async move {
        let mut input_open = true;

        loop {
            let current = input.borrow_and_update().clone();
            dispatch(&cell, fetch(&current));

            let deadline = Instant::now() + period;
            loop {
                tokio::select! {
                    _ = tokio::time::sleep_until(deadline) => break,
                    changed = input.changed(), if input_open => {
                        if changed.is_ok() {
                            break;
                        }
                        input_open = false;
                    }
                }
            }
        }
    })
}

/// Fetch immediately, then once `input` has been stable for `window`.
///
/// Each change restarts the window. An empty input fetches without waiting.
/// Without input changes nothing is refetched.
pub fn debounced<T, F, Fut>(
    cell: Arc<SyncCell<T>>,
    window: Duration,
    mut input: watch::Receiver<String>,
    mut fetch: F,
) -> JoinHandle<()>
where
    T: Default + Send + Sync + 'static,
    F: FnMut(&str) -> Fut + Send + 'static,
    Fut: Future<Output = ClientResult<T>> + Send + 'static,
{
    tokio::spawn(async move {
        let initial = input.borrow_and_update().clone();
        dispatch(&cell, fetch(&initial));

        loop {
            if input.changed().await.is_err() {
                break;
            }
            let mut term = input.borrow_and_update().clone();

            while !term.is_empty() {
                tokio::select! {
                    _ = tokio::time::sleep(window) => break,
                    changed = input.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        term = input.borrow_and_update().clone();
                    }
                }
            }

            dispatch(&cell, fetch(&term));
        }
    })
}

/// Owning handle of a mounted view resource.
///
/// Dropping the handle tears the view down: its driver task (and with it any
/// pending interval or debounce timer) is aborted and late responses are
/// discarded.
pub struct SyncHandle<T> {
    cell: Arc<SyncCell<T>>,
    driver: Option<JoinHandle<()>>,
}

impl<T> SyncHandle<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    pub fn new(cell: Arc<SyncCell<T>>, driver: Option<JoinHandle<()>>) -> Self {
        Self { cell, driver }
    }

    /// Mount a resource that is fetched once per activation
    pub fn once<Fut>(resource: Resource, policy: SyncPolicy, fetch: Fut) -> Self
    where
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let cell = SyncCell::new(resource, policy);
        dispatch(&cell, fetch);
        Self::new(cell, None)
    }

    pub fn resource(&self) -> Resource {
        self.cell.resource()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.cell.subscribe()
    }

    pub fn snapshot(&self) -> ViewState<T> {
        self.cell.snapshot()
    }
}

impl<T> Drop for SyncHandle<T> {
    fn drop(&mut self) {
        self.cell.closed.store(true, Ordering::Release);
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
        tracing::debug!(resource = %self.cell.resource, "View resource torn down");
    }
}
