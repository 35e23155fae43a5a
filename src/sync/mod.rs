//! Polling data-sync
//!
//! Keeps each view's resource fresh without user interaction:
//!
//! - [`poll_every`]: fixed-interval refresh (hospitals)
//! - [`debounced`]: refetch after input settles (medicine search)
//! - [`poll_on_change`]: interval plus immediate refetch on input change (alerts)
//! - [`SyncHandle::once`]: single fetch per activation (shortage trends)

mod engine;
mod state;

pub use engine::{debounced, dispatch, poll_every, poll_on_change, SyncCell, SyncHandle};
pub use state::{ErrorPolicy, LoadingPolicy, SyncPolicy, ViewState};
