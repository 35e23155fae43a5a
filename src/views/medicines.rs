use std::sync::Arc;
use tokio::sync::watch;

use crate::client::DashboardApi;
use crate::config::PollingConfig;
use crate::endpoints::Resource;
use crate::filters::{derive_medicines, MedicineListing, Pager};
use crate::models::Medicine;
use crate::render::views;
use crate::sync::{debounced, SyncCell, SyncHandle, SyncPolicy, ViewState};

/// Medicines view: searched on the backend after the term settles, paged locally
pub struct MedicineView {
    handle: SyncHandle<Vec<Medicine>>,
    updates: watch::Receiver<ViewState<Vec<Medicine>>>,
    search: watch::Sender<String>,
    pager: Pager,
}

impl MedicineView {
    pub fn mount(api: Arc<dyn DashboardApi>, polling: &PollingConfig) -> Self {
        Self::mount_with_search(api, polling, "")
    }

    /// Mount with a search term already entered; the first fetch uses it
    pub fn mount_with_search(
        api: Arc<dyn DashboardApi>,
        polling: &PollingConfig,
        initial: &str,
    ) -> Self {
        let (search, term) = watch::channel(initial.trim().to_string());
        let limit = polling.medicine_limit;

        let cell = SyncCell::new(Resource::Medicines, SyncPolicy::MEDICINES);
        let driver = debounced(cell.clone(), polling.search_debounce(), term, move |term| {
            let api = api.clone();
            let term = term.to_string();
            async move {
                let search = (!term.is_empty()).then_some(term.as_str());
                api.fetch_medicines(search, limit).await
            }
        });
        let handle = SyncHandle::new(cell, Some(driver));

        Self {
            updates: handle.subscribe(),
            handle,
            search,
            pager: Pager::default(),
        }
    }

    pub fn term(&self) -> String {
        self.search.borrow().clone()
    }

    /// Update the search term; unchanged terms do not restart the debounce
    pub fn set_search(&mut self, term: &str) {
        let term = term.trim();
        self.search.send_if_modified(|current| {
            if current == term {
                return false;
            }
            *current = term.to_string();
            true
        });
    }

    pub fn state(&self) -> ViewState<Vec<Medicine>> {
        self.handle.snapshot()
    }

    fn sync_pager(&mut self) -> usize {
        let state = self.handle.snapshot();
        self.pager.observe(state.version());
        state.data().len()
    }

    pub fn page(&mut self) -> usize {
        self.sync_pager();
        self.pager.page()
    }

    pub fn next_page(&mut self) {
        let total = self.sync_pager();
        self.pager.next(total);
    }

    pub fn prev_page(&mut self) {
        let total = self.sync_pager();
        self.pager.prev(total);
    }

    pub fn goto_page(&mut self, page: usize) {
        let total = self.sync_pager();
        self.pager.goto(page, total);
    }

    pub fn listing(&mut self) -> MedicineListing {
        let state = self.handle.snapshot();
        self.pager.observe(state.version());
        derive_medicines(state.data(), self.pager.page())
    }

    pub fn render(&mut self) -> String {
        let state = self.handle.snapshot();
        self.pager.observe(state.version());
        views::medicines(&state, &self.term(), self.pager.page())
    }

    pub async fn changed(&mut self) {
        if self.updates.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
