use std::sync::Arc;
use tokio::sync::watch;

use crate::client::DashboardApi;
use crate::config::PollingConfig;
use crate::endpoints::Resource;
use crate::filters::{derive_hospitals, HospitalListing};
use crate::models::Hospital;
use crate::render::{views, ChartRenderer};
use crate::sync::{poll_every, SyncCell, SyncHandle, SyncPolicy, ViewState};

/// Hospitals view: polled on a fixed interval, searched locally
pub struct HospitalView {
    handle: SyncHandle<Vec<Hospital>>,
    updates: watch::Receiver<ViewState<Vec<Hospital>>>,
    term: String,
}

impl HospitalView {
    pub fn mount(api: Arc<dyn DashboardApi>, polling: &PollingConfig) -> Self {
        let cell = SyncCell::new(Resource::Hospitals, SyncPolicy::HOSPITALS);
        let driver = poll_every(cell.clone(), polling.hospital_refresh(), move || {
            let api = api.clone();
            async move { api.fetch_hospitals().await }
        });
        let handle = SyncHandle::new(cell, Some(driver));

        Self {
            updates: handle.subscribe(),
            handle,
            term: String::new(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn set_search(&mut self, term: &str) {
        self.term = term.trim().to_string();
    }

    pub fn state(&self) -> ViewState<Vec<Hospital>> {
        self.handle.snapshot()
    }

    pub fn listing(&self) -> HospitalListing {
        derive_hospitals(self.handle.snapshot().data(), &self.term)
    }

    pub fn render(&self, chart: &dyn ChartRenderer) -> String {
        views::hospitals(&self.handle.snapshot(), &self.term, chart)
    }

    /// Resolves on the next state change
    pub async fn changed(&mut self) {
        if self.updates.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fake::FakeApi;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_mount_fetches_and_search_filters_locally() {
        let api = FakeApi::new();
        let mut view = HospitalView::mount(api.clone(), &PollingConfig::default());

        tokio::time::timeout(Duration::from_secs(1), view.changed())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(view.listing().hospitals.len(), 3);

        view.set_search("delhi");
        assert_eq!(view.listing().hospitals.len(), 1);
        assert_eq!(api.calls("hospitals"), 1);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(api.calls("hospitals"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_stops_polling() {
        let api = FakeApi::new();
        let view = HospitalView::mount(api.clone(), &PollingConfig::default());
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(view);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(api.calls("hospitals"), 1);
    }
}
