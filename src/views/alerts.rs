use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;

use crate::client::{ClientResult, DashboardApi};
use crate::config::PollingConfig;
use crate::endpoints::Resource;
use crate::filters::{derive_alerts, AlertDigest};
use crate::models::{AlertFeed, AlertFilter, ShortageTrend};
use crate::render::{views, ChartRenderer};
use crate::sync::{poll_on_change, SyncCell, SyncHandle, SyncPolicy, ViewState};

/// Alerts view: polled on an interval and refetched when the type filter
/// changes; shortage trends are fetched once per mount
pub struct AlertView {
    alerts: SyncHandle<AlertFeed>,
    trends: SyncHandle<ShortageTrend>,
    alert_updates: watch::Receiver<ViewState<AlertFeed>>,
    trend_updates: watch::Receiver<ViewState<ShortageTrend>>,
    filter: watch::Sender<AlertFilter>,
}

impl AlertView {
    pub fn mount(api: Arc<dyn DashboardApi>, polling: &PollingConfig) -> Self {
        Self::mount_with_filter(api, polling, AlertFilter::All)
    }

    pub fn mount_with_filter(
        api: Arc<dyn DashboardApi>,
        polling: &PollingConfig,
        initial: AlertFilter,
    ) -> Self {
        let (filter, selected) = watch::channel(initial);

        let cell = SyncCell::new(Resource::Alerts, SyncPolicy::ALERTS);
        let fetch_api = api.clone();
        let driver = poll_on_change(cell.clone(), polling.alert_refresh(), selected, move |filter| {
            fetch_feed(fetch_api.clone(), *filter)
        });
        let alerts = SyncHandle::new(cell, Some(driver));

        let trends = SyncHandle::once(Resource::ShortageTrends, SyncPolicy::TRENDS, async move {
            api.fetch_shortage_trends().await
        });

        Self {
            alert_updates: alerts.subscribe(),
            trend_updates: trends.subscribe(),
            alerts,
            trends,
            filter,
        }
    }

    pub fn filter(&self) -> AlertFilter {
        *self.filter.borrow()
    }

    /// Change the type selector; a different value refetches immediately
    pub fn set_filter(&mut self, filter: AlertFilter) {
        self.filter.send_if_modified(|current| {
            if *current == filter {
                return false;
            }
            *current = filter;
            true
        });
    }

    pub fn state(&self) -> ViewState<AlertFeed> {
        self.alerts.snapshot()
    }

    pub fn trends(&self) -> ViewState<ShortageTrend> {
        self.trends.snapshot()
    }

    pub fn digest(&self) -> AlertDigest {
        derive_alerts(self.alerts.snapshot().data(), self.filter())
    }

    pub fn render(&self, chart: &dyn ChartRenderer) -> String {
        views::alerts(
            &self.alerts.snapshot(),
            &self.trends.snapshot(),
            self.filter(),
            Utc::now(),
            chart,
        )
    }

    pub async fn changed(&mut self) {
        tokio::select! {
            res = self.alert_updates.changed() => {
                if res.is_err() {
                    std::future::pending::<()>().await;
                }
            }
            res = self.trend_updates.changed() => {
                if res.is_err() {
                    std::future::pending::<()>().await;
                }
            }
        }
    }
}

/// Fetch the selected alerts and, when narrowed, the unfiltered feed as well
async fn fetch_feed(api: Arc<dyn DashboardApi>, filter: AlertFilter) -> ClientResult<AlertFeed> {
    match filter {
        AlertFilter::All => Ok(AlertFeed::unfiltered(api.fetch_alerts(filter).await?)),
        AlertFilter::Only(_) => {
            let (selected, all) = tokio::try_join!(
                api.fetch_alerts(filter),
                api.fetch_alerts(AlertFilter::All)
            )?;
            Ok(AlertFeed { selected, all })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertType;
    use crate::views::fake::FakeApi;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_filter_change_refetches_immediately() {
        let api = FakeApi::new();
        let mut view = AlertView::mount(api.clone(), &PollingConfig::default());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(api.alert_filters(), vec![AlertFilter::All]);
        assert_eq!(view.digest().alerts.len(), 3);

        view.set_filter(AlertFilter::Only(AlertType::Medicine));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(
            api.alert_filters(),
            vec![
                AlertFilter::All,
                AlertFilter::Only(AlertType::Medicine),
                AlertFilter::All
            ]
        );
        assert_eq!(view.digest().alerts.len(), 2);

        view.set_filter(AlertFilter::Only(AlertType::Medicine));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(api.calls("alerts"), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recent_list_survives_type_filter() {
        let api = FakeApi::new();
        let mut view = AlertView::mount(api.clone(), &PollingConfig::default());
        tokio::time::sleep(Duration::from_millis(10)).await;
        let ids = |view: &AlertView| -> Vec<u64> {
            view.digest().recent.iter().map(|a| a.id).collect()
        };
        let before = ids(&view);
        assert_eq!(before, vec![1, 2, 3]);

        view.set_filter(AlertFilter::Only(AlertType::Medicine));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(view.digest().alerts.iter().all(|a| a.kind == AlertType::Medicine));
        assert_eq!(ids(&view), before);

        tokio::time::sleep(Duration::from_secs(16)).await;
        assert_eq!(ids(&view), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_trends_fetched_once_alerts_polled() {
        let api = FakeApi::new();
        let view = AlertView::mount(api.clone(), &PollingConfig::default());

        tokio::time::sleep(Duration::from_secs(46)).await;
        assert_eq!(api.calls("trends"), 1);
        assert_eq!(api.calls("alerts"), 4);
        assert_eq!(view.trends().data().labels.len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_not_surfaced() {
        let api = FakeApi::failing();
        let view = AlertView::mount(api.clone(), &PollingConfig::default());
        tokio::time::sleep(Duration::from_millis(10)).await;

        let state = view.state();
        assert!(state.error().is_none());
        assert!(!state.is_loading());
        assert!(state.data().all.is_empty());
    }
}
