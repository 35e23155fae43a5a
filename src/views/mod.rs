//! Mounted dashboard views
//!
//! A view owns the sync handles of the resources it shows plus its local
//! inputs (search term, type filter, page). Mounting starts the sync drivers;
//! dropping the view tears them down.

mod alerts;
mod hospitals;
mod medicines;

pub use alerts::AlertView;
pub use hospitals::HospitalView;
pub use medicines::MedicineView;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::client::DashboardApi;
use crate::config::PollingConfig;
use crate::models::AlertFilter;
use crate::render::ChartRenderer;

/// Top-level navigation target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Hospitals,
    Medicines,
    Alerts,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Hospitals => "hospitals",
            Route::Medicines => "medicines",
            Route::Alerts => "alerts",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "h" | "hospitals" | "beds" => Ok(Route::Hospitals),
            "m" | "medicines" => Ok(Route::Medicines),
            "a" | "alerts" => Ok(Route::Alerts),
            other => Err(format!("Unknown view: {}", other)),
        }
    }
}

/// The single view currently mounted by the shell
pub enum MountedView {
    Hospitals(HospitalView),
    Medicines(MedicineView),
    Alerts(AlertView),
}

impl MountedView {
    pub fn mount(route: Route, api: Arc<dyn DashboardApi>, polling: &PollingConfig) -> Self {
        tracing::info!(route = %route, "Mounting view");
        match route {
            Route::Hospitals => MountedView::Hospitals(HospitalView::mount(api, polling)),
            Route::Medicines => MountedView::Medicines(MedicineView::mount(api, polling)),
            Route::Alerts => MountedView::Alerts(AlertView::mount(api, polling)),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            MountedView::Hospitals(_) => Route::Hospitals,
            MountedView::Medicines(_) => Route::Medicines,
            MountedView::Alerts(_) => Route::Alerts,
        }
    }

    pub fn render(&mut self, chart: &dyn ChartRenderer) -> String {
        match self {
            MountedView::Hospitals(view) => view.render(chart),
            MountedView::Medicines(view) => view.render(),
            MountedView::Alerts(view) => view.render(chart),
        }
    }

    /// True once no request of the view is outstanding
    pub fn is_settled(&self) -> bool {
        match self {
            MountedView::Hospitals(view) => !view.state().is_loading(),
            MountedView::Medicines(view) => !view.state().is_loading(),
            MountedView::Alerts(view) => {
                !view.state().is_loading() && !view.trends().is_loading()
            }
        }
    }

    /// Current view model as JSON
    pub fn to_json(&mut self) -> serde_json::Result<serde_json::Value> {
        match self {
            MountedView::Hospitals(view) => serde_json::to_value(view.listing()),
            MountedView::Medicines(view) => serde_json::to_value(view.listing()),
            MountedView::Alerts(view) => {
                let trends = view.trends();
                Ok(serde_json::json!({
                    "filter": view.filter().to_string(),
                    "digest": serde_json::to_value(view.digest())?,
                    "trend": serde_json::to_value(trends.data())?,
                }))
            }
        }
    }

    /// Resolves when the mounted view's state changes
    pub async fn changed(&mut self) {
        match self {
            MountedView::Hospitals(view) => view.changed().await,
            MountedView::Medicines(view) => view.changed().await,
            MountedView::Alerts(view) => view.changed().await,
        }
    }

    /// Returns `false` if the view has no search box
    pub fn set_search(&mut self, term: &str) -> bool {
        match self {
            MountedView::Hospitals(view) => view.set_search(term),
            MountedView::Medicines(view) => view.set_search(term),
            MountedView::Alerts(_) => return false,
        }
        true
    }

    /// Returns `false` if the view has no type filter
    pub fn set_filter(&mut self, filter: AlertFilter) -> bool {
        match self {
            MountedView::Alerts(view) => {
                view.set_filter(filter);
                true
            }
            _ => false,
        }
    }

    /// Returns `false` if the view is not paged
    pub fn next_page(&mut self) -> bool {
        match self {
            MountedView::Medicines(view) => {
                view.next_page();
                true
            }
            _ => false,
        }
    }

    pub fn prev_page(&mut self) -> bool {
        match self {
            MountedView::Medicines(view) => {
                view.prev_page();
                true
            }
            _ => false,
        }
    }
}
