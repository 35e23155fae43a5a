//! Filter/Classify/Paginate Engine
//!
//! Pure functions deriving what each view displays from its raw collection
//! and the user's current inputs. Nothing here mutates the raw collection;
//! views call the `derive_*` functions again on every state change.

pub mod alerts;
pub mod availability;
pub mod pagination;
pub mod search;
pub mod summary;

pub use alerts::{
    filter_alerts, format_time_ago, recent_alerts, severity_breakdown, SeverityBreakdown,
    TypeCounts, RECENT_ALERT_LIMIT,
};
pub use availability::{availability_percent, classify, BedStatus};
pub use pagination::{clamp_page, page_count, paginate, Page, Pager, MEDICINE_PAGE_SIZE};
pub use search::{filter_by_term, matches, Searchable};
pub use summary::{AlertSummary, HospitalSummary, MedicineSummary};

use serde::Serialize;

use crate::models::{Alert, AlertFeed, AlertFilter, Hospital, Medicine};

/// Hospitals view model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HospitalListing {
    pub term: String,
    pub hospitals: Vec<Hospital>,
    pub summary: HospitalSummary,
}

/// Apply the search term and summarize what remains
pub fn derive_hospitals(raw: &[Hospital], term: &str) -> HospitalListing {
    let hospitals = filter_by_term(raw, term);
    let summary = HospitalSummary::from_hospitals(&hospitals);
    HospitalListing {
        term: term.to_string(),
        hospitals,
        summary,
    }
}

/// Medicines view model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicineListing {
    pub page: Page<Medicine>,
    pub summary: MedicineSummary,
}

/// Slice out the requested page; the summary covers the full collection
pub fn derive_medicines(raw: &[Medicine], page: usize) -> MedicineListing {
    MedicineListing {
        page: paginate(raw, page, MEDICINE_PAGE_SIZE),
        summary: MedicineSummary::from_medicines(raw),
    }
}

/// Alerts view model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertDigest {
    pub alerts: Vec<Alert>,
    pub recent: Vec<Alert>,
    pub summary: AlertSummary,
}

/// Derive the alerts view.
///
/// `filter` narrows the selected list; the recent list always comes from the
/// unfiltered feed.
pub fn derive_alerts(feed: &AlertFeed, filter: AlertFilter) -> AlertDigest {
    let alerts = filter_alerts(&feed.selected, filter);
    AlertDigest {
        recent: recent_alerts(&feed.all, RECENT_ALERT_LIMIT),
        summary: AlertSummary::from_alerts(&alerts),
        alerts,
    }
}
