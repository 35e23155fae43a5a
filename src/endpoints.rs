//! Endpoint Registry
//!
//! Maps logical resource names to absolute URLs under a single base URL.
//! Built once at startup and shared read-only between views.

use std::fmt;

/// Default API base URL used when none is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Environment variable that overrides the API base URL
pub const API_URL_ENV: &str = "CAREWATCH_API_URL";

/// Logical resources served by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Health,
    Hospitals,
    Medicines,
    Alerts,
    CriticalAlerts,
    ShortageTrends,
}

impl Resource {
    /// Path of the resource relative to the API base
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Health => "/health",
            Resource::Hospitals => "/hospitals",
            Resource::Medicines => "/medicines",
            Resource::Alerts => "/alerts",
            Resource::CriticalAlerts => "/alerts/critical",
            Resource::ShortageTrends => "/trends/shortages",
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Health => "health",
            Resource::Hospitals => "hospitals",
            Resource::Medicines => "medicines",
            Resource::Alerts => "alerts",
            Resource::CriticalAlerts => "critical-alerts",
            Resource::ShortageTrends => "shortage-trends",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Absolute URLs for every resource, resolved from one base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
    pub health: String,
    pub hospitals: String,
    pub medicines: String,
    pub alerts: String,
    pub critical_alerts: String,
    pub shortage_trends: String,
}

impl Endpoints {
    /// Build the registry from a base URL. The base is not validated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into().trim_end_matches('/').to_string();
        let url = |resource: Resource| format!("{}{}", base, resource.path());

        Self {
            health: url(Resource::Health),
            hospitals: url(Resource::Hospitals),
            medicines: url(Resource::Medicines),
            alerts: url(Resource::Alerts),
            critical_alerts: url(Resource::CriticalAlerts),
            shortage_trends: url(Resource::ShortageTrends),
            base,
        }
    }

    /// Base URL with any trailing slash removed
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Absolute URL for a resource
    pub fn url(&self, resource: Resource) -> &str {
        match resource {
            Resource::Health => &self.health,
            Resource::Hospitals => &self.hospitals,
            Resource::Medicines => &self.medicines,
            Resource::Alerts => &self.alerts,
            Resource::CriticalAlerts => &self.critical_alerts,
            Resource::ShortageTrends => &self.shortage_trends,
        }
    }

    /// Medicines URL with `search` and `limit` query parameters
    pub fn medicines_query(&self, search: Option<&str>, limit: usize) -> String {
        let mut url = format!("{}?limit={}", self.medicines, limit);
        if let Some(term) = search.filter(|t| !t.is_empty()) {
            url.push_str(&format!("&search={}", urlencoding::encode(term)));
        }
        url
    }

    /// Alerts URL with an optional `type` filter
    pub fn alerts_query(&self, alert_type: Option<&str>) -> String {
        match alert_type {
            Some(t) => format!("{}?type={}", self.alerts, urlencoding::encode(t)),
            None => self.alerts.clone(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
