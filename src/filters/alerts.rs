//! Alert partitioning, ordering and recency text

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Alert, AlertFilter, AlertType, Severity};

/// Size of the "recent alerts" list
pub const RECENT_ALERT_LIMIT: usize = 5;

/// Critical vs. all other alerts, the two slices of the severity chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityBreakdown {
    pub critical: usize,
    pub other: usize,
}

impl SeverityBreakdown {
    pub fn total(&self) -> usize {
        self.critical + self.other
    }
}

pub fn severity_breakdown(alerts: &[Alert]) -> SeverityBreakdown {
    let critical = alerts
        .iter()
        .filter(|a| a.severity == Severity::Critical)
        .count();
    SeverityBreakdown {
        critical,
        other: alerts.len() - critical,
    }
}

/// Alerts per type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub bed: usize,
    pub medicine: usize,
}

pub fn type_counts(alerts: &[Alert]) -> TypeCounts {
    alerts.iter().fold(TypeCounts::default(), |mut counts, alert| {
        match alert.kind {
            AlertType::Bed => counts.bed += 1,
            AlertType::Medicine => counts.medicine += 1,
        }
        counts
    })
}

/// Alerts passing the type selector, in input order
pub fn filter_alerts(alerts: &[Alert], filter: AlertFilter) -> Vec<Alert> {
    alerts.iter().filter(|a| filter.matches(a)).cloned().collect()
}

/// The `limit` newest alerts, newest first
pub fn recent_alerts(alerts: &[Alert], limit: usize) -> Vec<Alert> {
    let mut sorted = alerts.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.truncate(limit);
    sorted
}

/// Relative age of `timestamp` at `now`, e.g. "45 minutes ago".
///
/// Units are not pluralized ("1 hours ago"). Future timestamps read as 0 minutes.
pub fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes().max(0);
    if minutes < 60 {
        return format!("{} minutes ago", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        format!("{} hours ago", hours)
    } else {
        format!("{} days ago", hours / 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn alert(id: u64, kind: AlertType, severity: Severity, minutes_ago: i64) -> Alert {
        let now = Utc.with_ymd_and_hms(2024, 11, 2, 12, 0, 0).unwrap();
        Alert {
            id,
            kind,
            district: Some("Delhi".to_string()),
            hospital: Some("Regional Medical Center".to_string()),
            hospital_id: Some(2),
            medicine: None,
            medicine_id: None,
            severity,
            message: format!("alert {}", id),
            timestamp: now - Duration::minutes(minutes_ago),
        }
    }

    fn sample() -> Vec<Alert> {
        vec![
            alert(1, AlertType::Bed, Severity::Critical, 300),
            alert(2, AlertType::Medicine, Severity::Moderate, 5),
            alert(3, AlertType::Medicine, Severity::Critical, 90),
            alert(4, AlertType::Bed, Severity::Moderate, 20),
            alert(5, AlertType::Medicine, Severity::Critical, 1),
            alert(6, AlertType::Bed, Severity::Critical, 2000),
            alert(7, AlertType::Medicine, Severity::Moderate, 45),
        ]
    }

    #[test]
    fn test_severity_breakdown() {
        let breakdown = severity_breakdown(&sample());
        assert_eq!(breakdown, SeverityBreakdown { critical: 4, other: 3 });
        assert_eq!(breakdown.total(), 7);
        assert_eq!(severity_breakdown(&[]), SeverityBreakdown::default());
    }

    #[test]
    fn test_type_counts_and_filter() {
        let alerts = sample();
        assert_eq!(type_counts(&alerts), TypeCounts { bed: 3, medicine: 4 });

        let beds = filter_alerts(&alerts, AlertFilter::Only(AlertType::Bed));
        assert!(beds.iter().all(|a| a.kind == AlertType::Bed));
        assert_eq!(filter_alerts(&alerts, AlertFilter::All).len(), alerts.len());
    }

    #[test]
    fn test_recent_sorted_descending_and_bounded() {
        let alerts = sample();
        let recent = recent_alerts(&alerts, RECENT_ALERT_LIMIT);
        assert_eq!(recent.len(), 5);
        let ids: Vec<u64> = recent.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![5, 2, 4, 7, 3]);
        assert!(recent.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

        for n in 0..alerts.len() {
            assert_eq!(recent_alerts(&alerts[..n], RECENT_ALERT_LIMIT).len(), n.min(5));
        }
    }

    #[test]
    fn test_recent_does_not_reorder_input() {
        let alerts = sample();
        let _ = recent_alerts(&alerts, 3);
        assert_eq!(alerts[0].id, 1);
    }

    #[test]
    fn test_time_ago() {
        let now = Utc.with_ymd_and_hms(2024, 11, 2, 12, 0, 0).unwrap();
        let ago = |minutes: i64| format_time_ago(now - Duration::minutes(minutes), now);

        assert_eq!(ago(45), "45 minutes ago");
        assert_eq!(ago(90), "1 hours ago");
        assert_eq!(ago(25 * 60), "1 days ago");
        assert_eq!(ago(0), "0 minutes ago");
        assert_eq!(ago(59), "59 minutes ago");
        assert_eq!(ago(60), "1 hours ago");
        assert_eq!(ago(23 * 60 + 59), "23 hours ago");
        assert_eq!(ago(24 * 60), "1 days ago");
    }

    #[test]
    fn test_time_ago_truncates_and_clamps() {
        let now = Utc.with_ymd_and_hms(2024, 11, 2, 12, 0, 0).unwrap();
        assert_eq!(
            format_time_ago(now - Duration::seconds(119), now),
            "1 minutes ago"
        );
        assert_eq!(
            format_time_ago(now + Duration::minutes(10), now),
            "0 minutes ago"
        );
    }
}
