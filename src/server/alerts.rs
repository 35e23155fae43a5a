//! Alert cache of the dev backend
//!
//! Alerts are raised as a side effect of serving hospitals and medicines,
//! once per hospital and once per medicine name, and kept for the life of
//! the process.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Alert, AlertType, Hospital, Medicine, Severity, ShortageTrend, StockLevel};

/// Beds below this share raise a hospital alert
const BED_ALERT_PERCENT: u64 = 15;
/// ICU beds below this share raise a hospital alert
const ICU_ALERT_PERCENT: u64 = 10;

const TREND_MONTHS: i64 = 6;
const TREND_WINDOW_DAYS: i64 = 180;
const MOCK_TREND: [f64; 6] = [12.0, 19.0, 15.0, 25.0, 22.0, 30.0];

/// Trend series plus where it came from (`calculated` or `mock`)
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub trend: ShortageTrend,
    pub source: &'static str,
}

#[derive(Debug, Default)]
pub struct AlertCache {
    alerts: Vec<Alert>,
}

fn below(available: u32, total: u32, percent: u64) -> bool {
    u64::from(available) * 100 < u64::from(total) * percent
}

impl AlertCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    fn next_id(&self) -> u64 {
        self.alerts.len() as u64 + 1
    }

    /// Raise a bed alert for every short-staffed hospital not alerted yet
    pub fn record_hospitals(&mut self, hospitals: &[Hospital], now: DateTime<Utc>) -> usize {
        let mut raised = 0;

        for hospital in hospitals {
            if hospital.total_beds == 0 {
                continue;
            }
            let icu_short = hospital.icu_beds > 0
                && below(hospital.available_icu, hospital.icu_beds, ICU_ALERT_PERCENT);
            let beds_short = below(hospital.available_beds, hospital.total_beds, BED_ALERT_PERCENT);
            if !(beds_short || icu_short) {
                continue;
            }
            if self
                .alerts
                .iter()
                .any(|a| a.hospital_id == Some(hospital.id))
            {
                continue;
            }

            let percent = hospital.bed_percent().unwrap_or(0.0);
            let alert = Alert {
                id: self.next_id(),
                kind: AlertType::Bed,
                district: Some(hospital.district.clone()),
                hospital: Some(hospital.name.clone()),
                hospital_id: Some(hospital.id),
                medicine: None,
                medicine_id: None,
                severity: Severity::Critical,
                message: format!(
                    "Critical bed shortage at {} - Only {} beds available ({:.1}%)",
                    hospital.name, hospital.available_beds, percent
                ),
                timestamp: now,
            };
            tracing::info!(alert_id = alert.id, hospital = %hospital.name, "Bed alert raised");
            self.alerts.push(alert);
            raised += 1;
        }

        raised
    }

    /// Raise a medicine alert for every low-stock or recalled medicine not alerted yet
    pub fn record_medicines(&mut self, medicines: &[Medicine], now: DateTime<Utc>) -> usize {
        let mut raised = 0;

        for medicine in medicines {
            if medicine.availability != StockLevel::Low && !medicine.recall {
                continue;
            }
            let known = self.alerts.iter().any(|a| {
                a.kind == AlertType::Medicine && a.medicine.as_deref() == Some(medicine.name.as_str())
            });
            if known {
                continue;
            }

            let warning = medicine.warning.as_deref();
            let severity = if medicine.recall
                || warning.is_some_and(|w| w.to_lowercase().contains("critical"))
            {
                Severity::Critical
            } else {
                Severity::Moderate
            };

            let alert = Alert {
                id: self.next_id(),
                kind: AlertType::Medicine,
                district: None,
                hospital: None,
                hospital_id: None,
                medicine: Some(medicine.name.clone()),
                medicine_id: Some(medicine.id),
                severity,
                message: format!(
                    "{} - {}",
                    medicine.name,
                    warning.unwrap_or("Low availability")
                ),
                timestamp: now,
            };
            tracing::info!(alert_id = alert.id, medicine = %medicine.name, "Medicine alert raised");
            self.alerts.push(alert);
            raised += 1;
        }

        raised
    }

    /// Alerts of the given type (all when `None`), newest first
    pub fn list(&self, kind: Option<AlertType>) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = self
            .alerts
            .iter()
            .filter(|a| kind.map_or(true, |k| a.kind == k))
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        alerts
    }

    /// Critical alerts, newest first
    pub fn critical(&self) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = self
            .alerts
            .iter()
            .filter(|a| a.severity == Severity::Critical)
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        alerts
    }

    /// Alerts per month over the last six months.
    ///
    /// Months are labeled by abbreviated name and spaced 30 days apart ending
    /// at `now`. With no alerts in the window a fixed mock series is returned.
    pub fn shortage_trend(&self, now: DateTime<Utc>) -> TrendReport {
        let window_start = now - Duration::days(TREND_WINDOW_DAYS);
        let mut monthly: HashMap<String, u32> = HashMap::new();
        for alert in self.alerts.iter().filter(|a| a.timestamp >= window_start) {
            *monthly
                .entry(alert.timestamp.format("%b").to_string())
                .or_insert(0) += 1;
        }

        let labels: Vec<String> = (0..TREND_MONTHS)
            .map(|i| {
                (now - Duration::days(30 * (TREND_MONTHS - 1 - i)))
                    .format("%b")
                    .to_string()
            })
            .collect();
        let data: Vec<f64> = labels
            .iter()
            .map(|label| f64::from(monthly.get(label).copied().unwrap_or(0)))
            .collect();

        if data.iter().all(|v| *v == 0.0) {
            return TrendReport {
                trend: ShortageTrend {
                    labels,
                    data: MOCK_TREND.to_vec(),
                },
                source: "mock",
            };
        }

        TrendReport {
            trend: ShortageTrend { labels, data },
            source: "calculated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::data;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_hospital_alerts_raised_once() {
        let mut cache = AlertCache::new();
        let hospitals = data::hospitals(now());

        // Only Delhi (6% beds) and Chennai (14% beds, 8% ICU) qualify.
        assert_eq!(cache.record_hospitals(&hospitals, now()), 2);
        assert_eq!(cache.record_hospitals(&hospitals, now()), 0);

        let alerts = cache.list(Some(AlertType::Bed));
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|a| a.severity == Severity::Critical));
        let delhi = alerts
            .iter()
            .find(|a| a.hospital_id == Some(2))
            .unwrap();
        assert_eq!(
            delhi.message,
            "Critical bed shortage at Regional Medical Center - Only 12 beds available (6.0%)"
        );
    }

    #[test]
    fn test_medicine_alert_severity() {
        let mut cache = AlertCache::new();
        assert_eq!(cache.record_medicines(&data::medicines(), now()), 3);

        let alerts = cache.list(Some(AlertType::Medicine));
        let severity_of = |name: &str| {
            alerts
                .iter()
                .find(|a| a.medicine.as_deref() == Some(name))
                .map(|a| a.severity)
        };
        assert_eq!(severity_of("Insulin Glargine 100 Units/mL"), Some(Severity::Moderate));
        assert_eq!(severity_of("Levothyroxine 50mcg Tablets"), Some(Severity::Critical));
        assert_eq!(severity_of("Atorvastatin 20mg Tablets"), Some(Severity::Critical));
        assert_eq!(severity_of("Paracetamol 500mg"), None);
    }

    #[test]
    fn test_list_sorted_newest_first() {
        let mut cache = AlertCache::new();
        cache.record_hospitals(&data::hospitals(now()), now() - Duration::hours(2));
        cache.record_medicines(&data::medicines(), now());

        let alerts = cache.list(None);
        assert_eq!(alerts.len(), 5);
        assert!(alerts.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        assert_eq!(alerts[0].kind, AlertType::Medicine);
        assert_eq!(cache.critical().len(), 4);
    }

    #[test]
    fn test_trend_falls_back_to_mock() {
        let report = AlertCache::new().shortage_trend(now());
        assert_eq!(report.source, "mock");
        assert_eq!(report.trend.labels.len(), 6);
        assert_eq!(report.trend.labels.last().map(String::as_str), Some("Nov"));
        assert_eq!(report.trend.data, MOCK_TREND.to_vec());
    }

    #[test]
    fn test_trend_counts_recent_alerts() {
        let mut cache = AlertCache::new();
        cache.record_medicines(&data::medicines(), now());
        let report = cache.shortage_trend(now());
        assert_eq!(report.source, "calculated");
        assert_eq!(report.trend.data[5], 3.0);
        assert_eq!(report.trend.data[..5].iter().sum::<f64>(), 0.0);
    }
}
