//! Resource Models
//!
//! Wire types for the dashboard backend. Field names follow the JSON the
//! backend emits (camelCase for hospitals and alerts, snake_case for the
//! recall metadata on medicines).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hospital bed availability record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: u64,
    pub name: String,
    pub district: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub contact: String,
    pub address: String,
    pub total_beds: u32,
    pub available_beds: u32,
    pub icu_beds: u32,
    pub available_icu: u32,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Medicine stock tier reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    High,
    Moderate,
    Low,
}

impl StockLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::High => "high",
            StockLevel::Moderate => "moderate",
            StockLevel::Low => "low",
        }
    }
}

/// Medicine availability record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: u64,
    pub name: String,
    pub manufacturer: String,
    pub category: String,
    pub availability: StockLevel,
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub recall: bool,
    /// Recall class, e.g. "Class II"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// What an alert is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Bed,
    Medicine,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Bed => "bed",
            AlertType::Medicine => "medicine",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert urgency tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Moderate,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Moderate => "moderate",
        }
    }
}

/// Shortage or recall alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: AlertType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicine_id: Option<u64>,
    pub severity: Severity,
    pub message: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    /// Hospital or medicine the alert refers to
    pub fn subject(&self) -> &str {
        self.hospital
            .as_deref()
            .or(self.medicine.as_deref())
            .unwrap_or("-")
    }
}

/// Alert type selector used by the alerts view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertFilter {
    #[default]
    All,
    Only(AlertType),
}

impl AlertFilter {
    /// Value for the `type` query parameter, `None` for all alerts
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            AlertFilter::All => None,
            AlertFilter::Only(kind) => Some(kind.as_str()),
        }
    }

    pub fn matches(&self, alert: &Alert) -> bool {
        match self {
            AlertFilter::All => true,
            AlertFilter::Only(kind) => alert.kind == *kind,
        }
    }
}

impl FromStr for AlertFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(AlertFilter::All),
            "bed" | "beds" => Ok(AlertFilter::Only(AlertType::Bed)),
            "medicine" | "medicines" => Ok(AlertFilter::Only(AlertType::Medicine)),
            other => Err(format!("Unknown alert type: {}. Use: all, bed, medicine", other)),
        }
    }
}

impl fmt::Display for AlertFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_value().unwrap_or("all"))
    }
}

/// One alerts poll: the alerts matching the type selector plus the whole
/// feed, which the recent list is drawn from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertFeed {
    pub selected: Vec<Alert>,
    pub all: Vec<Alert>,
}

impl AlertFeed {
    /// Feed for the unfiltered selector, where both lists coincide
    pub fn unfiltered(all: Vec<Alert>) -> Self {
        Self {
            selected: all.clone(),
            all,
        }
    }
}

/// Shortage counts per period, used for chart rendering only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortageTrend {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl ShortageTrend {
    /// Ordered (label, value) pairs; extra labels or values are ignored
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.data.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.data.is_empty()
    }
}

/// Standard backend response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Successful envelope carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            count: None,
            source: None,
        }
    }

    /// Unsuccessful envelope carrying an error message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            count: None,
            source: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Liveness payload from `/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Timestamp (de)serialization accepting RFC 3339 and naive ISO-8601.
///
/// The backend stamps alerts with local naive times; those are read as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        raw.parse::<NaiveDateTime>()
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            dt: &Option<DateTime<Utc>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => super::serialize(dt, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(raw) => super::parse(&raw).map(Some).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid timestamp: {}", raw))
                }),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hospital_from_backend_json() {
        let json = r#"{
            "id": 1,
            "name": "City General Hospital",
            "district": "Mumbai",
            "state": "Maharashtra",
            "totalBeds": 150,
            "availableBeds": 45,
            "icuBeds": 20,
            "availableIcu": 3,
            "contact": "+91-22-1234-5678",
            "address": "123 Medical Street, Mumbai",
            "lastUpdated": "2024-11-02T10:15:30.123456"
        }"#;

        let hospital: Hospital = serde_json::from_str(json).unwrap();
        assert_eq!(hospital.total_beds, 150);
        assert_eq!(hospital.available_icu, 3);
        assert_eq!(hospital.state.as_deref(), Some("Maharashtra"));
        assert!(hospital.last_updated.is_some());
    }

    #[test]
    fn test_medicine_defaults() {
        let json = r#"{
            "id": 2,
            "name": "Insulin Glargine 100 Units/mL",
            "manufacturer": "Diabetes Care Inc",
            "category": "Antidiabetic",
            "availability": "low",
            "warning": null,
            "recall": false
        }"#;

        let medicine: Medicine = serde_json::from_str(json).unwrap();
        assert_eq!(medicine.availability, StockLevel::Low);
        assert!(medicine.warning.is_none());
        assert!(medicine.classification.is_none());
    }

    #[test]
    fn test_alert_naive_timestamp_is_utc() {
        let json = r#"{
            "id": 7,
            "type": "medicine",
            "medicineId": 4,
            "medicine": "Levothyroxine 50mcg Tablets",
            "severity": "critical",
            "message": "Recall issued",
            "timestamp": "2024-11-02T10:15:30"
        }"#;

        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.kind, AlertType::Medicine);
        assert_eq!(alert.subject(), "Levothyroxine 50mcg Tablets");
        assert_eq!(
            alert.timestamp,
            Utc.with_ymd_and_hms(2024, 11, 2, 10, 15, 30).unwrap()
        );
    }

    #[test]
    fn test_alert_rejects_garbage_timestamp() {
        let json = r#"{"id":1,"type":"bed","severity":"moderate","message":"x","timestamp":"yesterday"}"#;
        assert!(serde_json::from_str::<Alert>(json).is_err());
    }

    #[test]
    fn test_alert_filter_parse() {
        assert_eq!("all".parse::<AlertFilter>().unwrap(), AlertFilter::All);
        assert_eq!(
            "Bed".parse::<AlertFilter>().unwrap(),
            AlertFilter::Only(AlertType::Bed)
        );
        assert!("icu".parse::<AlertFilter>().is_err());
        assert_eq!(AlertFilter::Only(AlertType::Medicine).to_string(), "medicine");
    }

    #[test]
    fn test_envelope_failure_without_data() {
        let json = r#"{"success": false, "error": "upstream down"}"#;
        let envelope: ApiEnvelope<Vec<Hospital>> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error.as_deref(), Some("upstream down"));
    }

    #[test]
    fn test_trend_points_pairs_labels() {
        let trend = ShortageTrend {
            labels: vec!["Jun".into(), "Jul".into(), "Aug".into()],
            data: vec![12.0, 19.0],
        };
        let points: Vec<_> = trend.points().collect();
        assert_eq!(points, vec![("Jun", 12.0), ("Jul", 19.0)]);
    }
}
