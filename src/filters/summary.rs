//! Aggregate counters shown above each view

use serde::Serialize;

use super::alerts::{severity_breakdown, type_counts, SeverityBreakdown, TypeCounts};
use super::availability::{availability_percent, BedStatus};
use crate::models::{Alert, Hospital, Medicine, StockLevel};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HospitalSummary {
    pub hospitals: usize,
    pub total_beds: u64,
    pub available_beds: u64,
    pub icu_beds: u64,
    pub available_icu: u64,
    pub good: usize,
    pub moderate: usize,
    pub critical: usize,
}

impl HospitalSummary {
    pub fn from_hospitals(hospitals: &[Hospital]) -> Self {
        let mut summary = Self {
            hospitals: hospitals.len(),
            ..Self::default()
        };

        for hospital in hospitals {
            summary.total_beds += u64::from(hospital.total_beds);
            summary.available_beds += u64::from(hospital.available_beds);
            summary.icu_beds += u64::from(hospital.icu_beds);
            summary.available_icu += u64::from(hospital.available_icu);

            match hospital.bed_status() {
                BedStatus::Good => summary.good += 1,
                BedStatus::Moderate => summary.moderate += 1,
                BedStatus::Critical => summary.critical += 1,
            }
        }

        summary
    }

    /// Overall share of free beds across all hospitals
    pub fn bed_percent(&self) -> Option<f64> {
        if self.total_beds == 0 {
            return None;
        }
        Some(self.available_beds as f64 / self.total_beds as f64 * 100.0)
    }

    pub fn icu_percent(&self) -> Option<f64> {
        match (u32::try_from(self.available_icu), u32::try_from(self.icu_beds)) {
            (Ok(available), Ok(total)) => availability_percent(available, total),
            _ => Some(self.available_icu as f64 / self.icu_beds as f64 * 100.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MedicineSummary {
    pub medicines: usize,
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
    pub recalls: usize,
    pub warnings: usize,
}

impl MedicineSummary {
    pub fn from_medicines(medicines: &[Medicine]) -> Self {
        let mut summary = Self {
            medicines: medicines.len(),
            ..Self::default()
        };

        for medicine in medicines {
            match medicine.availability {
                StockLevel::High => summary.high += 1,
                StockLevel::Moderate => summary.moderate += 1,
                StockLevel::Low => summary.low += 1,
            }
            if medicine.recall {
                summary.recalls += 1;
            }
            if medicine.warning.is_some() {
                summary.warnings += 1;
            }
        }

        summary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub total: usize,
    pub severity: SeverityBreakdown,
    pub types: TypeCounts,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        Self {
            total: alerts.len(),
            severity: severity_breakdown(alerts),
            types: type_counts(alerts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hospital(total: u32, available: u32, icu: u32, available_icu: u32) -> Hospital {
        Hospital {
            id: 1,
            name: "Test Hospital".to_string(),
            district: "Mumbai".to_string(),
            state: None,
            contact: String::new(),
            address: String::new(),
            total_beds: total,
            available_beds: available,
            icu_beds: icu,
            available_icu,
            last_updated: None,
        }
    }

    fn medicine(availability: StockLevel, recall: bool, warning: Option<&str>) -> Medicine {
        Medicine {
            id: 1,
            name: "Test".to_string(),
            manufacturer: "Maker".to_string(),
            category: "Category".to_string(),
            availability,
            warning: warning.map(str::to_string),
            recall,
            classification: None,
            recall_status: None,
            recall_date: None,
            source: None,
        }
    }

    #[test]
    fn test_hospital_summary() {
        let hospitals = vec![
            hospital(150, 45, 20, 3),
            hospital(200, 12, 30, 2),
            hospital(100, 78, 15, 8),
            hospital(0, 0, 0, 0),
        ];
        let summary = HospitalSummary::from_hospitals(&hospitals);

        assert_eq!(summary.hospitals, 4);
        assert_eq!(summary.total_beds, 450);
        assert_eq!(summary.available_beds, 135);
        assert_eq!(summary.icu_beds, 65);
        assert_eq!(summary.available_icu, 13);
        assert_eq!((summary.good, summary.moderate, summary.critical), (2, 0, 2));

        let pct = summary.bed_percent().unwrap();
        assert!((pct - 30.0).abs() < 1e-9);
        assert!(summary.icu_percent().unwrap() > 19.0);
    }

    #[test]
    fn test_empty_hospital_summary() {
        let summary = HospitalSummary::from_hospitals(&[]);
        assert_eq!(summary, HospitalSummary::default());
        assert_eq!(summary.bed_percent(), None);
        assert_eq!(summary.icu_percent(), None);
    }

    #[test]
    fn test_medicine_summary() {
        let medicines = vec![
            medicine(StockLevel::High, false, None),
            medicine(StockLevel::Low, false, Some("Limited stock")),
            medicine(StockLevel::Low, true, Some("Recall: Class II")),
            medicine(StockLevel::Moderate, false, None),
        ];
        let summary = MedicineSummary::from_medicines(&medicines);
        assert_eq!(
            summary,
            MedicineSummary {
                medicines: 4,
                high: 1,
                moderate: 1,
                low: 2,
                recalls: 1,
                warnings: 2,
            }
        );
    }
}
